use std::fmt;
use std::ops::Deref;

use log::warn;

use crate::coord::Coord;
use crate::errors::CoordError;

/// A span over a set of overlapping coords.
///
/// The group reads like a [`Coord`] (through `Deref`) whose start and end
/// are the smallest start and largest end of its members. It is not
/// `DerefMut`: the span only moves when members are added.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordGroup {
    span: Coord,
    coords: Vec<Coord>,
    use_strand: bool,
}

/// A member that [`CoordGroup::split_report`] had to add to a new group even
/// though it did not overlap it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcedAdd {
    pub group_idnum: String,
    pub coord_start: i64,
    pub coord_end: i64,
    pub group_start: i64,
    pub group_end: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitReport {
    pub groups: Vec<CoordGroup>,
    pub forced: Vec<ForcedAdd>,
}

fn child_idnum(parent: Option<&str>, n: usize) -> String {
    match parent {
        Some(idnum) => format!("{}_RG{}", idnum, n),
        None => format!("RG{}", n),
    }
}

impl CoordGroup {
    /// Start a group from a seed coord. Members may be on either strand.
    pub fn new(coord: Coord) -> Self {
        CoordGroup {
            span: coord.clone(),
            coords: vec![coord],
            use_strand: false,
        }
    }

    /// Start a group whose members must all share the seed's strand.
    pub fn stranded(coord: Coord) -> Self {
        CoordGroup {
            use_strand: true,
            ..CoordGroup::new(coord)
        }
    }

    pub fn is_stranded(&self) -> bool {
        self.use_strand
    }

    /// Add a member, widening the span as needed.
    ///
    /// The coord must be on the group's chromosome (and strand, for stranded
    /// groups) and must overlap the current span unless `force` is set.
    pub fn add_coord(&mut self, coord: Coord, force: bool) -> Result<(), CoordError> {
        if coord.chrom() != self.span.chrom() {
            return Err(CoordError::ChromMismatch {
                coord: coord.chrom(),
                group: self.span.chrom(),
            });
        }
        if self.use_strand && coord.strand() != self.span.strand() {
            return Err(CoordError::StrandMismatch {
                coord: coord.strand().as_i8(),
                group: self.span.strand().as_i8(),
            });
        }
        if !force && (coord.end() < self.span.start() || coord.start() > self.span.end()) {
            return Err(CoordError::NoOverlap {
                coord_start: coord.start(),
                coord_end: coord.end(),
                group_start: self.span.start(),
                group_end: self.span.end(),
            });
        }

        let start = self.span.start().min(coord.start());
        let end = self.span.end().max(coord.end());
        self.span.set_span(start, end);
        self.coords.push(coord);

        Ok(())
    }

    pub fn num_coords(&self) -> usize {
        self.coords.len()
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn as_coord(&self) -> &Coord {
        &self.span
    }

    /// Break the group into groups of at most `max_coords_per_group` members.
    pub fn split(&self, max_coords_per_group: usize) -> Result<Vec<CoordGroup>, CoordError> {
        self.split_report(max_coords_per_group)
            .map(|report| report.groups)
    }

    /// Like [`CoordGroup::split`], also returning every member that had to be
    /// forced into a group it does not overlap.
    ///
    /// Members are dealt out in order. Group sizes are balanced: a group of 10
    /// split with a maximum of 4 gives groups of 4, 4 and 2 members, and one of
    /// 9 gives 3, 3 and 3. A group already below the maximum comes back as a
    /// single copy.
    pub fn split_report(&self, max_coords_per_group: usize) -> Result<SplitReport, CoordError> {
        if max_coords_per_group == 0 {
            return Err(CoordError::InvalidGroupSize(max_coords_per_group));
        }

        let count = self.num_coords();
        if count < max_coords_per_group {
            return Ok(SplitReport {
                groups: vec![self.clone()],
                forced: Vec::new(),
            });
        }

        let n_groups = count.div_ceil(max_coords_per_group);
        let coords_per_group = count.div_ceil(n_groups);

        let mut groups: Vec<CoordGroup> = Vec::with_capacity(n_groups);
        let mut forced = Vec::new();
        let mut cur_n_coord = 0;

        for coord in &self.coords {
            if cur_n_coord < coords_per_group {
                if let Some(group) = groups.last_mut() {
                    if group.span.overlaps(coord, false) {
                        group.add_coord(coord.clone(), false)?;
                    } else {
                        // Members are ordered by start, but an aligned length
                        // shorter than the full feature can still leave a gap.
                        let event = ForcedAdd {
                            group_idnum: group.span.idnum().unwrap_or_default().to_string(),
                            coord_start: coord.start(),
                            coord_end: coord.end(),
                            group_start: group.span.start(),
                            group_end: group.span.end(),
                        };
                        warn!(
                            "adding non-overlapping coord {}-{} to split coordinate group {} ({}-{})",
                            event.coord_start,
                            event.coord_end,
                            event.group_idnum,
                            event.group_start,
                            event.group_end
                        );
                        forced.push(event);
                        group.add_coord(coord.clone(), true)?;
                    }
                    cur_n_coord += 1;
                    continue;
                }
            }

            let mut group = CoordGroup {
                span: coord.clone(),
                coords: vec![coord.clone()],
                use_strand: self.use_strand,
            };
            group
                .span
                .set_idnum(child_idnum(self.span.idnum(), groups.len() + 1));
            groups.push(group);
            cur_n_coord = 1;
        }

        Ok(SplitReport { groups, forced })
    }
}

impl Deref for CoordGroup {
    type Target = Coord;

    fn deref(&self) -> &Coord {
        &self.span
    }
}

impl AsRef<Coord> for CoordGroup {
    fn as_ref(&self) -> &Coord {
        &self.span
    }
}

impl fmt::Display for CoordGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} coords]", self.span, self.coords.len())
    }
}

/// Collect sorted coords into groups of mutually overlapping coords, one
/// group per maximal overlapping run (e.g. merging the exons of a gene).
pub fn group_overlapping<T: AsRef<Coord>>(
    coords: &[T],
    use_strand: bool,
) -> Result<Vec<CoordGroup>, CoordError> {
    debug_assert!(
        crate::sorts::is_sorted_coords(coords, use_strand),
        "coords are not sorted"
    );

    let mut groups: Vec<CoordGroup> = Vec::new();

    for coord in coords {
        let coord = coord.as_ref();
        if let Some(group) = groups.last_mut() {
            if group.span.overlaps(coord, use_strand) {
                group.add_coord(coord.clone(), false)?;
                continue;
            }
        }

        groups.push(if use_strand {
            CoordGroup::stranded(coord.clone())
        } else {
            CoordGroup::new(coord.clone())
        });
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrom::{ChromFlags, ChromosomeRegistry};
    use crate::coord::Strand;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn registry() -> ChromosomeRegistry {
        let mut registry = ChromosomeRegistry::new();
        registry.push("chr1", 10_000, ChromFlags::autosome()).unwrap();
        registry.push("chr2", 10_000, ChromFlags::autosome()).unwrap();
        registry
    }

    fn group_of(registry: &ChromosomeRegistry, spans: &[(i64, i64)]) -> CoordGroup {
        let mut iter = spans.iter();
        let &(start, end) = iter.next().unwrap();
        let seed = registry
            .coord("chr1", start, end, Strand::Forward)
            .unwrap()
            .with_idnum("grp");
        let mut group = CoordGroup::new(seed);
        for &(start, end) in iter {
            let coord = registry.coord("chr1", start, end, Strand::Forward).unwrap();
            group.add_coord(coord, false).unwrap();
        }
        group
    }

    fn sizes(groups: &[CoordGroup]) -> Vec<usize> {
        groups.iter().map(|g| g.num_coords()).collect()
    }

    #[rstest]
    fn test_add_coord_widens_span(registry: ChromosomeRegistry) {
        let group = group_of(&registry, &[(100, 200), (50, 120), (150, 300)]);
        assert_eq!((group.start(), group.end()), (50, 300));
        assert_eq!(group.num_coords(), 3);
        assert_eq!(group.coords()[0].start(), 100);
    }

    #[rstest]
    fn test_add_coord_rejects(registry: ChromosomeRegistry) {
        let seed = registry.coord("chr1", 100, 200, Strand::Forward).unwrap();
        let mut group = CoordGroup::stranded(seed);

        let far = registry.coord("chr1", 500, 600, Strand::Forward).unwrap();
        assert_eq!(
            group.add_coord(far.clone(), false),
            Err(CoordError::NoOverlap {
                coord_start: 500,
                coord_end: 600,
                group_start: 100,
                group_end: 200
            })
        );

        let other_strand = registry.coord("chr1", 150, 250, Strand::Reverse).unwrap();
        assert_eq!(
            group.add_coord(other_strand, false),
            Err(CoordError::StrandMismatch { coord: -1, group: 1 })
        );

        let other_chrom = registry.coord("chr2", 150, 250, Strand::Forward).unwrap();
        assert!(matches!(
            group.add_coord(other_chrom, true),
            Err(CoordError::ChromMismatch { .. })
        ));

        // nothing was added by the failed calls
        assert_eq!(group.num_coords(), 1);
        assert_eq!((group.start(), group.end()), (100, 200));

        group.add_coord(far, true).unwrap();
        assert_eq!((group.start(), group.end()), (100, 600));
    }

    #[rstest]
    fn test_unstranded_group_accepts_both_strands(registry: ChromosomeRegistry) {
        let seed = registry.coord("chr1", 100, 200, Strand::Forward).unwrap();
        let mut group = CoordGroup::new(seed);
        let rev = registry.coord("chr1", 150, 250, Strand::Reverse).unwrap();
        assert_eq!(group.add_coord(rev, false), Ok(()));
    }

    #[rstest]
    #[case(10, 4, vec![4, 4, 2])]
    #[case(9, 4, vec![3, 3, 3])]
    #[case(7, 3, vec![3, 3, 1])]
    #[case(4, 4, vec![4])]
    #[case(3, 4, vec![3])]
    #[case(5, 1, vec![1, 1, 1, 1, 1])]
    fn test_split_sizes(
        registry: ChromosomeRegistry,
        #[case] n: i64,
        #[case] max: usize,
        #[case] expected: Vec<usize>,
    ) {
        let spans: Vec<(i64, i64)> = (0..n).map(|i| (100 + i, 200 + i)).collect();
        let group = group_of(&registry, &spans);

        let groups = group.split(max).unwrap();
        assert_eq!(sizes(&groups), expected);
    }

    #[rstest]
    fn test_split_names_and_spans(registry: ChromosomeRegistry) {
        let group = group_of(&registry, &[(100, 200), (110, 150), (120, 400), (300, 350)]);
        let groups = group.split(2).unwrap();

        let names: Vec<&str> = groups.iter().map(|g| g.idnum().unwrap()).collect();
        assert_eq!(names, vec!["grp_RG1", "grp_RG2"]);
        assert_eq!((groups[0].start(), groups[0].end()), (100, 200));
        assert_eq!((groups[1].start(), groups[1].end()), (120, 400));

        // the parent is untouched
        assert_eq!(group.num_coords(), 4);
        assert_eq!(group.idnum(), Some("grp"));
    }

    #[rstest]
    fn test_split_stranded_group_keeps_strand(registry: ChromosomeRegistry) {
        let seed = registry.coord("chr1", 100, 200, Strand::Reverse).unwrap();
        let mut group = CoordGroup::stranded(seed);
        for (start, end) in [(120, 180), (150, 260), (250, 300), (290, 310)] {
            let coord = registry.coord("chr1", start, end, Strand::Reverse).unwrap();
            group.add_coord(coord, false).unwrap();
        }

        let children = group.split(2).unwrap();
        assert_eq!(sizes(&children), vec![2, 2, 1]);
        for child in &children {
            assert!(child.is_stranded());
            assert_eq!(child.strand(), Strand::Reverse);
            assert!(child.coords().iter().all(|c| c.strand() == Strand::Reverse));
        }

        // children still refuse members from the other strand
        let mut first = children[0].clone();
        let fwd = registry.coord("chr1", 100, 200, Strand::Forward).unwrap();
        assert_eq!(
            first.add_coord(fwd, false),
            Err(CoordError::StrandMismatch { coord: 1, group: -1 })
        );
    }

    #[rstest]
    fn test_split_below_max_is_a_copy(registry: ChromosomeRegistry) {
        let group = group_of(&registry, &[(100, 200), (110, 150)]);
        let groups = group.split(5).unwrap();
        assert_eq!(groups, vec![group.clone()]);
    }

    #[rstest]
    fn test_split_forces_non_overlapping_member(registry: ChromosomeRegistry) {
        let _ = pretty_env_logger::try_init();

        let group = group_of(&registry, &[(1, 100), (2, 3), (5, 6), (50, 60)]);
        let report = group.split_report(2).unwrap();

        assert_eq!(sizes(&report.groups), vec![2, 2]);
        assert_eq!(
            report.forced,
            vec![ForcedAdd {
                group_idnum: "grp_RG2".to_string(),
                coord_start: 50,
                coord_end: 60,
                group_start: 5,
                group_end: 6,
            }]
        );
        assert_eq!((report.groups[1].start(), report.groups[1].end()), (5, 60));
    }

    #[rstest]
    fn test_split_rejects_zero(registry: ChromosomeRegistry) {
        let group = group_of(&registry, &[(100, 200)]);
        assert_eq!(group.split(0), Err(CoordError::InvalidGroupSize(0)));
    }

    #[rstest]
    fn test_split_without_parent_idnum(registry: ChromosomeRegistry) {
        let seed = registry.coord("chr1", 1, 10, Strand::Unknown).unwrap();
        let mut group = CoordGroup::new(seed);
        group
            .add_coord(registry.coord("chr1", 5, 20, Strand::Unknown).unwrap(), false)
            .unwrap();

        let groups = group.split(1).unwrap();
        let names: Vec<&str> = groups.iter().map(|g| g.idnum().unwrap()).collect();
        assert_eq!(names, vec!["RG1", "RG2"]);
    }

    #[rstest]
    fn test_group_overlapping(registry: ChromosomeRegistry) {
        let exons = vec![
            registry.coord("chr1", 100, 200, Strand::Forward).unwrap(),
            registry.coord("chr1", 150, 250, Strand::Forward).unwrap(),
            registry.coord("chr1", 250, 260, Strand::Forward).unwrap(),
            registry.coord("chr1", 400, 500, Strand::Forward).unwrap(),
            registry.coord("chr2", 100, 200, Strand::Forward).unwrap(),
        ];

        let groups = group_overlapping(&exons, false).unwrap();
        let spans: Vec<(u32, i64, i64)> = groups
            .iter()
            .map(|g| (g.chrom().0, g.start(), g.end()))
            .collect();
        assert_eq!(spans, vec![(1, 100, 260), (1, 400, 500), (2, 100, 200)]);
        assert_eq!(sizes(&groups), vec![3, 1, 1]);
    }
}
