use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::chrom::{ChromId, Chromosome};
use crate::errors::CoordError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Strand {
    Reverse = -1,
    #[default]
    Unknown = 0,
    Forward = 1,
}

impl Strand {
    pub fn as_i8(self) -> i8 {
        self as i8
    }
}

impl TryFrom<i64> for Strand {
    type Error = CoordError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Strand::Forward),
            0 => Ok(Strand::Unknown),
            -1 => Ok(Strand::Reverse),
            other => Err(CoordError::InvalidStrand(other)),
        }
    }
}

impl FromStr for Strand {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" | "1" | "f" | "F" | "fwd" | "forward" => Ok(Strand::Forward),
            "-" | "-1" | "r" | "R" | "rev" | "reverse" => Ok(Strand::Reverse),
            "." | "0" | "u" | "U" | "" => Ok(Strand::Unknown),
            _ => Err(CoordError::UnknownStrand(s.to_string())),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::Unknown => '.',
        };
        write!(f, "{}", c)
    }
}

/// Parse the strand notations found in BED/GTF-like files.
pub fn parse_strand(strand_str: &str) -> Result<Strand, CoordError> {
    strand_str.parse()
}

/// Canonical sort key of a coord: `(chrom, strand, start)`. When strand is
/// ignored the strand slot is always 0, so the key degrades to
/// `(chrom, start)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoordKey {
    pub chrom: u32,
    pub strand: i8,
    pub start: i64,
}

/// An interval `[start, end]` (1-based, inclusive) on one chromosome strand.
///
/// Positions are validated against the chromosome on construction and the
/// fields are only reachable through accessors, so an invalid `Coord` can
/// never be observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Coord {
    chrom: ChromId,
    chrom_len: i64,
    start: i64,
    end: i64,
    strand: Strand,
    score: Option<f64>,
    idnum: Option<String>,
    name: Option<String>,
}

impl Coord {
    pub fn new(chrom: &Chromosome, start: i64, end: i64, strand: Strand) -> Result<Self, CoordError> {
        if start > end {
            return Err(CoordError::StartAfterEnd { start, end });
        }
        if start < 1 {
            return Err(CoordError::StartBeforeOne(start));
        }
        if end > chrom.length {
            return Err(CoordError::EndPastChrom {
                end,
                length: chrom.length,
            });
        }

        Ok(Coord {
            chrom: chrom.idnum,
            chrom_len: chrom.length,
            start,
            end,
            strand,
            score: None,
            idnum: None,
            name: None,
        })
    }

    /// Like [`Coord::new`] but takes the strand as a raw -1/0/1 value.
    pub fn from_raw(chrom: &Chromosome, start: i64, end: i64, strand: i64) -> Result<Self, CoordError> {
        Coord::new(chrom, start, end, Strand::try_from(strand)?)
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_idnum(mut self, idnum: impl Into<String>) -> Self {
        self.idnum = Some(idnum.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn chrom(&self) -> ChromId {
        self.chrom
    }

    pub fn chrom_len(&self) -> i64 {
        self.chrom_len
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn idnum(&self) -> Option<&str> {
        self.idnum.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of bases spanned.
    pub fn length(&self) -> i64 {
        self.end - self.start + 1
    }

    pub fn key(&self, use_strand: bool) -> CoordKey {
        CoordKey {
            chrom: self.chrom.0,
            strand: if use_strand { self.strand.as_i8() } else { 0 },
            start: self.start,
        }
    }

    /// True if the coords share at least one base. Touching ends count.
    pub fn overlaps(&self, other: &Coord, use_strand: bool) -> bool {
        if self.chrom != other.chrom {
            return false;
        }
        if use_strand && self.strand != other.strand {
            return false;
        }
        self.start <= other.end && self.end >= other.start
    }

    /// True if this coord lies completely inside `other`. Chromosomes are
    /// compared by id, like [`Coord::overlaps`].
    pub fn within(&self, other: &Coord, use_strand: bool) -> bool {
        if self.chrom != other.chrom {
            return false;
        }
        if use_strand && self.strand != other.strand {
            return false;
        }
        self.start >= other.start && self.end <= other.end
    }

    /// Grow both ends by `n_bp`, without going past the chromosome ends.
    pub fn expand(&mut self, n_bp: u64) {
        let n_bp = i64::try_from(n_bp).unwrap_or(i64::MAX);
        self.start = self.start.saturating_sub(n_bp).max(1);
        self.end = self.end.saturating_add(n_bp).min(self.chrom_len);
    }

    pub(crate) fn set_span(&mut self, start: i64, end: i64) {
        self.start = start;
        self.end = end;
    }

    pub(crate) fn set_idnum(&mut self, idnum: String) {
        self.idnum = Some(idnum);
    }
}

impl AsRef<Coord> for Coord {
    fn as_ref(&self) -> &Coord {
        self
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(idnum) = &self.idnum {
            write!(f, "{} ", idnum)?;
        }
        write!(f, "{}:{}-{}({})", self.chrom, self.start, self.end, self.strand)
    }
}

/// Collapse sorted 1-based positions into coords, one per run of adjacent
/// sites: `[1, 2, 10, 11, 12, 13, 20]` gives `1-2, 10-13, 20-20`.
pub fn coords_from_sites(chrom: &Chromosome, sites: &[i64]) -> Result<Vec<Coord>, CoordError> {
    let mut coords = Vec::new();

    let mut iter = sites.iter().copied();
    let Some(first) = iter.next() else {
        return Ok(coords);
    };

    let mut start = first;
    let mut end = first;
    for site in iter {
        if site - end != 1 {
            coords.push(Coord::new(chrom, start, end, Strand::Unknown)?);
            start = site;
        }
        end = site;
    }
    coords.push(Coord::new(chrom, start, end, Strand::Unknown)?);

    Ok(coords)
}

/// Index coords by their start and by their end positions.
pub fn group_by_start_end(coords: &[Coord]) -> (FxHashMap<i64, Vec<&Coord>>, FxHashMap<i64, Vec<&Coord>>) {
    let mut by_start: FxHashMap<i64, Vec<&Coord>> = FxHashMap::default();
    let mut by_end: FxHashMap<i64, Vec<&Coord>> = FxHashMap::default();

    for coord in coords {
        by_start.entry(coord.start).or_default().push(coord);
        by_end.entry(coord.end).or_default().push(coord);
    }

    (by_start, by_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn chrom() -> Chromosome {
        Chromosome::new(ChromId(1), "chr1", 1000)
    }

    #[fixture]
    fn chrom2() -> Chromosome {
        Chromosome::new(ChromId(2), "chr2", 500)
    }

    #[rstest]
    #[case(1, 1, 0)]
    #[case(1, 1000, 1)]
    #[case(500, 600, -1)]
    fn test_new_valid(chrom: Chromosome, #[case] start: i64, #[case] end: i64, #[case] strand: i64) {
        let c = Coord::from_raw(&chrom, start, end, strand).unwrap();
        assert_eq!(c.start(), start);
        assert_eq!(c.end(), end);
        assert_eq!(c.strand().as_i8() as i64, strand);
    }

    #[rstest]
    #[case(20, 10, 0, CoordError::StartAfterEnd { start: 20, end: 10 })]
    #[case(0, 10, 0, CoordError::StartBeforeOne(0))]
    #[case(-5, 10, 0, CoordError::StartBeforeOne(-5))]
    #[case(10, 1001, 0, CoordError::EndPastChrom { end: 1001, length: 1000 })]
    #[case(10, 20, 2, CoordError::InvalidStrand(2))]
    fn test_new_invalid(
        chrom: Chromosome,
        #[case] start: i64,
        #[case] end: i64,
        #[case] strand: i64,
        #[case] expected: CoordError,
    ) {
        assert_eq!(Coord::from_raw(&chrom, start, end, strand), Err(expected));
    }

    #[rstest]
    fn test_error_message_carries_values(chrom: Chromosome) {
        let err = Coord::from_raw(&chrom, 10, 1001, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "end (1001) should not be greater than length of chromosome (1000)"
        );
    }

    #[rstest]
    fn test_touching_coords_overlap(chrom: Chromosome) {
        let a = Coord::new(&chrom, 10, 20, Strand::Forward).unwrap();
        let b = Coord::new(&chrom, 20, 30, Strand::Forward).unwrap();
        let c = Coord::new(&chrom, 20, 30, Strand::Reverse).unwrap();
        let d = Coord::new(&chrom, 21, 30, Strand::Forward).unwrap();

        assert!(a.overlaps(&b, false));
        assert!(a.overlaps(&b, true));
        assert!(a.overlaps(&c, false));
        assert!(!a.overlaps(&c, true));
        assert!(!a.overlaps(&d, false));
    }

    #[rstest]
    fn test_overlaps_requires_same_chrom(chrom: Chromosome, chrom2: Chromosome) {
        let a = Coord::new(&chrom, 10, 20, Strand::Forward).unwrap();
        let b = Coord::new(&chrom2, 10, 20, Strand::Forward).unwrap();
        assert!(!a.overlaps(&b, false));
        assert!(!a.within(&b, false));
    }

    #[rstest]
    fn test_within(chrom: Chromosome) {
        let outer = Coord::new(&chrom, 10, 100, Strand::Forward).unwrap();
        let inner = Coord::new(&chrom, 10, 50, Strand::Reverse).unwrap();

        assert!(inner.within(&outer, false));
        assert!(!inner.within(&outer, true));
        assert!(!outer.within(&inner, false));
        assert!(outer.within(&outer, true));
    }

    #[rstest]
    fn test_key(chrom2: Chromosome) {
        let c = Coord::new(&chrom2, 5, 9, Strand::Reverse).unwrap();
        assert_eq!(
            c.key(false),
            CoordKey {
                chrom: 2,
                strand: 0,
                start: 5
            }
        );
        assert_eq!(
            c.key(true),
            CoordKey {
                chrom: 2,
                strand: -1,
                start: 5
            }
        );
    }

    #[rstest]
    #[case(5, 990, 20, (1, 1000))]
    #[case(100, 200, 10, (90, 210))]
    #[case(10, 20, 0, (10, 20))]
    #[case(10, 20, i64::MAX as u64, (1, 1000))]
    #[case(10, 20, u64::MAX, (1, 1000))]
    fn test_expand_clamps(
        chrom: Chromosome,
        #[case] start: i64,
        #[case] end: i64,
        #[case] n_bp: u64,
        #[case] expected: (i64, i64),
    ) {
        let mut c = Coord::new(&chrom, start, end, Strand::Unknown).unwrap();
        c.expand(n_bp);
        assert_eq!((c.start(), c.end()), expected);
        assert!(1 <= c.start() && c.start() <= c.end() && c.end() <= c.chrom_len());
        assert_eq!(c.length(), expected.1 - expected.0 + 1);
    }

    #[rstest]
    fn test_copy_shares_chrom(chrom: Chromosome) {
        let c = Coord::new(&chrom, 1, 10, Strand::Forward)
            .unwrap()
            .with_score(2.5)
            .with_idnum("r1")
            .with_name("read");
        let copy = c.clone();
        assert_eq!(copy, c);
        assert_eq!(copy.chrom(), chrom.idnum);
        assert_eq!(copy.to_string(), "r1 1:1-10(+)");
    }

    #[rstest]
    #[case("+", Strand::Forward)]
    #[case("forward", Strand::Forward)]
    #[case("-1", Strand::Reverse)]
    #[case("R", Strand::Reverse)]
    #[case(".", Strand::Unknown)]
    #[case("", Strand::Unknown)]
    fn test_parse_strand(#[case] s: &str, #[case] expected: Strand) {
        assert_eq!(parse_strand(s), Ok(expected));
    }

    #[rstest]
    fn test_parse_strand_unknown() {
        assert_eq!(
            parse_strand("x"),
            Err(CoordError::UnknownStrand("x".to_string()))
        );
    }

    #[rstest]
    fn test_coords_from_sites(chrom: Chromosome) {
        let coords = coords_from_sites(&chrom, &[1, 2, 10, 11, 12, 13, 20]).unwrap();
        let spans: Vec<(i64, i64)> = coords.iter().map(|c| (c.start(), c.end())).collect();
        assert_eq!(spans, vec![(1, 2), (10, 13), (20, 20)]);

        assert!(coords_from_sites(&chrom, &[]).unwrap().is_empty());
    }

    #[rstest]
    fn test_group_by_start_end(chrom: Chromosome) {
        let coords = vec![
            Coord::new(&chrom, 1, 10, Strand::Forward).unwrap(),
            Coord::new(&chrom, 1, 20, Strand::Forward).unwrap(),
            Coord::new(&chrom, 5, 20, Strand::Forward).unwrap(),
        ];
        let (by_start, by_end) = group_by_start_end(&coords);
        assert_eq!(by_start[&1].len(), 2);
        assert_eq!(by_start[&5].len(), 1);
        assert_eq!(by_end[&20].len(), 2);
        assert_eq!(by_end[&10][0], &coords[0]);
    }
}
