use std::cmp::Ordering;

use log::debug;

use crate::coord::Coord;
use crate::genocoord_structs::{GenomicData, GenomicSlices, GroupType, PositionType};

/// Row access to a collection of intervals, whatever its memory layout.
///
/// The merge join below is written once against this trait and used for
/// both coord slices and columnar data.
pub trait IntervalSource {
    type Chrom: Ord + Copy;
    type Pos: Ord + Copy;

    fn len(&self) -> usize;
    fn chrom(&self, i: usize) -> Self::Chrom;
    fn start(&self, i: usize) -> Self::Pos;
    fn end(&self, i: usize) -> Self::Pos;
    fn strand(&self, i: usize) -> i8;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: AsRef<Coord>> IntervalSource for [T] {
    type Chrom = u32;
    type Pos = i64;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn chrom(&self, i: usize) -> u32 {
        self[i].as_ref().chrom().0
    }

    #[inline]
    fn start(&self, i: usize) -> i64 {
        self[i].as_ref().start()
    }

    #[inline]
    fn end(&self, i: usize) -> i64 {
        self[i].as_ref().end()
    }

    #[inline]
    fn strand(&self, i: usize) -> i8 {
        self[i].as_ref().strand().as_i8()
    }
}

impl<C: GroupType, P: PositionType> IntervalSource for GenomicSlices<'_, C, P> {
    type Chrom = C;
    type Pos = P;

    #[inline]
    fn len(&self) -> usize {
        self.chroms.len()
    }

    #[inline]
    fn chrom(&self, i: usize) -> C {
        self.chroms[i]
    }

    #[inline]
    fn start(&self, i: usize) -> P {
        self.starts[i]
    }

    #[inline]
    fn end(&self, i: usize) -> P {
        self.ends[i]
    }

    #[inline]
    fn strand(&self, i: usize) -> i8 {
        self.strands[i]
    }
}

#[inline]
fn rows_overlap<A, B>(a: &A, i: usize, b: &B, j: usize, use_strand: bool) -> bool
where
    A: IntervalSource + ?Sized,
    B: IntervalSource<Chrom = A::Chrom, Pos = A::Pos> + ?Sized,
{
    a.chrom(i) == b.chrom(j)
        && (!use_strand || a.strand(i) == b.strand(j))
        && a.start(i) <= b.end(j)
        && a.end(i) >= b.start(j)
}

/// Compare the canonical keys `(chrom[, strand], start)` of two rows.
#[inline]
fn key_cmp<A, B>(a: &A, i: usize, b: &B, j: usize, use_strand: bool) -> Ordering
where
    A: IntervalSource + ?Sized,
    B: IntervalSource<Chrom = A::Chrom, Pos = A::Pos> + ?Sized,
{
    let by_strand = if use_strand {
        a.strand(i).cmp(&b.strand(j))
    } else {
        Ordering::Equal
    };
    a.chrom(i)
        .cmp(&b.chrom(j))
        .then(by_strand)
        .then(a.start(i).cmp(&b.start(j)))
}

pub fn is_sorted_source<S: IntervalSource + ?Sized>(src: &S, use_strand: bool) -> bool {
    (1..src.len()).all(|i| key_cmp(src, i - 1, src, i, use_strand) != Ordering::Greater)
}

/// Linear merge join of two sorted interval collections.
///
/// Returns, for every row of `a`, the indices of the rows of `b` that
/// overlap it, in `b`'s order. Both inputs must be sorted by
/// `(chrom[, strand], start)` with the same `use_strand`; sorting them is the
/// caller's job (see [`crate::sorts`]).
pub fn sweep_overlaps<A, B>(a: &A, b: &B, use_strand: bool) -> Vec<Vec<u32>>
where
    A: IntervalSource + ?Sized,
    B: IntervalSource<Chrom = A::Chrom, Pos = A::Pos> + ?Sized,
{
    debug_assert!(is_sorted_source(a, use_strand), "first input is not sorted");
    debug_assert!(is_sorted_source(b, use_strand), "second input is not sorted");

    let n = a.len();
    let m = b.len();
    let mut overlaps = vec![Vec::new(); n];

    let mut i = 0;
    let mut j = 0;

    while i < n && j < m {
        // Skip rows of a that end before b[j] starts. Nothing at or after
        // b[j] can reach them.
        while i < n
            && !rows_overlap(a, i, b, j, use_strand)
            && key_cmp(a, i, b, j, use_strand) == Ordering::Less
        {
            i += 1;
        }

        // Rows of b that end before a[i] starts are exhausted for good,
        // since later rows of a start even further right.
        while i < n
            && j < m
            && !rows_overlap(a, i, b, j, use_strand)
            && key_cmp(a, i, b, j, use_strand) == Ordering::Greater
        {
            j += 1;
        }

        // The same b row can overlap several consecutive a rows, so scan
        // ahead without moving j.
        let mut j2 = j;
        while j2 < m
            && i < n
            && (key_cmp(a, i, b, j2, use_strand) == Ordering::Greater
                || rows_overlap(a, i, b, j2, use_strand))
        {
            if rows_overlap(a, i, b, j2, use_strand) {
                overlaps[i].push(j2 as u32);
            }
            j2 += 1;
        }

        i += 1;
    }

    debug!(
        "overlap join of {} x {} rows (use_strand={}) found {} overlaps",
        n,
        m,
        use_strand,
        overlaps.iter().map(Vec::len).sum::<usize>()
    );

    overlaps
}

/// For every coord of `coords1`, the coords of `coords2` overlapping it.
///
/// With `use_strand` only coords on the same strand overlap, and both lists
/// must have been sorted with strand.
pub fn get_overlaps<'b, T, U>(coords1: &[T], coords2: &'b [U], use_strand: bool) -> Vec<Vec<&'b U>>
where
    T: AsRef<Coord>,
    U: AsRef<Coord>,
{
    sweep_overlaps(coords1, coords2, use_strand)
        .into_iter()
        .map(|hits| hits.into_iter().map(|j| &coords2[j as usize]).collect())
        .collect()
}

/// All coords of the sorted `coord_list` that overlap `coord`.
pub fn get_coord_overlaps<'b, U: AsRef<Coord>>(
    coord: &Coord,
    coord_list: &'b [U],
    use_strand: bool,
) -> Vec<&'b U> {
    get_overlaps(std::slice::from_ref(coord), coord_list, use_strand)
        .pop()
        .unwrap_or_default()
}

/// Columnar counterpart of [`get_overlaps`]: for every row of `coords1`, the
/// overlapping rows of `coords2` copied into their own columns.
pub fn get_np_overlaps<C: GroupType, P: PositionType>(
    coords1: &GenomicSlices<'_, C, P>,
    coords2: &GenomicSlices<'_, C, P>,
    use_strand: bool,
) -> Vec<GenomicData<C, P>> {
    sweep_overlaps(coords1, coords2, use_strand)
        .into_iter()
        .map(|hits| {
            let mut rows = GenomicData::with_capacity(hits.len());
            for j in hits {
                let j = j as usize;
                rows.push(
                    coords2.chroms[j],
                    coords2.starts[j],
                    coords2.ends[j],
                    coords2.strands[j],
                );
            }
            rows
        })
        .collect()
}

/// The join as two parallel index arrays `(idx1, idx2)`, ordered by `idx1`
/// and then by `idx2`.
pub fn overlap_pairs<A, B>(a: &A, b: &B, use_strand: bool) -> (Vec<u32>, Vec<u32>)
where
    A: IntervalSource + ?Sized,
    B: IntervalSource<Chrom = A::Chrom, Pos = A::Pos> + ?Sized,
{
    sweep_overlaps(a, b, use_strand)
        .into_iter()
        .enumerate()
        .flat_map(|(idx, hits)| hits.into_iter().map(move |idx2| (idx as u32, idx2)))
        .unzip()
}
