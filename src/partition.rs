use std::cmp::Ordering;
use std::fmt;

use crate::genocoord_structs::{GenomicSlices, GroupType, PositionType};
use crate::overlaps::sweep_overlaps;

/// Contiguous rows `[start, end)` of sorted columnar data sharing one
/// chromosome (and strand, when strand is used).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromBlock<C: GroupType> {
    pub chr: C,
    pub strand: i8,
    pub start: usize,
    pub end: usize,
}

/// Holds combined boundaries for a single chromosome across two inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChrBound<C: GroupType> {
    pub chr: C,
    pub strand: i8,
    pub start1: usize,
    pub end1: usize,
    pub start2: usize,
    pub end2: usize,
}

impl<C: GroupType> fmt::Display for ChrBound<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChrBound {{ chr: {:?}, strand: {}, start1: {}, end1: {}, start2: {}, end2: {}, len1: {}, len2: {}, }}",
            self.chr, self.strand, self.start1, self.end1, self.start2, self.end2, self.end1 - self.start1, self.end2 - self.start2)
    }
}

/// Returns one block per run of equal `(chr[, strand])` in sorted data.
pub fn chrom_blocks<C: GroupType, T: PositionType>(
    data: &GenomicSlices<'_, C, T>,
    use_strand: bool,
) -> Vec<ChromBlock<C>> {
    let mut blocks = Vec::new();
    if data.is_empty() {
        return blocks;
    }

    let strand_of = |i: usize| if use_strand { data.strands[i] } else { 0 };

    let mut current_start = 0usize;
    for i in 1..data.len() {
        // Mark where the chromosome (or strand) changes
        if data.chroms[i] != data.chroms[i - 1] || strand_of(i) != strand_of(i - 1) {
            blocks.push(ChromBlock {
                chr: data.chroms[current_start],
                strand: strand_of(current_start),
                start: current_start,
                end: i,
            });
            current_start = i;
        }
    }

    blocks.push(ChromBlock {
        chr: data.chroms[current_start],
        strand: strand_of(current_start),
        start: current_start,
        end: data.len(),
    });

    blocks
}

/// Pair up the blocks of two sorted inputs. Keys present in only one input
/// cannot produce overlaps and are left out.
pub fn paired_blocks<C: GroupType, T: PositionType>(
    data1: &GenomicSlices<'_, C, T>,
    data2: &GenomicSlices<'_, C, T>,
    use_strand: bool,
) -> Vec<ChrBound<C>> {
    let blocks1 = chrom_blocks(data1, use_strand);
    let blocks2 = chrom_blocks(data2, use_strand);

    let mut bounds = Vec::new();
    let mut i = 0;
    let mut j = 0;
    while i < blocks1.len() && j < blocks2.len() {
        let b1 = &blocks1[i];
        let b2 = &blocks2[j];
        match (b1.chr, b1.strand).cmp(&(b2.chr, b2.strand)) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                bounds.push(ChrBound {
                    chr: b1.chr,
                    strand: b1.strand,
                    start1: b1.start,
                    end1: b1.end,
                    start2: b2.start,
                    end2: b2.end,
                });
                i += 1;
                j += 1;
            }
        }
    }

    bounds
}

/// Join one pair of blocks. The returned lists line up with rows
/// `start1..end1` of `data1` and hold absolute row indices of `data2`.
///
/// # Panics
///
/// Panics if `bound` does not fit inside `data1` and `data2`, e.g. when it
/// came from [`paired_blocks`] over other inputs.
pub fn block_overlaps<C: GroupType, T: PositionType>(
    data1: &GenomicSlices<'_, C, T>,
    data2: &GenomicSlices<'_, C, T>,
    bound: &ChrBound<C>,
    use_strand: bool,
) -> Vec<Vec<u32>> {
    let part1 = data1.slice(bound.start1, bound.end1);
    let part2 = data2.slice(bound.start2, bound.end2);

    let offset = bound.start2 as u32;
    let mut overlaps = sweep_overlaps(&part1, &part2, use_strand);
    for hits in overlaps.iter_mut() {
        for idx2 in hits.iter_mut() {
            *idx2 += offset;
        }
    }
    overlaps
}

/// The same result as [`sweep_overlaps`], computed one chromosome block at a
/// time. Each block only reads its own rows, so callers can farm the
/// [`block_overlaps`] calls out to threads.
pub fn partitioned_overlaps<C: GroupType, T: PositionType>(
    data1: &GenomicSlices<'_, C, T>,
    data2: &GenomicSlices<'_, C, T>,
    use_strand: bool,
) -> Vec<Vec<u32>> {
    let mut overlaps = vec![Vec::new(); data1.len()];
    for bound in paired_blocks(data1, data2, use_strand) {
        let block = block_overlaps(data1, data2, &bound, use_strand);
        for (offset, hits) in block.into_iter().enumerate() {
            overlaps[bound.start1 + offset] = hits;
        }
    }
    overlaps
}
