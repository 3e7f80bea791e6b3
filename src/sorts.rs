use radsort::sort_by_key;

use crate::coord::Coord;
use crate::genocoord_structs::{GenomicData, GenomicSlices, GroupType, PositionType};

/// Stable in-place sort into canonical order: by chromosome, then strand
/// (only when `use_strand`), then start.
///
/// Every overlap join expects its inputs sorted this way.
pub fn sort_coords<T: AsRef<Coord>>(coords: &mut [T], use_strand: bool) {
    // radsort is stable, so sorting by the least significant key first
    // leaves the slice ordered by the full key.
    sort_by_key(coords, |c| c.as_ref().start());
    if use_strand {
        sort_by_key(coords, |c| c.as_ref().strand().as_i8());
    }
    sort_by_key(coords, |c| c.as_ref().chrom().0);
}

pub fn is_sorted_coords<T: AsRef<Coord>>(coords: &[T], use_strand: bool) -> bool {
    coords
        .windows(2)
        .all(|w| w[0].as_ref().key(use_strand) <= w[1].as_ref().key(use_strand))
}

/// Row order that sorts the columns canonically, ties kept in input order.
pub fn sort_order_idx<C: GroupType, T: PositionType>(
    data: &GenomicSlices<'_, C, T>,
    use_strand: bool,
) -> Vec<u32> {
    let mut idx: Vec<u32> = (0..data.len() as u32).collect();

    sort_by_key(&mut idx, |&i| data.starts[i as usize]);
    if use_strand {
        sort_by_key(&mut idx, |&i| data.strands[i as usize]);
    }
    sort_by_key(&mut idx, |&i| data.chroms[i as usize]);

    idx
}

pub fn is_sorted_columns<C: GroupType, T: PositionType>(
    data: &GenomicSlices<'_, C, T>,
    use_strand: bool,
) -> bool {
    let key = |i: usize| {
        let strand = if use_strand { data.strands[i] } else { 0 };
        (data.chroms[i], strand, data.starts[i])
    };
    (1..data.len()).all(|i| key(i - 1) <= key(i))
}

impl<C: GroupType, P: PositionType> GenomicData<C, P> {
    /// Copy of the rows in canonical order.
    pub fn sorted(&self, use_strand: bool) -> Self {
        let order = sort_order_idx(&self.as_slices(), use_strand);
        self.take(&order)
    }
}
