use num_traits::{NumCast, PrimInt, Signed, ToPrimitive, Zero};
use std::hash::Hash;

use crate::coord::Coord;
use crate::errors::CoordError;

pub trait PositionType: PrimInt + Signed + Hash + Copy + radsort::Key + PartialOrd + ToPrimitive + Zero + std::fmt::Display + std::fmt::Debug {}
impl<T> PositionType for T where T: PrimInt + Signed + Hash + Copy + radsort::Key + PartialOrd + ToPrimitive + Zero + std::fmt::Display + std::fmt::Debug {}
pub trait GroupType: PrimInt + Hash + Copy + radsort::Key + Zero + std::fmt::Debug {}
impl<T> GroupType for T where T: PrimInt + Hash + Copy + radsort::Key + Zero + std::fmt::Debug {}

/// Columnar coordinates: one row per interval across four parallel columns
/// `(chromosome_id, start, end, strand)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenomicData<C: GroupType, P: PositionType> {
    pub chroms: Vec<C>,
    pub starts: Vec<P>,
    pub ends: Vec<P>,
    pub strands: Vec<i8>,
}

/// Borrowed view over columns owned elsewhere (numpy buffers, a
/// [`GenomicData`], ...).
#[derive(Debug, Clone, Copy)]
pub struct GenomicSlices<'a, C: GroupType, P: PositionType> {
    pub chroms: &'a [C],
    pub starts: &'a [P],
    pub ends: &'a [P],
    pub strands: &'a [i8],
}

impl<'a, C: GroupType, P: PositionType> GenomicSlices<'a, C, P> {
    pub fn new(
        chroms: &'a [C],
        starts: &'a [P],
        ends: &'a [P],
        strands: &'a [i8],
    ) -> Result<Self, CoordError> {
        let n = chroms.len();
        if starts.len() != n || ends.len() != n || strands.len() != n {
            return Err(CoordError::ColumnLengthMismatch {
                chroms: n,
                starts: starts.len(),
                ends: ends.len(),
                strands: strands.len(),
            });
        }
        Ok(GenomicSlices {
            chroms,
            starts,
            ends,
            strands,
        })
    }

    pub fn len(&self) -> usize {
        self.chroms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chroms.is_empty()
    }

    pub fn slice(&self, start: usize, end: usize) -> GenomicSlices<'a, C, P> {
        GenomicSlices {
            chroms: &self.chroms[start..end],
            starts: &self.starts[start..end],
            ends: &self.ends[start..end],
            strands: &self.strands[start..end],
        }
    }
}

impl<C: GroupType, P: PositionType> GenomicData<C, P> {
    pub fn new(chroms: Vec<C>, starts: Vec<P>, ends: Vec<P>, strands: Vec<i8>) -> Result<Self, CoordError> {
        GenomicSlices::new(&chroms, &starts, &ends, &strands)?;
        Ok(GenomicData {
            chroms,
            starts,
            ends,
            strands,
        })
    }

    pub fn with_capacity(n: usize) -> Self {
        GenomicData {
            chroms: Vec::with_capacity(n),
            starts: Vec::with_capacity(n),
            ends: Vec::with_capacity(n),
            strands: Vec::with_capacity(n),
        }
    }

    /// Convert coords to columns, failing if an id or position does not fit
    /// the column types.
    pub fn from_coords(coords: &[Coord]) -> Result<Self, CoordError> {
        let mut data = Self::with_capacity(coords.len());
        for coord in coords {
            let chrom = <C as NumCast>::from(coord.chrom().0)
                .ok_or(CoordError::ChromIdOverflow(coord.chrom()))?;
            let start = <P as NumCast>::from(coord.start())
                .ok_or(CoordError::PositionOverflow(coord.start()))?;
            let end = <P as NumCast>::from(coord.end())
                .ok_or(CoordError::PositionOverflow(coord.end()))?;
            data.push(chrom, start, end, coord.strand().as_i8());
        }
        Ok(data)
    }

    pub fn push(&mut self, chrom: C, start: P, end: P, strand: i8) {
        self.chroms.push(chrom);
        self.starts.push(start);
        self.ends.push(end);
        self.strands.push(strand);
    }

    pub fn len(&self) -> usize {
        self.chroms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chroms.is_empty()
    }

    pub fn row(&self, i: usize) -> (C, P, P, i8) {
        (self.chroms[i], self.starts[i], self.ends[i], self.strands[i])
    }

    pub fn as_slices(&self) -> GenomicSlices<'_, C, P> {
        GenomicSlices {
            chroms: &self.chroms,
            starts: &self.starts,
            ends: &self.ends,
            strands: &self.strands,
        }
    }

    /// Gather the rows at `idx`, in that order.
    ///
    /// # Panics
    ///
    /// Panics if an index in `idx` is out of range.
    pub fn take(&self, idx: &[u32]) -> Self {
        let mut out = Self::with_capacity(idx.len());
        for &i in idx {
            let (chrom, start, end, strand) = self.row(i as usize);
            out.push(chrom, start, end, strand);
        }
        out
    }
}
