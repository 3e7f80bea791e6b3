use thiserror::Error;

use crate::chrom::ChromId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordError {
    #[error("start ({start}) should be less than or equal to end ({end})")]
    StartAfterEnd { start: i64, end: i64 },

    #[error("start ({0}) should not be less than 1")]
    StartBeforeOne(i64),

    #[error("end ({end}) should not be greater than length of chromosome ({length})")]
    EndPastChrom { end: i64, length: i64 },

    #[error("strand should be one of (-1, 0, 1), got {0}")]
    InvalidStrand(i64),

    #[error("unknown strand: '{0}'")]
    UnknownStrand(String),

    #[error("coord {coord_start}-{coord_end} does not overlap coordinate group {group_start}-{group_end}")]
    NoOverlap {
        coord_start: i64,
        coord_end: i64,
        group_start: i64,
        group_end: i64,
    },

    #[error("coord strand ({coord}) is not the same as coordinate group strand ({group})")]
    StrandMismatch { coord: i8, group: i8 },

    #[error("coord chromosome ({coord}) is not the same as coordinate group chromosome ({group})")]
    ChromMismatch { coord: ChromId, group: ChromId },

    #[error("max coords per group must be at least 1, got {0}")]
    InvalidGroupSize(usize),

    #[error("unknown chromosome: '{0}'")]
    UnknownChromosome(String),

    #[error("chromosome '{0}' is already registered")]
    DuplicateChromosome(String),

    #[error("length of chromosome '{name}' should be positive, got {length}")]
    InvalidChromLength { name: String, length: i64 },

    #[error("chromosome id {0} does not fit in the column type")]
    ChromIdOverflow(ChromId),

    #[error("position {0} does not fit in the column type")]
    PositionOverflow(i64),

    #[error("column lengths differ: chroms={chroms}, starts={starts}, ends={ends}, strands={strands}")]
    ColumnLengthMismatch {
        chroms: usize,
        starts: usize,
        ends: usize,
        strands: usize,
    },
}
