//! Genomic coordinates and interval algebra.
//!
//! Coordinates are 1-based and inclusive on both ends. Intervals live either
//! as [`Coord`] objects referring to a [`Chromosome`] of a
//! [`ChromosomeRegistry`], or as parallel columns in [`GenomicData`]. The
//! overlap join runs the same linear sweep over both layouts.

pub mod chrom;
pub mod coord;
pub mod coord_group;
pub mod errors;
pub mod genocoord_structs;
pub mod overlaps;
pub mod partition;
pub mod segments;
pub mod sorts;

#[cfg(feature = "python")]
mod bindings {
    pub mod numpy_bindings {
        pub mod overlaps_numpy;
        pub mod segments_numpy;
        pub mod sorts_numpy;
    }
}
#[cfg(feature = "python")]
mod numpy_bindings;

pub use chrom::{ChromFilter, ChromFlags, ChromId, Chromosome, ChromosomeRegistry};
pub use coord::{coords_from_sites, group_by_start_end, parse_strand, Coord, CoordKey, Strand};
pub use coord_group::{group_overlapping, CoordGroup, ForcedAdd, SplitReport};
pub use errors::CoordError;
pub use genocoord_structs::{GenomicData, GenomicSlices, GroupType, PositionType};
pub use overlaps::{get_coord_overlaps, get_np_overlaps, get_overlaps, overlap_pairs, sweep_overlaps, IntervalSource};
pub use segments::{find_segments, segment_score, SegmentScore};
pub use sorts::{is_sorted_coords, sort_coords};
