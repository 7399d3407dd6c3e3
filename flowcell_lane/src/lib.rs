//! Discovers the per-tile files of a sequencing lane and streams its aligned reads.
//!
//! A lane is split into tiles; every tile is stored as three text files (intensities, base calls
//! and qualities) named `s_<lane>_<tile>_{int,seq,prb}.txt[.gz]`. [`TileFileSet`] finds and
//! validates them, [`LaneReader`] walks them tile by tile.

mod classifier;
mod cursor;
mod error;
mod lane_descriptor;
mod reader;
mod tile_order;
mod tile_set;

#[cfg(any(test, feature = "test"))]
pub mod testing;

pub use classifier::{TileName, TilePattern, classify};
pub use cursor::{TileBoundary, TileCursor};
pub use error::{LaneError, lane_error};
pub use lane_descriptor::LaneDescriptor;
pub use reader::{LaneReader, Reads};
pub use tile_order::TileOrder;
pub use tile_set::{TileFileSet, TilePaths};
