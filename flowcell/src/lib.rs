//! # flowcell
//!
//! Reads the per-tile intensity, sequence and quality files of a sequencing lane as a single
//! stream of aligned reads.
//!
//! ## Usage Example
//!
//! ```no_run
//! use flowcell::lane::LaneReader;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut reader = LaneReader::open(Path::new("run/Firecrest/Bustard"), 1, 0, 35)?;
//!     for read in reader.reads()? {
//!         println!("{}", read?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;

pub use flowcell_core as core;
pub use flowcell_lane as lane;
