//! Lane configuration files.
//!
//! A [`LaneConfig`] names the directories and the cycle window of one lane and is usually
//! deserialized from a YAML file:
//!
//! ```yaml
//! sequence_dir: Bustard
//! intensity_dir: .
//! lane: 1
//! cycles: { first: 0, last: 35 }
//! legacy_tile_boundary: false
//! ```

mod lane;

pub use lane::{CycleConfig, LaneConfig};
