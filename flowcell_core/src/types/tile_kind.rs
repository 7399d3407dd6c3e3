//! This module defines the `TileKind` enum: the three per-tile file categories written by the
//! image analysis (`_int`) and base calling (`_seq`, `_prb`) steps.
//!
//! # Examples
//!
//! ```
//! use flowcell_core::types::TileKind;
//!
//! assert_eq!(TileKind::Intensity.suffix(), "int");
//! assert_eq!(TileKind::Quality.suffix(), "prb");
//! assert_eq!(TileKind::parse_str("seq").unwrap(), TileKind::Sequence);
//! ```

use anyhow::{Result, bail};
use enumset::{EnumSet, EnumSetType};
use std::fmt::Display;

/// One of the three per-tile file categories.
#[derive(Debug, EnumSetType, PartialOrd, Ord, Hash)]
pub enum TileKind {
	/// Raw cluster intensities, four channels per cycle (`s_<lane>_<tile>_int.txt`).
	Intensity,
	/// Base calls, one sequence per cluster (`s_<lane>_<tile>_seq.txt`).
	Sequence,
	/// Base-call probabilities, four values per cycle (`s_<lane>_<tile>_prb.txt`).
	Quality,
}

impl TileKind {
	/// All kinds, in the order the paste reader combines them.
	pub fn all() -> EnumSet<TileKind> {
		EnumSet::all()
	}

	/// The tag embedded in the filename before `.txt`.
	pub fn suffix(&self) -> &'static str {
		match self {
			TileKind::Intensity => "int",
			TileKind::Sequence => "seq",
			TileKind::Quality => "prb",
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			TileKind::Intensity => "intensity",
			TileKind::Sequence => "sequence",
			TileKind::Quality => "quality",
		}
	}

	/// Whether files of this kind live next to the image analysis output rather than the base calls.
	pub fn is_intensity(&self) -> bool {
		matches!(self, TileKind::Intensity)
	}

	pub fn parse_str(value: &str) -> Result<Self> {
		Ok(match value.to_lowercase().trim() {
			"int" | "intensity" => TileKind::Intensity,
			"seq" | "sequence" => TileKind::Sequence,
			"prb" | "quality" => TileKind::Quality,
			_ => bail!("Unknown tile kind. Expected int, seq or prb"),
		})
	}
}

impl Display for TileKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
