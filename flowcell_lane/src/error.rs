use flowcell_core::TileKind;
use std::{fmt, io, path::PathBuf};

/// Failures raised by lane discovery and by misuse of the read stream.
///
/// Functions in this crate return [`anyhow::Result`]; a `LaneError` can be recovered with
/// [`lane_error`] or `anyhow::Error::downcast_ref`.
#[derive(Debug)]
pub enum LaneError {
	/// The directory could not be listed.
	DirectoryUnreadable { path: PathBuf, source: io::Error },
	/// The three kinds have different numbers of tile files.
	TileSetCardinalityMismatch {
		intensity: usize,
		sequence: usize,
		quality: usize,
	},
	/// A filename does not carry a tile number that can be parsed.
	UnparseableTileName {
		first: String,
		second: String,
		pattern: String,
	},
	/// Two files of the same kind carry the same tile number.
	DuplicateTileNumber { kind: TileKind, tile: u32 },
	/// The read stream was entered more than once.
	IllegalReentry,
	/// The read stream was used before being entered.
	StreamNotEntered,
	/// The read stream is forward-only and read-only.
	UnsupportedOperation(&'static str),
}

impl fmt::Display for LaneError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use LaneError::*;
		match self {
			DirectoryUnreadable { path, source } => write!(f, "cannot list directory {path:?}: {source}"),
			TileSetCardinalityMismatch {
				intensity,
				sequence,
				quality,
			} => write!(
				f,
				"file list lengths are unequal (int:{intensity}, seq:{sequence}, prb:{quality})"
			),
			UnparseableTileName { first, second, pattern } => write!(
				f,
				"tile filenames ('{first}' or '{second}') did not match against pattern ('{pattern}')"
			),
			DuplicateTileNumber { kind, tile } => write!(f, "found more than one {kind} file for tile {tile}"),
			IllegalReentry => f.write_str("the read stream can only be entered once"),
			StreamNotEntered => f.write_str("the read stream must be entered before reading"),
			UnsupportedOperation(operation) => write!(f, "{operation} is not supported by the read stream"),
		}
	}
}

impl std::error::Error for LaneError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			LaneError::DirectoryUnreadable { source, .. } => Some(source),
			_ => None,
		}
	}
}

/// Finds the first [`LaneError`] in the chain of `err`.
pub fn lane_error(err: &anyhow::Error) -> Option<&LaneError> {
	err.chain().find_map(|cause| cause.downcast_ref::<LaneError>())
}
