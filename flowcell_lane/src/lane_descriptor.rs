use crate::LaneError;
use anyhow::{Result, bail};
use flowcell_core::{CycleWindow, TileKind};
use std::{
	io,
	path::{Path, PathBuf},
};

/// Where the files of a lane live and which cycles to keep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaneDescriptor {
	lane: u32,
	cycles: CycleWindow,
	intensity_dir: PathBuf,
	sequence_dir: PathBuf,
}

impl LaneDescriptor {
	pub fn new(sequence_dir: &Path, intensity_dir: &Path, lane: u32, cycles: CycleWindow) -> LaneDescriptor {
		LaneDescriptor {
			lane,
			cycles,
			intensity_dir: intensity_dir.to_path_buf(),
			sequence_dir: sequence_dir.to_path_buf(),
		}
	}

	/// Uses the parent of `sequence_dir` as intensity directory, the usual layout of base calls
	/// stored below the image analysis output.
	pub fn from_sequence_dir(sequence_dir: &Path, lane: u32, cycles: CycleWindow) -> Result<LaneDescriptor> {
		let intensity_dir = match sequence_dir.parent() {
			Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
			Some(parent) => parent,
			None => bail!(LaneError::DirectoryUnreadable {
				path: sequence_dir.to_path_buf(),
				source: io::Error::new(io::ErrorKind::NotFound, "directory has no parent"),
			}),
		};
		Ok(LaneDescriptor::new(sequence_dir, intensity_dir, lane, cycles))
	}

	pub fn lane(&self) -> u32 {
		self.lane
	}

	pub fn cycles(&self) -> CycleWindow {
		self.cycles
	}

	pub fn intensity_dir(&self) -> &Path {
		&self.intensity_dir
	}

	pub fn sequence_dir(&self) -> &Path {
		&self.sequence_dir
	}

	/// The directory holding files of `kind`.
	pub fn dir_for(&self, kind: TileKind) -> &Path {
		if kind.is_intensity() {
			&self.intensity_dir
		} else {
			&self.sequence_dir
		}
	}
}
