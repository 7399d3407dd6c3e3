use anyhow::{Context, Result};
use flowcell_core::CycleWindow;
use flowcell_lane::{LaneDescriptor, LaneReader, TileBoundary};
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::{Path, PathBuf},
};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LaneConfig {
	/// Directory of the `*_seq.txt` and `*_prb.txt` files
	pub sequence_dir: PathBuf,

	/// Directory of the `*_int.txt` files, defaults to the parent of `sequence_dir`
	#[serde(default)]
	pub intensity_dir: Option<PathBuf>,

	/// Lane number
	pub lane: u32,

	/// Zero-based, inclusive cycle window
	pub cycles: CycleConfig,

	/// Never open the last tile of the lane, as old pipelines did
	#[serde(default)]
	pub legacy_tile_boundary: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CycleConfig {
	pub first: usize,
	pub last: usize,
}

impl LaneConfig {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	/// Parses a config file. Relative directories are resolved against the directory of the file.
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config {path:?}"))?;
		let mut config =
			LaneConfig::from_reader(BufReader::new(file)).with_context(|| format!("parsing config {path:?}"))?;
		config.resolve_paths(path.parent().unwrap_or(Path::new(".")));
		Ok(config)
	}

	pub fn resolve_paths(&mut self, base: &Path) {
		if self.sequence_dir.is_relative() {
			self.sequence_dir = base.join(&self.sequence_dir);
		}
		if let Some(dir) = &mut self.intensity_dir
			&& dir.is_relative()
		{
			*dir = base.join(&*dir);
		}
	}

	pub fn boundary(&self) -> TileBoundary {
		if self.legacy_tile_boundary {
			TileBoundary::Legacy
		} else {
			TileBoundary::Inclusive
		}
	}

	pub fn descriptor(&self) -> Result<LaneDescriptor> {
		let cycles = CycleWindow::new(self.cycles.first, self.cycles.last)?;
		Ok(match &self.intensity_dir {
			Some(intensity_dir) => LaneDescriptor::new(&self.sequence_dir, intensity_dir, self.lane, cycles),
			None => LaneDescriptor::from_sequence_dir(&self.sequence_dir, self.lane, cycles)?,
		})
	}

	pub fn open_reader(&self) -> Result<LaneReader> {
		LaneReader::from_descriptor(self.descriptor()?)?.with_boundary(self.boundary())
	}
}
