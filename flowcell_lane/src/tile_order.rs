use crate::{
	LaneError,
	classifier::{parse_tile_number, tile_regex},
};
use anyhow::{Result, bail};
use regex::Regex;
use std::{
	cmp::Ordering,
	path::{Path, PathBuf},
};

/// Orders tile files of one lane by the tile number embedded in their names.
#[derive(Clone, Debug)]
pub struct TileOrder {
	tile: Regex,
}

impl TileOrder {
	pub fn new(lane: u32) -> Result<TileOrder> {
		Ok(TileOrder {
			tile: tile_regex(lane)?,
		})
	}

	pub fn pattern(&self) -> &str {
		self.tile.as_str()
	}

	pub fn tile_number(&self, path: &Path) -> Option<u32> {
		parse_tile_number(&self.tile, &file_name(path))
	}

	/// Compares two files by tile number.
	///
	/// Fails with [`LaneError::UnparseableTileName`] if either name has no parseable tile number.
	pub fn compare(&self, a: &Path, b: &Path) -> Result<Ordering, LaneError> {
		match (self.tile_number(a), self.tile_number(b)) {
			(Some(tile_a), Some(tile_b)) => Ok(tile_a.cmp(&tile_b)),
			_ => Err(self.unparseable(a, b)),
		}
	}

	/// Sorts `files` by tile number.
	///
	/// Every name is parsed before sorting; the first one without a tile number fails the sort
	/// and leaves `files` untouched.
	pub fn sort(&self, files: &mut [PathBuf]) -> Result<()> {
		if let Some(index) = files.iter().position(|file| self.tile_number(file).is_none()) {
			let neighbour = index.checked_sub(1).or((index + 1 < files.len()).then_some(index + 1));
			let other = &files[neighbour.unwrap_or(index)];
			bail!(self.unparseable(other, &files[index]));
		}

		files.sort_by_cached_key(|file| self.tile_number(file));
		Ok(())
	}

	fn unparseable(&self, a: &Path, b: &Path) -> LaneError {
		LaneError::UnparseableTileName {
			first: file_name(a),
			second: file_name(b),
			pattern: self.pattern().to_owned(),
		}
	}
}

fn file_name(path: &Path) -> String {
	path
		.file_name()
		.map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy())
		.into_owned()
}
