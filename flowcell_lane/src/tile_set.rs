use crate::{LaneDescriptor, LaneError, TileOrder, classify};
use anyhow::{Result, bail, ensure};
use flowcell_core::TileKind;
use itertools::Itertools;
use std::path::{Path, PathBuf};

/// The tile files of a lane, one entry per tile and kind, ordered by tile number.
///
/// The i-th entries of the three kinds belong to the same tile. The set is validated once by
/// [`TileFileSet::discover`] and never changes afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileFileSet {
	intensity: Vec<PathBuf>,
	sequence: Vec<PathBuf>,
	quality: Vec<PathBuf>,
	tiles: Vec<u32>,
}

/// The three files of one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilePaths<'a> {
	pub tile: u32,
	pub intensity: &'a Path,
	pub sequence: &'a Path,
	pub quality: &'a Path,
}

impl TileFileSet {
	/// Scans the directories of `descriptor` and validates the result.
	///
	/// Fails if a directory cannot be listed, if the kinds have different numbers of files, if a
	/// name has no parseable tile number or if a tile number occurs twice within a kind.
	pub fn discover(descriptor: &LaneDescriptor) -> Result<TileFileSet> {
		let lane = descriptor.lane();
		let order = TileOrder::new(lane)?;

		let mut set = TileFileSet::default();
		for kind in TileKind::all() {
			set
				.files_mut(kind)
				.extend(classify(descriptor.dir_for(kind), lane, kind)?);
		}

		let (intensity, sequence, quality) = (set.intensity.len(), set.sequence.len(), set.quality.len());
		ensure!(
			intensity == sequence && sequence == quality,
			LaneError::TileSetCardinalityMismatch {
				intensity,
				sequence,
				quality,
			}
		);

		for kind in TileKind::all() {
			let files = set.files_mut(kind);
			order.sort(files)?;

			let tiles = files
				.iter()
				.filter_map(|file| order.tile_number(file))
				.collect::<Vec<u32>>();
			if let Some((&tile, _)) = tiles.iter().tuple_windows().find(|(a, b)| a == b) {
				bail!(LaneError::DuplicateTileNumber { kind, tile });
			}
			if kind.is_intensity() {
				set.tiles = tiles;
			}
		}

		log::info!(
			"lane {lane}: {} tiles in {:?} and {:?}",
			set.len(),
			descriptor.intensity_dir(),
			descriptor.sequence_dir()
		);
		Ok(set)
	}

	/// Number of tiles.
	pub fn len(&self) -> usize {
		self.intensity.len()
	}

	pub fn is_empty(&self) -> bool {
		self.intensity.is_empty()
	}

	/// Files of one kind, in tile order.
	pub fn files(&self, kind: TileKind) -> &[PathBuf] {
		match kind {
			TileKind::Intensity => &self.intensity,
			TileKind::Sequence => &self.sequence,
			TileKind::Quality => &self.quality,
		}
	}

	fn files_mut(&mut self, kind: TileKind) -> &mut Vec<PathBuf> {
		match kind {
			TileKind::Intensity => &mut self.intensity,
			TileKind::Sequence => &mut self.sequence,
			TileKind::Quality => &mut self.quality,
		}
	}

	/// Tile numbers in ascending order.
	pub fn tile_numbers(&self) -> &[u32] {
		&self.tiles
	}

	pub fn tile(&self, index: usize) -> Option<TilePaths<'_>> {
		Some(TilePaths {
			tile: *self.tiles.get(index)?,
			intensity: self.intensity.get(index)?,
			sequence: self.sequence.get(index)?,
			quality: self.quality.get(index)?,
		})
	}

	pub fn iter(&self) -> impl Iterator<Item = TilePaths<'_>> {
		(0..self.len()).filter_map(|index| self.tile(index))
	}
}
