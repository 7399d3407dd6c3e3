use crate::TileFileSet;
use anyhow::{Context, Result};
use flowcell_core::{PasteReader, RowGroup};

/// Which tile indices [`TileCursor::open_tile`] accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TileBoundary {
	/// Every tile, `index < count`.
	#[default]
	Inclusive,
	/// Historical bounds check, `index < count - 1`: the final tile of a lane is never opened
	/// and a lane with a single tile yields nothing. Only for reproducing old results.
	Legacy,
}

impl TileBoundary {
	pub fn accepts(&self, index: usize, count: usize) -> bool {
		match self {
			TileBoundary::Inclusive => index < count,
			TileBoundary::Legacy => index + 1 < count,
		}
	}
}

/// The currently open tile of a read stream.
///
/// At most one [`PasteReader`] is open at any time; it is released before the next one is opened.
#[derive(Debug, Default)]
pub struct TileCursor {
	index: usize,
	aligner: Option<PasteReader>,
	boundary: TileBoundary,
}

impl TileCursor {
	pub fn new(boundary: TileBoundary) -> TileCursor {
		TileCursor {
			index: 0,
			aligner: None,
			boundary,
		}
	}

	pub fn boundary(&self) -> TileBoundary {
		self.boundary
	}

	/// Index of the most recently opened tile.
	pub fn index(&self) -> usize {
		self.index
	}

	pub fn is_open(&self) -> bool {
		self.aligner.is_some()
	}

	/// Opens the three files of tile `index`.
	///
	/// Returns `false` without touching the current tile if the boundary rejects `index`.
	pub fn open_tile(&mut self, tiles: &TileFileSet, index: usize) -> Result<bool> {
		if !self.boundary.accepts(index, tiles.len()) {
			log::trace!("tile index {index} rejected, lane has {} tiles", tiles.len());
			return Ok(false);
		}
		let Some(paths) = tiles.tile(index) else {
			return Ok(false);
		};

		self.release();
		log::debug!("open tile {} (index {index})", paths.tile);
		let aligner = PasteReader::open(paths.intensity, paths.sequence, paths.quality)
			.with_context(|| format!("opening tile {}", paths.tile))?;

		self.index = index;
		self.aligner = Some(aligner);
		Ok(true)
	}

	/// Opens the tile after the current one.
	pub fn advance(&mut self, tiles: &TileFileSet) -> Result<bool> {
		self.open_tile(tiles, self.index + 1)
	}

	/// Whether the open tile has another row group.
	pub fn has_rows(&mut self) -> Result<bool> {
		match &mut self.aligner {
			Some(aligner) => aligner.has_next(),
			None => Ok(false),
		}
	}

	pub fn next_group(&mut self) -> Result<Option<RowGroup>> {
		match &mut self.aligner {
			Some(aligner) => aligner.next_group(),
			None => Ok(None),
		}
	}

	/// Closes the open tile, if any.
	pub fn release(&mut self) {
		if self.aligner.take().is_some() {
			log::trace!("release tile index {}", self.index);
		}
	}
}
