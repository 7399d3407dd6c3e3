//! The read stream of a lane.
//!
//! A [`LaneReader`] discovers and validates the tile files of a lane when it is constructed and
//! then yields one [`AlignedRead`] per cluster, tile after tile in ascending tile order:
//!
//! ```text
//! <intensity_dir>/s_<lane>_<tile>_int.txt[.gz]
//! <sequence_dir>/s_<lane>_<tile>_seq.txt[.gz]
//! <sequence_dir>/s_<lane>_<tile>_prb.txt[.gz]
//! ```
//!
//! The stream moves through `NotEntered -> Entered -> Closed` and can be entered exactly once.
//!
//! ## Usage
//! ```no_run
//! use flowcell_lane::LaneReader;
//! use std::path::Path;
//!
//! let mut reader = LaneReader::open(Path::new("/run/Firecrest/Bustard"), 1, 0, 35).unwrap();
//! println!("{} tiles", reader.num_tiles());
//! for read in reader.reads().unwrap() {
//!     println!("{}", read.unwrap());
//! }
//! ```

use crate::{LaneDescriptor, LaneError, TileBoundary, TileCursor, TileFileSet};
use anyhow::{Context, Result, bail};
use flowcell_core::{AlignedRead, CycleWindow};
use std::{fmt::Debug, path::Path};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
	NotEntered,
	Entered,
	Closed,
}

/// Forward-only stream of the aligned reads of one lane.
pub struct LaneReader {
	descriptor: LaneDescriptor,
	tiles: TileFileSet,
	cursor: TileCursor,
	state: StreamState,
}

impl LaneReader {
	/// Opens lane `lane` of a base calling directory; intensity files are read from its parent.
	pub fn open(sequence_dir: &Path, lane: u32, first_cycle: usize, last_cycle: usize) -> Result<LaneReader> {
		let cycles = CycleWindow::new(first_cycle, last_cycle)?;
		LaneReader::from_descriptor(LaneDescriptor::from_sequence_dir(sequence_dir, lane, cycles)?)
	}

	/// Opens lane `lane` with intensity files in `intensity_dir`.
	pub fn open_with_intensity_dir(
		sequence_dir: &Path,
		intensity_dir: &Path,
		lane: u32,
		first_cycle: usize,
		last_cycle: usize,
	) -> Result<LaneReader> {
		let cycles = CycleWindow::new(first_cycle, last_cycle)?;
		LaneReader::from_descriptor(LaneDescriptor::new(sequence_dir, intensity_dir, lane, cycles))
	}

	/// Discovers and validates the tiles described by `descriptor`.
	pub fn from_descriptor(descriptor: LaneDescriptor) -> Result<LaneReader> {
		let tiles = TileFileSet::discover(&descriptor).with_context(|| {
			format!(
				"discovering tiles of lane {} in {:?}",
				descriptor.lane(),
				descriptor.sequence_dir()
			)
		})?;

		Ok(LaneReader {
			descriptor,
			tiles,
			cursor: TileCursor::default(),
			state: StreamState::NotEntered,
		})
	}

	/// Sets the bounds check used when opening tiles.
	///
	/// Fails with [`LaneError::IllegalReentry`] once the stream has been entered.
	pub fn with_boundary(mut self, boundary: TileBoundary) -> Result<LaneReader> {
		if self.state != StreamState::NotEntered {
			bail!(LaneError::IllegalReentry);
		}
		self.cursor = TileCursor::new(boundary);
		Ok(self)
	}

	pub fn descriptor(&self) -> &LaneDescriptor {
		&self.descriptor
	}

	pub fn tiles(&self) -> &TileFileSet {
		&self.tiles
	}

	pub fn num_tiles(&self) -> usize {
		self.tiles.len()
	}

	/// Index of the open tile, if any.
	pub fn current_tile(&self) -> Option<usize> {
		self.cursor.is_open().then_some(self.cursor.index())
	}

	/// Opens tile `index` (zero-based) and continues reading from there.
	///
	/// Returns `false` if the index is out of range or the stream is closed.
	pub fn seek_to_tile(&mut self, index: usize) -> Result<bool> {
		if self.state == StreamState::Closed {
			return Ok(false);
		}
		self.cursor.open_tile(&self.tiles, index)
	}

	/// Positions the stream at the first tile. Allowed once.
	pub fn enter(&mut self) -> Result<()> {
		if self.state != StreamState::NotEntered {
			bail!(LaneError::IllegalReentry);
		}
		self.cursor.open_tile(&self.tiles, 0)?;
		self.state = StreamState::Entered;
		log::trace!("entered lane {}", self.descriptor.lane());
		Ok(())
	}

	/// Whether another read is available.
	///
	/// Opens the following tiles while the current one is exhausted, so empty tiles are skipped.
	/// An error closes the stream.
	pub fn has_more(&mut self) -> Result<bool> {
		match self.state {
			StreamState::NotEntered => bail!(LaneError::StreamNotEntered),
			StreamState::Closed => return Ok(false),
			StreamState::Entered => {}
		}

		let found = self.find_rows();
		self.close_on_error(found)
	}

	fn find_rows(&mut self) -> Result<bool> {
		while !self.cursor.has_rows()? {
			if !self.cursor.advance(&self.tiles)? {
				self.cursor.release();
				return Ok(false);
			}
		}
		Ok(true)
	}

	/// Returns the next read, or `None` at the end of the lane. An error closes the stream.
	pub fn produce_next(&mut self) -> Result<Option<AlignedRead>> {
		if !self.has_more()? {
			return Ok(None);
		}

		let read = self.read_group();
		self.close_on_error(read)
	}

	fn read_group(&mut self) -> Result<Option<AlignedRead>> {
		let index = self.cursor.index();
		let Some(group) = self.cursor.next_group()? else {
			return Ok(None);
		};
		let read = AlignedRead::from_row_group(group, self.descriptor.cycles()).with_context(|| {
			let tile = self.tiles.tile_numbers().get(index).copied().unwrap_or_default();
			format!("reading tile {tile} of lane {}", self.descriptor.lane())
		})?;
		Ok(Some(read))
	}

	fn close_on_error<T>(&mut self, result: Result<T>) -> Result<T> {
		if let Err(err) = &result {
			log::debug!("closing lane {} after error: {err}", self.descriptor.lane());
			self.close();
		}
		result
	}

	/// Reads cannot be removed from the underlying files.
	#[allow(clippy::unused_self)]
	pub fn remove(&mut self) -> Result<()> {
		bail!(LaneError::UnsupportedOperation("remove"))
	}

	/// Releases the open tile. Safe to call repeatedly and before [`LaneReader::enter`].
	pub fn close(&mut self) {
		self.cursor.release();
		if self.state == StreamState::Entered {
			self.state = StreamState::Closed;
			log::trace!("closed lane {}", self.descriptor.lane());
		}
	}

	/// Enters the stream and iterates over all remaining reads.
	pub fn reads(&mut self) -> Result<Reads<'_>> {
		self.enter()?;
		Ok(Reads { reader: self })
	}
}

impl Debug for LaneReader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LaneReader")
			.field("descriptor", &self.descriptor)
			.field("tiles", &self.tiles.len())
			.field("state", &self.state)
			.finish()
	}
}

/// Iterator returned by [`LaneReader::reads`].
#[derive(Debug)]
pub struct Reads<'a> {
	reader: &'a mut LaneReader,
}

impl Iterator for Reads<'_> {
	type Item = Result<AlignedRead>;

	fn next(&mut self) -> Option<Self::Item> {
		self.reader.produce_next().transpose()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{lane_error, testing::LaneFixture};
	use flate2::{Compression, write::GzEncoder};
	use pretty_assertions::assert_eq;
	use std::io::Write;

	fn fixture(rows: &[usize]) -> Result<LaneFixture> {
		let fixture = LaneFixture::new(1)?;
		for (index, rows) in rows.iter().enumerate() {
			fixture.write_tile(index as u32 + 1, *rows)?;
		}
		Ok(fixture)
	}

	fn open(fixture: &LaneFixture) -> Result<LaneReader> {
		LaneReader::open(fixture.sequence_dir(), 1, 0, 3)
	}

	fn drain(reader: &mut LaneReader) -> Result<Vec<AlignedRead>> {
		reader.reads()?.collect()
	}

	#[test]
	fn reads_tiles_in_order() -> Result<()> {
		let fixture = LaneFixture::new(1)?;
		fixture.write_tile(20, 2)?;
		fixture.write_tile(3, 1)?;
		fixture.write_tile(100, 1)?;

		let mut reader = open(&fixture)?;
		assert_eq!(reader.num_tiles(), 3);

		let reads = drain(&mut reader)?;
		let tiles: Vec<u32> = reads.iter().map(|read| read.tile()).collect();
		assert_eq!(tiles, vec![3, 20, 20, 100]);
		assert_eq!(reads[1].bases(), &fixture.bases(20, 0)[0..4]);
		assert_eq!(reads[2].y(), 1);
		Ok(())
	}

	#[test]
	fn empty_tiles_are_skipped() -> Result<()> {
		let fixture = fixture(&[3, 0, 2])?;
		let mut reader = open(&fixture)?;
		assert_eq!(drain(&mut reader)?.len(), 5);
		Ok(())
	}

	#[test]
	fn leading_and_trailing_empty_tiles() -> Result<()> {
		let fixture = fixture(&[0, 0, 1, 0])?;
		let mut reader = open(&fixture)?;
		let reads = drain(&mut reader)?;
		assert_eq!(reads.len(), 1);
		assert_eq!(reads[0].tile(), 3);
		Ok(())
	}

	#[test]
	fn empty_lane() -> Result<()> {
		let fixture = LaneFixture::new(1)?;
		let mut reader = open(&fixture)?;
		assert_eq!(reader.num_tiles(), 0);
		reader.enter()?;
		assert!(!reader.has_more()?);
		assert_eq!(reader.produce_next()?, None);
		Ok(())
	}

	#[test]
	fn has_more_is_stable_until_next_read() -> Result<()> {
		let fixture = fixture(&[1, 0, 1])?;
		let mut reader = open(&fixture)?;
		reader.enter()?;

		assert!(reader.has_more()?);
		assert!(reader.produce_next()?.is_some());
		assert!(reader.has_more()?);
		assert!(reader.has_more()?);
		assert_eq!(reader.current_tile(), Some(2));
		assert!(reader.produce_next()?.is_some());
		assert!(!reader.has_more()?);
		assert!(!reader.has_more()?);
		assert_eq!(reader.current_tile(), None);
		assert_eq!(reader.produce_next()?, None);
		Ok(())
	}

	#[test]
	fn cycles_are_windowed() -> Result<()> {
		let fixture = fixture(&[1])?;
		let mut reader = LaneReader::open(fixture.sequence_dir(), 1, 1, 2)?;
		let reads = drain(&mut reader)?;
		assert_eq!(reads[0].bases(), &fixture.bases(1, 0)[1..=2]);
		assert_eq!(reads[0].window(), CycleWindow::new(1, 2)?);
		assert_eq!(reads[0].qualities().len(), 8);
		Ok(())
	}

	#[test]
	fn entering_twice() -> Result<()> {
		let fixture = fixture(&[1])?;
		let mut reader = open(&fixture)?;
		reader.enter()?;
		let err = reader.enter().unwrap_err();
		assert!(matches!(lane_error(&err), Some(LaneError::IllegalReentry)));

		let err = reader.reads().unwrap_err();
		assert!(matches!(lane_error(&err), Some(LaneError::IllegalReentry)));
		Ok(())
	}

	#[test]
	fn entering_after_close() -> Result<()> {
		let fixture = fixture(&[1])?;
		let mut reader = open(&fixture)?;
		drain(&mut reader)?;
		reader.close();
		let err = reader.enter().unwrap_err();
		assert!(matches!(lane_error(&err), Some(LaneError::IllegalReentry)));
		Ok(())
	}

	#[test]
	fn reading_before_enter() -> Result<()> {
		let fixture = fixture(&[1])?;
		let mut reader = open(&fixture)?;
		let err = reader.has_more().unwrap_err();
		assert!(matches!(lane_error(&err), Some(LaneError::StreamNotEntered)));
		assert!(reader.produce_next().is_err());
		Ok(())
	}

	#[test]
	fn close_is_idempotent() -> Result<()> {
		let fixture = fixture(&[2])?;
		let mut reader = open(&fixture)?;
		reader.close();
		reader.close();

		let reads = drain(&mut reader)?;
		assert_eq!(reads.len(), 2);
		reader.close();
		reader.close();
		assert!(!reader.has_more()?);
		assert_eq!(reader.produce_next()?, None);
		Ok(())
	}

	#[test]
	fn close_releases_tile() -> Result<()> {
		let fixture = fixture(&[2])?;
		let mut reader = open(&fixture)?;
		reader.enter()?;
		assert!(reader.produce_next()?.is_some());
		assert_eq!(reader.current_tile(), Some(0));

		reader.close();
		assert_eq!(reader.current_tile(), None);
		assert!(!reader.has_more()?);
		assert!(!reader.seek_to_tile(0)?);
		Ok(())
	}

	#[test]
	fn remove_is_unsupported() -> Result<()> {
		let fixture = fixture(&[3])?;
		let mut reader = open(&fixture)?;
		reader.enter()?;
		let first = reader.produce_next()?.unwrap();

		let err = reader.remove().unwrap_err();
		assert!(matches!(
			lane_error(&err),
			Some(LaneError::UnsupportedOperation("remove"))
		));
		assert_eq!(err.to_string(), "remove is not supported by the read stream");

		let second = reader.produce_next()?.unwrap();
		assert_eq!(second.y(), first.y() + 1);
		Ok(())
	}

	#[test]
	fn seek_to_tile() -> Result<()> {
		let fixture = fixture(&[1, 2, 3])?;
		let mut reader = open(&fixture)?;
		reader.enter()?;

		assert!(reader.seek_to_tile(2)?);
		assert_eq!(reader.current_tile(), Some(2));
		let reads: Vec<AlignedRead> = Reads { reader: &mut reader }.collect::<Result<_>>()?;
		assert_eq!(reads.len(), 3);
		assert!(reads.iter().all(|read| read.tile() == 3));

		assert!(!reader.seek_to_tile(3)?);
		Ok(())
	}

	#[test]
	fn legacy_boundary_skips_last_tile() -> Result<()> {
		let fixture = fixture(&[1, 2, 4])?;
		let mut reader = open(&fixture)?.with_boundary(TileBoundary::Legacy)?;
		assert_eq!(drain(&mut reader)?.len(), 3);

		let mut reader = open(&fixture)?;
		assert_eq!(drain(&mut reader)?.len(), 7);
		Ok(())
	}

	#[test]
	fn legacy_boundary_with_single_tile() -> Result<()> {
		let fixture = fixture(&[2])?;
		let mut reader = open(&fixture)?.with_boundary(TileBoundary::Legacy)?;
		assert!(drain(&mut reader)?.is_empty());
		Ok(())
	}

	#[test]
	fn both_constructors_agree() -> Result<()> {
		let fixture = fixture(&[1, 1])?;
		let derived = open(&fixture)?;
		let explicit = LaneReader::open_with_intensity_dir(fixture.sequence_dir(), fixture.intensity_dir(), 1, 0, 3)?;
		assert_eq!(derived.tiles(), explicit.tiles());
		assert_eq!(derived.descriptor(), explicit.descriptor());
		Ok(())
	}

	#[test]
	fn construction_fails_on_partial_lane() -> Result<()> {
		let fixture = fixture(&[1, 1])?;
		fixture.remove_file(2, flowcell_core::TileKind::Sequence)?;

		let err = open(&fixture).unwrap_err();
		assert!(matches!(
			lane_error(&err),
			Some(LaneError::TileSetCardinalityMismatch {
				intensity: 2,
				sequence: 1,
				quality: 2
			})
		));
		flowcell_core::assert_wildcard!(err, "discovering tiles of lane 1 in \"*Bustard\"");
		Ok(())
	}

	#[test]
	fn invalid_cycle_window() -> Result<()> {
		let fixture = fixture(&[1])?;
		assert!(LaneReader::open(fixture.sequence_dir(), 1, 3, 0).is_err());
		Ok(())
	}

	#[test]
	fn window_beyond_read_length() -> Result<()> {
		let fixture = fixture(&[1])?;
		let mut reader = LaneReader::open(fixture.sequence_dir(), 1, 0, 40)?;
		reader.enter()?;
		let err = reader.produce_next().unwrap_err();
		assert_eq!(err.to_string(), "reading tile 1 of lane 1");
		assert_eq!(reader.produce_next()?, None);
		assert!(!reader.has_more()?);
		Ok(())
	}

	#[test]
	fn failing_tile_ends_the_stream() -> Result<()> {
		let fixture = fixture(&[1, 1, 1])?;
		let mut reader = open(&fixture)?;
		fixture.remove_file(2, flowcell_core::TileKind::Sequence)?;

		let reads: Vec<Result<AlignedRead>> = reader.reads()?.take(6).collect();
		assert_eq!(reads.len(), 2);
		assert_eq!(reads[0].as_ref().map(|read| read.tile()).ok(), Some(1));
		let err = reads[1].as_ref().unwrap_err();
		assert_eq!(err.to_string(), "opening tile 2");
		assert!(format!("{err:#}").contains("s_1_0002_seq.txt"));

		assert_eq!(reader.current_tile(), None);
		assert!(!reader.seek_to_tile(2)?);
		let err = reader.enter().unwrap_err();
		assert!(matches!(lane_error(&err), Some(LaneError::IllegalReentry)));
		Ok(())
	}

	#[test]
	fn boundary_is_fixed_once_entered() -> Result<()> {
		let fixture = fixture(&[1])?;
		let mut reader = open(&fixture)?;
		reader.enter()?;
		let err = reader.with_boundary(TileBoundary::Legacy).unwrap_err();
		assert!(matches!(lane_error(&err), Some(LaneError::IllegalReentry)));
		Ok(())
	}

	#[test]
	fn reads_gzip_tiles() -> Result<()> {
		let fixture = fixture(&[2])?;
		let plain = fixture.read_file(1, flowcell_core::TileKind::Sequence)?;
		fixture.remove_file(1, flowcell_core::TileKind::Sequence)?;

		let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
		encoder.write_all(plain.as_bytes())?;
		std::fs::write(
			fixture.sequence_dir().join("s_1_0001_seq.txt.gz"),
			encoder.finish()?,
		)?;

		let mut reader = open(&fixture)?;
		assert_eq!(drain(&mut reader)?.len(), 2);
		Ok(())
	}
}
