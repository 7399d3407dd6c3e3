use super::TextRowReader;
use crate::types::{RowGroup, TileKind};
use anyhow::{Context, Result};
use std::path::Path;

/// Reads the intensity, sequence and quality files of one tile in lockstep.
///
/// The three files form a single resource: they are opened together and released together when
/// the reader is dropped. The reader is exhausted as soon as any one file is.
#[derive(Debug)]
pub struct PasteReader {
	readers: [TextRowReader; 3],
	misaligned: bool,
}

impl PasteReader {
	pub fn open(intensity: &Path, sequence: &Path, quality: &Path) -> Result<PasteReader> {
		Ok(PasteReader {
			readers: [
				TextRowReader::open(intensity)?,
				TextRowReader::open(sequence)?,
				TextRowReader::open(quality)?,
			],
			misaligned: false,
		})
	}

	pub fn path(&self, kind: TileKind) -> &Path {
		self.reader(kind).path()
	}

	fn reader(&self, kind: TileKind) -> &TextRowReader {
		match kind {
			TileKind::Intensity => &self.readers[0],
			TileKind::Sequence => &self.readers[1],
			TileKind::Quality => &self.readers[2],
		}
	}

	/// Returns whether all three files have another row.
	pub fn has_next(&mut self) -> Result<bool> {
		let mut available = [false; 3];
		for (flag, reader) in available.iter_mut().zip(self.readers.iter_mut()) {
			*flag = reader.has_next()?;
		}

		let all = available.iter().all(|f| *f);
		if !all && available.iter().any(|f| *f) && !self.misaligned {
			self.misaligned = true;
			log::warn!(
				"files of one tile have different row counts, stopping at line {} of {:?}",
				self.readers[1].line_number(),
				self.readers[1].path()
			);
		}
		Ok(all)
	}

	/// Returns the next row group, or `None` once any file is exhausted.
	pub fn next_group(&mut self) -> Result<Option<RowGroup>> {
		if !self.has_next()? {
			return Ok(None);
		}

		let [intensity, sequence, quality] = &mut self.readers;
		Ok(Some(RowGroup::new(
			next_row(intensity)?,
			next_row(sequence)?,
			next_row(quality)?,
		)))
	}
}

fn next_row(reader: &mut TextRowReader) -> Result<Vec<String>> {
	reader
		.next_row()?
		.with_context(|| format!("{:?} ended unexpectedly", reader.path()))
}
