//! This module provides `TextRowReader`, a tokenizer for whitespace separated text files.
//!
//! Blank lines and lines starting with `#` are skipped. Files ending in `.gz` are decompressed on
//! the fly; concatenated gzip members are read as one stream.
//!
//! # Examples
//!
//! ```no_run
//! use flowcell_core::io::TextRowReader;
//! use std::path::Path;
//!
//! let mut reader = TextRowReader::open(Path::new("/data/Bustard/s_1_0001_seq.txt.gz")).unwrap();
//! while let Some(row) = reader.next_row().unwrap() {
//!     println!("{} fields", row.len());
//! }
//! ```

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::{
	fmt::Debug,
	fs::File,
	io::{BufRead, BufReader},
	path::{Path, PathBuf},
};

/// Reads one tokenized row per call from a text file.
pub struct TextRowReader {
	path: PathBuf,
	lines: Box<dyn BufRead>,
	line_number: usize,
	peeked: Option<Vec<String>>,
	exhausted: bool,
}

impl TextRowReader {
	/// Opens `path`, decompressing it if the name ends in `.gz`.
	pub fn open(path: &Path) -> Result<TextRowReader> {
		let file = File::open(path).with_context(|| format!("opening {path:?}"))?;
		let lines: Box<dyn BufRead> = if path.extension().is_some_and(|ext| ext == "gz") {
			Box::new(BufReader::new(MultiGzDecoder::new(file)))
		} else {
			Box::new(BufReader::new(file))
		};
		log::trace!("open {path:?}");

		Ok(TextRowReader {
			path: path.to_path_buf(),
			lines,
			line_number: 0,
			peeked: None,
			exhausted: false,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Line number of the most recently read line, starting at 1.
	pub fn line_number(&self) -> usize {
		self.line_number
	}

	/// Returns whether another row is available, reading ahead if necessary.
	pub fn has_next(&mut self) -> Result<bool> {
		self.fill()?;
		Ok(self.peeked.is_some())
	}

	/// Returns the next row, or `None` at the end of the file.
	pub fn next_row(&mut self) -> Result<Option<Vec<String>>> {
		self.fill()?;
		Ok(self.peeked.take())
	}

	fn fill(&mut self) -> Result<()> {
		let mut line = String::new();
		while self.peeked.is_none() && !self.exhausted {
			line.clear();
			let read = self
				.lines
				.read_line(&mut line)
				.with_context(|| format!("reading line {} of {:?}", self.line_number + 1, self.path))?;
			if read == 0 {
				self.exhausted = true;
				break;
			}
			self.line_number += 1;

			let content = line.trim();
			if content.is_empty() || content.starts_with('#') {
				continue;
			}
			self.peeked = Some(content.split_ascii_whitespace().map(String::from).collect());
		}
		Ok(())
	}
}

impl Debug for TextRowReader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TextRowReader")
			.field("path", &self.path)
			.field("line_number", &self.line_number)
			.field("exhausted", &self.exhausted)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_fs::{
		TempDir,
		fixture::{FileWriteBin, FileWriteStr, PathChild},
	};
	use flate2::{Compression, write::GzEncoder};
	use std::io::Write;

	fn collect(reader: &mut TextRowReader) -> Result<Vec<Vec<String>>> {
		let mut rows = Vec::new();
		while let Some(row) = reader.next_row()? {
			rows.push(row);
		}
		Ok(rows)
	}

	#[test]
	fn tokenizes_rows() -> Result<()> {
		let dir = TempDir::new()?;
		let file = dir.child("s_1_1_seq.txt");
		file.write_str("1\t1\t10 20  ACGT\n\n# comment\n1 1 11 21 TTTT\r\n")?;

		let mut reader = TextRowReader::open(file.path())?;
		assert!(reader.has_next()?);
		assert!(reader.has_next()?);
		assert_eq!(
			collect(&mut reader)?,
			vec![vec!["1", "1", "10", "20", "ACGT"], vec!["1", "1", "11", "21", "TTTT"]]
		);
		assert_eq!(reader.line_number(), 4);
		assert!(!reader.has_next()?);
		assert_eq!(reader.next_row()?, None);
		Ok(())
	}

	#[test]
	fn reads_gzip() -> Result<()> {
		let dir = TempDir::new()?;
		let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
		encoder.write_all(b"1 2 3 4 ACGT\n")?;
		let file = dir.child("s_1_2_seq.txt.gz");
		file.write_binary(&encoder.finish()?)?;

		let mut reader = TextRowReader::open(file.path())?;
		assert_eq!(collect(&mut reader)?, vec![vec!["1", "2", "3", "4", "ACGT"]]);
		Ok(())
	}

	#[test]
	fn empty_file() -> Result<()> {
		let dir = TempDir::new()?;
		let file = dir.child("s_1_3_prb.txt");
		file.write_str("")?;

		let mut reader = TextRowReader::open(file.path())?;
		assert!(!reader.has_next()?);
		Ok(())
	}

	#[test]
	fn missing_file() -> Result<()> {
		let dir = TempDir::new()?;
		let err = TextRowReader::open(&dir.path().join("s_1_4_int.txt")).unwrap_err();
		assert!(err.to_string().starts_with("opening \""), "{err}");
		Ok(())
	}
}
