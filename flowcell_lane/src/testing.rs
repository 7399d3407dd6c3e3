//! Synthetic lanes for tests.
//!
//! Compiled for this crate's tests and, with the `test` feature, for downstream test suites.

use anyhow::Result;
use flowcell_core::{CycleWindow, TileKind};
use std::{
	fmt::Write,
	fs,
	path::{Path, PathBuf},
};
use tempfile::TempDir;

const NUCLEOTIDES: [char; 4] = ['A', 'C', 'G', 'T'];

/// A temporary run folder with the usual layout:
///
/// ```text
/// <root>/s_<lane>_<tile>_int.txt
/// <root>/Bustard/s_<lane>_<tile>_seq.txt
/// <root>/Bustard/s_<lane>_<tile>_prb.txt
/// ```
///
/// Row `r` of tile `t` is the cluster at `x = t`, `y = r`.
#[derive(Debug)]
pub struct LaneFixture {
	dir: TempDir,
	sequence_dir: PathBuf,
	lane: u32,
	cycles: usize,
}

impl LaneFixture {
	/// Creates an empty lane with 8 cycles per read.
	pub fn new(lane: u32) -> Result<LaneFixture> {
		LaneFixture::with_cycles(lane, 8)
	}

	pub fn with_cycles(lane: u32, cycles: usize) -> Result<LaneFixture> {
		let dir = tempfile::tempdir()?;
		let sequence_dir = dir.path().join("Bustard");
		fs::create_dir(&sequence_dir)?;
		Ok(LaneFixture {
			dir,
			sequence_dir,
			lane,
			cycles,
		})
	}

	pub fn intensity_dir(&self) -> &Path {
		self.dir.path()
	}

	pub fn sequence_dir(&self) -> &Path {
		&self.sequence_dir
	}

	pub fn descriptor(&self, cycles: CycleWindow) -> crate::LaneDescriptor {
		crate::LaneDescriptor::new(&self.sequence_dir, self.dir.path(), self.lane, cycles)
	}

	/// Path of the file of `kind` for `tile`, named `s_<lane>_<tile:04>_<kind>.txt`.
	pub fn path(&self, tile: u32, kind: TileKind) -> PathBuf {
		self.dir_for(kind)
			.join(format!("s_{}_{tile:04}_{}.txt", self.lane, kind.suffix()))
	}

	fn dir_for(&self, kind: TileKind) -> &Path {
		if kind.is_intensity() {
			self.dir.path()
		} else {
			&self.sequence_dir
		}
	}

	/// Base calls of row `row` of `tile`, one per cycle.
	pub fn bases(&self, tile: u32, row: usize) -> String {
		(0..self.cycles)
			.map(|cycle| NUCLEOTIDES[(tile as usize + row + cycle) % NUCLEOTIDES.len()])
			.collect()
	}

	/// Writes the three files of `tile` with `rows` clusters.
	pub fn write_tile(&self, tile: u32, rows: usize) -> Result<()> {
		let mut int = String::new();
		let mut seq = String::new();
		let mut prb = String::new();

		for row in 0..rows {
			let bases = self.bases(tile, row);
			write!(int, "{}\t{tile}\t{tile}\t{row}", self.lane)?;
			for (cycle, base) in bases.chars().enumerate() {
				int.push('\t');
				prb.push_str(if cycle == 0 { "" } else { "\t" });
				for (channel, nucleotide) in NUCLEOTIDES.iter().enumerate() {
					let called = *nucleotide == base;
					write!(int, "{}{}", if channel == 0 { "" } else { " " }, if called { 900 } else { cycle * 10 })?;
					write!(prb, "{}{}", if channel == 0 { "" } else { " " }, if called { 40 } else { -40 })?;
				}
			}
			int.push('\n');
			prb.push('\n');
			writeln!(seq, "{}\t{tile}\t{tile}\t{row}\t{bases}", self.lane)?;
		}

		fs::write(self.path(tile, TileKind::Intensity), int)?;
		fs::write(self.path(tile, TileKind::Sequence), seq)?;
		fs::write(self.path(tile, TileKind::Quality), prb)?;
		Ok(())
	}

	/// Writes a file with an arbitrary name into the directory of `kind`.
	pub fn write_file(&self, name: &str, kind: TileKind, contents: &str) -> Result<()> {
		fs::write(self.dir_for(kind).join(name), contents)?;
		Ok(())
	}

	pub fn read_file(&self, tile: u32, kind: TileKind) -> Result<String> {
		Ok(fs::read_to_string(self.path(tile, kind))?)
	}

	pub fn remove_file(&self, tile: u32, kind: TileKind) -> Result<()> {
		fs::remove_file(self.path(tile, kind))?;
		Ok(())
	}
}
