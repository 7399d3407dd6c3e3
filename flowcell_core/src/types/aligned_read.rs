//! Aligned reads: one cluster of one tile, trimmed to a cycle window.
//!
//! A read is assembled from one [`RowGroup`], i.e. the rows at the same position in the three
//! files of a tile:
//!
//! ```text
//! _int.txt   lane tile x y  A C G T  A C G T  ...   (four intensity values per cycle)
//! _seq.txt   lane tile x y  ACGTTGCA...              (one base call per cycle)
//! _prb.txt   A C G T  A C G T  ...                   (four probability values per cycle)
//! ```
//!
//! Intensity and probability values are kept as the tokens found in the file.

use super::{CycleWindow, RowGroup, TileKind};
use anyhow::{Context, Result, ensure};
use std::{fmt, str::FromStr};

/// Number of leading `lane tile x y` fields in intensity and sequence rows.
pub const HEADER_FIELDS: usize = 4;

/// Number of values per cycle in intensity and probability rows, one per nucleotide.
pub const CHANNELS: usize = 4;

/// The bases and per-cycle values of one cluster, restricted to a [`CycleWindow`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignedRead {
	lane: u32,
	tile: u32,
	x: i32,
	y: i32,
	window: CycleWindow,
	bases: String,
	intensities: Vec<String>,
	qualities: Vec<String>,
}

/// Base call and raw values of a single cycle of an [`AlignedRead`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleCall<'a> {
	pub cycle: usize,
	pub base: char,
	pub intensities: &'a [String],
	pub qualities: &'a [String],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ReadHeader {
	lane: u32,
	tile: u32,
	x: i32,
	y: i32,
}

impl ReadHeader {
	fn parse(row: &[String], kind: TileKind) -> Result<Self> {
		ensure!(
			row.len() >= HEADER_FIELDS,
			"{kind} row has {} fields, expected at least {HEADER_FIELDS}",
			row.len()
		);
		Ok(ReadHeader {
			lane: parse_field(&row[0], "lane", kind)?,
			tile: parse_field(&row[1], "tile", kind)?,
			x: parse_field(&row[2], "x", kind)?,
			y: parse_field(&row[3], "y", kind)?,
		})
	}
}

impl fmt::Display for ReadHeader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}:{}", self.lane, self.tile, self.x, self.y)
	}
}

fn parse_field<T: FromStr>(token: &str, name: &str, kind: TileKind) -> Result<T> {
	token
		.parse::<T>()
		.ok()
		.with_context(|| format!("{kind} row has invalid {name} field '{token}'"))
}

/// Moves the values of the windowed cycles out of `row`.
fn take_channels(row: Vec<String>, offset: usize, window: CycleWindow, kind: TileKind) -> Result<Vec<String>> {
	let start = offset + window.first() * CHANNELS;
	let end = offset + (window.last() + 1) * CHANNELS;
	ensure!(
		row.len() >= end,
		"{kind} row has {} fields, cycles {window} need {end}",
		row.len()
	);
	Ok(row.into_iter().skip(start).take(end - start).collect())
}

impl AlignedRead {
	/// Builds a read from one pasted row group.
	///
	/// Fails if a header field does not parse, if the intensity and sequence rows belong to
	/// different clusters, or if any row is too short for `window`.
	pub fn from_row_group(group: RowGroup, window: CycleWindow) -> Result<Self> {
		let header = ReadHeader::parse(&group.intensity, TileKind::Intensity)?;
		let sequence_header = ReadHeader::parse(&group.sequence, TileKind::Sequence)?;
		ensure!(
			header == sequence_header,
			"intensity row ({header}) and sequence row ({sequence_header}) describe different clusters"
		);

		let calls = group
			.sequence
			.get(HEADER_FIELDS)
			.context("sequence row has no base calls")?;
		ensure!(calls.is_ascii(), "sequence row has non-ASCII base calls");
		ensure!(
			calls.len() > window.last(),
			"sequence row has {} cycles, cycles {window} requested",
			calls.len()
		);
		let bases = calls[window.range()].to_owned();

		let RowGroup {
			intensity, quality, ..
		} = group;

		Ok(AlignedRead {
			lane: header.lane,
			tile: header.tile,
			x: header.x,
			y: header.y,
			window,
			bases,
			intensities: take_channels(intensity, HEADER_FIELDS, window, TileKind::Intensity)?,
			qualities: take_channels(quality, 0, window, TileKind::Quality)?,
		})
	}

	pub fn lane(&self) -> u32 {
		self.lane
	}

	pub fn tile(&self) -> u32 {
		self.tile
	}

	pub fn x(&self) -> i32 {
		self.x
	}

	pub fn y(&self) -> i32 {
		self.y
	}

	pub fn window(&self) -> CycleWindow {
		self.window
	}

	/// Base calls of the windowed cycles.
	pub fn bases(&self) -> &str {
		&self.bases
	}

	/// Intensity tokens, [`CHANNELS`] per cycle.
	pub fn intensities(&self) -> &[String] {
		&self.intensities
	}

	/// Probability tokens, [`CHANNELS`] per cycle.
	pub fn qualities(&self) -> &[String] {
		&self.qualities
	}

	pub fn cycles(&self) -> impl Iterator<Item = CycleCall<'_>> {
		self
			.bases
			.chars()
			.zip(self.intensities.chunks(CHANNELS))
			.zip(self.qualities.chunks(CHANNELS))
			.enumerate()
			.map(|(offset, ((base, intensities), qualities))| CycleCall {
				cycle: self.window.first() + offset,
				base,
				intensities,
				qualities,
			})
	}
}

/// Tab separated `lane tile x y bases`.
impl fmt::Display for AlignedRead {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}\t{}\t{}\t{}\t{}", self.lane, self.tile, self.x, self.y, self.bases)
	}
}
