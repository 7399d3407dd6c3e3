//! Classifies directory entries as tile files of a given lane and kind.
//!
//! Tile files follow the naming pattern:
//! ```text
//! s_<lane>_<tile>_<kind>.txt[.gz]
//! ```
//! where `<kind>` is `int`, `seq` or `prb`. The pattern is searched anywhere in the name.
//!
//! Files left behind by reprocessing are skipped: if the text following `.txt` contains `old`
//! with at least one character on either side, the entry is excluded.
//!
//! | Name                          | Lane 1, `seq` |
//! |-------------------------------|---------------|
//! | `s_1_0001_seq.txt`            | match         |
//! | `s_1_0001_seq.txt.gz`         | match         |
//! | `s_1_0001_seq.txt.old.gz`     | excluded      |
//! | `s_1_0001_seq.txt_old_2`      | excluded      |
//! | `s_11_0001_seq.txt`           | other lane    |
//! | `s_1_0001_prb.txt`            | other kind    |
//! | `s_1_٣_seq.txt`               | not a tile    |

use crate::LaneError;
use anyhow::{Context, Result, bail};
use flowcell_core::TileKind;
use regex::Regex;
use std::{
	collections::HashSet,
	fs,
	path::{Path, PathBuf},
};

/// Marker of superseded files, see [`has_backup_marker`].
const BACKUP_MARKER: &str = "old";

/// Lane and kind scoped filename pattern.
#[derive(Clone, Debug)]
pub struct TilePattern {
	lane: u32,
	kind: TileKind,
	name: Regex,
	tile: Regex,
}

/// Result of inspecting a single filename with a [`TilePattern`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileName {
	/// The name is a tile file of the pattern's lane and kind.
	pub matches: bool,
	/// The tile number embedded in the name, if it can be parsed.
	pub tile: Option<u32>,
}

impl TilePattern {
	pub fn new(lane: u32, kind: TileKind) -> Result<TilePattern> {
		Ok(TilePattern {
			lane,
			kind,
			name: Regex::new(&format!(r"s_{lane}_[0-9]+_{}\.txt", kind.suffix()))?,
			tile: tile_regex(lane)?,
		})
	}

	pub fn lane(&self) -> u32 {
		self.lane
	}

	pub fn kind(&self) -> TileKind {
		self.kind
	}

	pub fn as_str(&self) -> &str {
		self.name.as_str()
	}

	/// Whether `filename` is a tile file of this lane and kind.
	pub fn is_match(&self, filename: &str) -> bool {
		self
			.name
			.find_iter(filename)
			.any(|m| !has_backup_marker(&filename[m.end()..]))
	}

	/// Classifies `filename` and extracts its tile number.
	pub fn inspect(&self, filename: &str) -> TileName {
		TileName {
			matches: self.is_match(filename),
			tile: parse_tile_number(&self.tile, filename),
		}
	}
}

/// The regex capturing the tile number of a lane's files.
pub(crate) fn tile_regex(lane: u32) -> Result<Regex> {
	Ok(Regex::new(&format!(r"s_{lane}_([0-9]+)_"))?)
}

pub(crate) fn parse_tile_number(regex: &Regex, filename: &str) -> Option<u32> {
	regex.captures(filename)?.get(1)?.as_str().parse::<u32>().ok()
}

/// Whether the text after `.txt` marks the file as a superseded copy.
fn has_backup_marker(rest: &str) -> bool {
	rest
		.match_indices(BACKUP_MARKER)
		.any(|(index, _)| index > 0 && index + BACKUP_MARKER.len() < rest.len())
}

/// Lists the tile files of `lane` and `kind` in `dir`.
pub fn classify(dir: &Path, lane: u32, kind: TileKind) -> Result<HashSet<PathBuf>> {
	let pattern = TilePattern::new(lane, kind)?;
	log::trace!("classify {dir:?} with pattern {}", pattern.as_str());

	let entries = match fs::read_dir(dir) {
		Ok(entries) => entries,
		Err(source) => bail!(LaneError::DirectoryUnreadable {
			path: dir.to_path_buf(),
			source,
		}),
	};

	let mut files = HashSet::new();
	for entry in entries {
		let entry = entry.with_context(|| format!("listing directory {dir:?}"))?;
		let Some(filename) = entry.file_name().to_str().map(str::to_owned) else {
			log::trace!("skip non UTF-8 name {:?}", entry.file_name());
			continue;
		};
		if pattern.is_match(&filename) {
			files.insert(entry.path());
		} else {
			log::trace!("skip {filename:?}");
		}
	}

	log::debug!("found {} {kind} files for lane {lane} in {dir:?}", files.len());
	Ok(files)
}
