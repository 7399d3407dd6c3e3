use anyhow::Result;
use flowcell::{
	core::{CycleWindow, TileKind},
	lane::{LaneDescriptor, TileFileSet},
};
use itertools::Itertools;
use std::{
	io::{Write, stdout},
	path::{Path, PathBuf},
};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// base calling directory containing the *_seq.txt and *_prb.txt files
	#[arg()]
	sequence_dir: PathBuf,

	/// lane number
	#[arg(long, short, value_name = "int")]
	lane: u32,

	/// directory containing the *_int.txt files [default: parent of SEQUENCE_DIR]
	#[arg(long, value_name = "DIR")]
	intensity_dir: Option<PathBuf>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	eprintln!("probe lane {} in {:?}", arguments.lane, arguments.sequence_dir);

	// the cycle window plays no role in discovery
	let cycles = CycleWindow::new(0, 0)?;
	let descriptor = match &arguments.intensity_dir {
		Some(dir) => LaneDescriptor::new(&arguments.sequence_dir, dir, arguments.lane, cycles),
		None => LaneDescriptor::from_sequence_dir(&arguments.sequence_dir, arguments.lane, cycles)?,
	};
	let tiles = TileFileSet::discover(&descriptor)?;

	let mut out = stdout().lock();
	writeln!(out, "lane {}: {} tiles", descriptor.lane(), tiles.len())?;
	writeln!(out, "intensity_dir: {:?}", descriptor.intensity_dir())?;
	writeln!(out, "sequence_dir: {:?}", descriptor.sequence_dir())?;
	for tile in tiles.iter() {
		let names = [tile.intensity, tile.sequence, tile.quality]
			.iter()
			.map(|path| file_name(path))
			.join("\t");
		writeln!(out, "{}\t{names}", tile.tile)?;
	}
	log::debug!("lane {}: listed {} files", descriptor.lane(), tiles.len() * TileKind::all().len());

	Ok(())
}

fn file_name(path: &Path) -> String {
	path.file_name().map_or_else(String::new, |name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
	use crate::tests::run_command;
	use anyhow::Result;

	#[test]
	fn probe_testdata() -> Result<()> {
		run_command(vec!["flowcell", "probe", "-q", "--lane", "1", "../testdata/run/Firecrest/Bustard"])?;
		Ok(())
	}

	#[test]
	fn missing_directory() {
		let err = run_command(vec!["flowcell", "probe", "-q", "--lane", "1", "../testdata/nope/Bustard"]).unwrap_err();
		assert!(err.to_string().starts_with("cannot list directory"));
	}
}
