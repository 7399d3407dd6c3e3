use anyhow::{Context, Result, bail};
use flowcell::config::{CycleConfig, LaneConfig};
use std::{
	io::{BufWriter, Write, stdout},
	path::PathBuf,
};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// base calling directory containing the *_seq.txt and *_prb.txt files
	#[arg(required_unless_present = "config")]
	sequence_dir: Option<PathBuf>,

	/// lane number
	#[arg(long, short, value_name = "int", required_unless_present = "config", display_order = 1)]
	lane: Option<u32>,

	/// first cycle to keep, zero-based
	#[arg(long, value_name = "int", required_unless_present = "config", display_order = 1)]
	first_cycle: Option<usize>,

	/// last cycle to keep, zero-based and inclusive
	#[arg(long, value_name = "int", required_unless_present = "config", display_order = 1)]
	last_cycle: Option<usize>,

	/// directory containing the *_int.txt files [default: parent of SEQUENCE_DIR]
	#[arg(long, value_name = "DIR", display_order = 2)]
	intensity_dir: Option<PathBuf>,

	/// read the lane from a YAML config file, other arguments override its values
	/// (a SEQUENCE_DIR given without --intensity-dir also replaces the config's intensity_dir)
	#[arg(long, short, value_name = "FILE", display_order = 2, verbatim_doc_comment)]
	config: Option<PathBuf>,

	/// stop after this many reads
	#[arg(long, short = 'n', value_name = "int", display_order = 3)]
	limit: Option<usize>,

	/// never open the last tile of the lane, reproducing the output of old pipelines
	#[arg(long, display_order = 3)]
	legacy_boundary: bool,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let config = lane_config(arguments)?;
	eprintln!(
		"dump lane {} cycles {}..={} from {:?}",
		config.lane, config.cycles.first, config.cycles.last, config.sequence_dir
	);

	let mut reader = config.open_reader()?;
	let mut out = BufWriter::new(stdout().lock());
	let mut count = 0usize;
	for read in reader.reads()?.take(arguments.limit.unwrap_or(usize::MAX)) {
		writeln!(out, "{}", read?)?;
		count += 1;
	}
	out.flush()?;
	reader.close();

	log::info!("wrote {count} reads of lane {}", config.lane);
	Ok(())
}

/// Merges the config file, if any, with the command line.
fn lane_config(arguments: &Subcommand) -> Result<LaneConfig> {
	let mut config = match &arguments.config {
		Some(path) => LaneConfig::from_path(path)?,
		None => {
			let (Some(sequence_dir), Some(lane), Some(first), Some(last)) = (
				arguments.sequence_dir.clone(),
				arguments.lane,
				arguments.first_cycle,
				arguments.last_cycle,
			) else {
				bail!("either --config or SEQUENCE_DIR, --lane, --first-cycle and --last-cycle are required");
			};
			LaneConfig {
				sequence_dir,
				intensity_dir: None,
				lane,
				cycles: CycleConfig { first, last },
				legacy_tile_boundary: false,
			}
		}
	};

	if let Some(sequence_dir) = &arguments.sequence_dir {
		config.sequence_dir.clone_from(sequence_dir);
		// the config's intensity_dir belongs to its own sequence_dir
		config.intensity_dir = None;
	}
	if let Some(intensity_dir) = &arguments.intensity_dir {
		config.intensity_dir = Some(intensity_dir.clone());
	}
	if let Some(lane) = arguments.lane {
		config.lane = lane;
	}
	if let Some(first) = arguments.first_cycle {
		config.cycles.first = first;
	}
	if let Some(last) = arguments.last_cycle {
		config.cycles.last = last;
	}
	config.legacy_tile_boundary |= arguments.legacy_boundary;

	config.descriptor().context("invalid lane arguments")?;
	Ok(config)
}
