mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Print the aligned reads of a lane as tab-separated lines
	Dump(tools::dump::Subcommand),

	/// Show the tiles of a lane and their files
	Probe(tools::probe::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Dump(arguments) => tools::dump::run(arguments),
		Commands::Probe(arguments) => tools::probe::run(arguments),
	}
}

#[cfg(test)]
mod tests {
	use crate::{Cli, run};
	use anyhow::Result;
	use clap::Parser;

	pub fn run_command(arg_vec: Vec<&str>) -> Result<String> {
		let cli = Cli::try_parse_from(arg_vec)?;
		let msg = format!("{cli:?}");
		run(cli)?;
		Ok(msg)
	}

	#[test]
	fn help() {
		let err = run_command(vec!["flowcell"]).unwrap_err().to_string();
		assert!(err.starts_with("Reads per-tile intensity, sequence and quality files of a sequencing lane"));
		assert!(err.contains("\nUsage: flowcell [OPTIONS] <COMMAND>"));
	}

	#[test]
	fn version() {
		let err = run_command(vec!["flowcell", "-V"]).unwrap_err().to_string();
		assert!(err.starts_with("flowcell "));
	}

	#[test]
	fn dump_subcommand() {
		let output = run_command(vec!["flowcell", "dump"]).unwrap_err().to_string();
		assert!(output.starts_with("Print the aligned reads of a lane as tab-separated lines"));
	}

	#[test]
	fn probe_subcommand() {
		let output = run_command(vec!["flowcell", "probe"]).unwrap_err().to_string();
		assert!(output.starts_with("Show the tiles of a lane and their files"));
	}
}
