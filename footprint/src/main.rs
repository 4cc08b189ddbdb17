mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};

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
	verbose: Verbosity<WarnLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Show the building tiles covering a bounding box
	Tiles(tools::tiles::Subcommand),

	/// Fetch and merge the building tiles of a bounding box
	Fetch(tools::fetch::Subcommand),

	/// Look up the address of a position
	Geocode(tools::geocode::Subcommand),

	/// Look up a route between two positions
	Route(tools::route::Subcommand),

	/// Print a base map style
	Style(tools::style::Subcommand),

	/// Run the building overlay against an in-memory map
	Overlay(tools::overlay::Subcommand),
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
		Commands::Tiles(arguments) => tools::tiles::run(arguments),
		Commands::Fetch(arguments) => tools::fetch::run(arguments),
		Commands::Geocode(arguments) => tools::geocode::run(arguments),
		Commands::Route(arguments) => tools::route::run(arguments),
		Commands::Style(arguments) => tools::style::run(arguments),
		Commands::Overlay(arguments) => tools::overlay::run(arguments),
	}
}

#[cfg(test)]
mod tests {
	use crate::{Cli, Commands, run};
	use anyhow::Result;
	use clap::Parser;

	pub fn parse(arg_vec: Vec<&str>) -> Result<Cli> {
		Ok(Cli::try_parse_from(arg_vec)?)
	}

	pub fn run_command(arg_vec: Vec<&str>) -> Result<String> {
		let cli = parse(arg_vec)?;
		let msg = format!("{cli:?}");
		run(cli)?;
		Ok(msg)
	}

	#[test]
	fn help() {
		let err = run_command(vec!["footprint"]).unwrap_err().to_string();
		assert!(err.starts_with("Overlay dynamically fetched building footprints"), "{err}");
		assert!(err.contains("\nUsage: footprint [OPTIONS] <COMMAND>"), "{err}");
	}

	#[test]
	fn version() {
		let err = run_command(vec!["footprint", "-V"]).unwrap_err().to_string();
		assert!(err.starts_with("footprint "));
	}

	#[test]
	fn subcommand_help() {
		for (command, about) in [
			("tiles", "Show the building tiles covering a bounding box"),
			("fetch", "Fetch and merge the building tiles of a bounding box"),
			("geocode", "Look up the address of a position"),
			("route", "Look up a route between two positions"),
			("overlay", "Run the building overlay against an in-memory map"),
		] {
			let err = run_command(vec!["footprint", command]).unwrap_err().to_string();
			assert!(err.starts_with(about), "{command}: {err}");
		}
	}

	#[test]
	fn verbosity() {
		let cli = parse(vec!["footprint", "-vv", "style"]).unwrap();
		assert_eq!(cli.verbose.log_level_filter(), log::LevelFilter::Debug);
		let cli = parse(vec!["footprint", "-q", "style"]).unwrap();
		assert_eq!(cli.verbose.log_level_filter(), log::LevelFilter::Error);
		assert!(matches!(cli.command, Commands::Style(_)));
	}

	#[test]
	fn tiles_runs_offline() {
		run_command(vec!["footprint", "tiles", "--bbox", "106.81,-6.21,106.83,-6.19", "--zoom", "15"]).unwrap();
	}
}
