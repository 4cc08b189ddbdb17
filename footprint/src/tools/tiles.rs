use super::ConfigArgs;
use anyhow::Result;
use clap::Args;
use footprint_core::{GeoBBox, TileRange};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// bounding box as "west,south,east,north" in degrees
	#[arg(long, allow_hyphen_values = true)]
	bbox: GeoBBox,

	/// zoom level
	#[arg(long, short)]
	zoom: u8,

	/// also list the URL of every tile
	#[arg(long)]
	urls: bool,

	#[command(flatten)]
	config: ConfigArgs,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	print!("{}", execute(arguments)?);
	Ok(())
}

fn execute(arguments: &Subcommand) -> Result<String> {
	let range = TileRange::from_geo(arguments.zoom, &arguments.bbox);
	let mut output = format!("{range}\n{} tiles\n", range.count_tiles());

	if arguments.urls {
		let config = arguments.config.load()?;
		for coord in range.iter_coords() {
			output.push_str(&config.endpoints.tile_url(&coord));
			output.push('\n');
		}
	}
	Ok(output)
}
