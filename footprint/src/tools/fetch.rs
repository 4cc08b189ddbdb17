use super::ConfigArgs;
use anyhow::{Context, Result};
use clap::Args;
use footprint_core::{GeoBBox, TileRange};
use footprint_overlay::BuildingTileFetcher;
use std::{fs, path::PathBuf};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// bounding box as "west,south,east,north" in degrees
	#[arg(long, allow_hyphen_values = true)]
	bbox: GeoBBox,

	/// zoom level of the building tiles
	#[arg(long, short)]
	zoom: u8,

	/// write the merged GeoJSON to this file instead of stdout
	#[arg(long, short, value_name = "FILE")]
	output: Option<PathBuf>,

	#[command(flatten)]
	config: ConfigArgs,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	print!("{}", execute(arguments).await?);
	Ok(())
}

async fn execute(arguments: &Subcommand) -> Result<String> {
	let config = arguments.config.load()?;
	let fetcher = BuildingTileFetcher::from_config(&config)?;
	let range = TileRange::from_geo(arguments.zoom, &arguments.bbox);

	let batch = fetcher.fetch_tiles_with_report(&range).await;
	let json = batch.collection.to_json_string()?;

	let Some(path) = &arguments.output else {
		return Ok(format!("{json}\n"));
	};

	fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;

	let mut summary = format!(
		"{} features from {} tiles written to {}\n",
		batch.collection.len(),
		range.count_tiles(),
		path.display()
	);
	if batch.duplicates_removed > 0 {
		summary.push_str(&format!("{} duplicates removed\n", batch.duplicates_removed));
	}
	for failure in &batch.failures {
		summary.push_str(&format!("{failure}\n"));
	}
	Ok(summary)
}
