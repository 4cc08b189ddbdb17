use super::{ConfigArgs, parse_position};
use anyhow::Result;
use clap::Args;
use footprint_core::io::HttpClient;
use footprint_geometry::Coordinates;
use footprint_overlay::services::{OsrmRouter, RouteService};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// start position as "lon,lat"
	#[arg(value_parser = parse_position, allow_hyphen_values = true)]
	start: Coordinates,

	/// end position as "lon,lat"
	#[arg(value_parser = parse_position, allow_hyphen_values = true)]
	end: Coordinates,

	#[command(flatten)]
	config: ConfigArgs,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	println!("{}", execute(arguments).await?);
	Ok(())
}

/// The route geometry as GeoJSON.
async fn execute(arguments: &Subcommand) -> Result<String> {
	let config = arguments.config.load()?;
	let router = OsrmRouter::new(HttpClient::new(config.fetch.timeout())?, config.endpoints.clone());
	let geometry = router.route(arguments.start, arguments.end).await?;
	Ok(serde_json::to_string(&geometry)?)
}
