use super::ConfigArgs;
use anyhow::Result;
use clap::Args;
use footprint_core::io::HttpClient;
use footprint_overlay::{
	Annotation,
	services::{NominatimGeocoder, ReverseGeocoder},
};

#[derive(Args, Debug)]
#[command(
	arg_required_else_help = true,
	disable_version_flag = true,
	allow_negative_numbers = true
)]
pub struct Subcommand {
	/// longitude in degrees
	lon: f64,

	/// latitude in degrees
	lat: f64,

	/// fail instead of printing a placeholder when no address is found
	#[arg(long)]
	strict: bool,

	#[command(flatten)]
	config: ConfigArgs,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	println!("{}", execute(arguments).await?);
	Ok(())
}

async fn execute(arguments: &Subcommand) -> Result<String> {
	let config = arguments.config.load()?;
	let geocoder = NominatimGeocoder::new(HttpClient::new(config.fetch.timeout())?, config.endpoints.clone());

	match geocoder.reverse(arguments.lon, arguments.lat).await {
		Ok(address) => Ok(address),
		Err(err) if !arguments.strict => {
			log::warn!("reverse geocoding {},{} failed: {err}", arguments.lon, arguments.lat);
			Ok(Annotation::DEFAULT_ADDRESS.to_string())
		}
		Err(err) => Err(err.into()),
	}
}
