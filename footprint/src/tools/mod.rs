pub mod fetch;
pub mod geocode;
pub mod overlay;
pub mod route;
pub mod style;
pub mod tiles;

use anyhow::{Context, Result, ensure};
use clap::Args;
use footprint_core::config::OverlayConfig;
use footprint_geometry::Coordinates;
use std::{path::PathBuf, sync::Arc};

#[derive(Args, Debug)]
pub struct ConfigArgs {
	/// YAML configuration file; defaults apply without one
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,
}

impl ConfigArgs {
	pub fn load(&self) -> Result<Arc<OverlayConfig>> {
		Ok(OverlayConfig::load(self.config.as_deref())?.arc())
	}
}

/// Parses `"lon,lat"`.
pub fn parse_position(text: &str) -> Result<Coordinates> {
	let values = text
		.split(',')
		.map(|value| {
			value
				.trim()
				.parse::<f64>()
				.with_context(|| format!("invalid number '{value}' in position '{text}'"))
		})
		.collect::<Result<Vec<_>>>()?;
	ensure!(values.len() == 2, "position must be 'lon,lat', got '{text}'");
	ensure!(
		values.iter().all(|v| v.is_finite()),
		"position values must be finite, got '{text}'"
	);
	Ok(Coordinates::new(values[0], values[1]))
}

#[cfg(test)]
pub mod testing {
	use footprint_core::io::testing::TestServer;
	use std::io::Write;
	use tempfile::NamedTempFile;

	/// A config file pointing every endpoint at `server`.
	pub fn config_file(server: &TestServer) -> NamedTempFile {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(
			file,
			"endpoints:\n  building_tiles: {}\n  reverse_geocode: {}\n  route: {}",
			server.url("/tile"),
			server.url("/reverse"),
			server.url("/route")
		)
		.unwrap();
		file
	}

	pub const TILE: &str = r#"{"type":"FeatureCollection","features":[
		{"type":"Feature","id":"w1","geometry":{"type":"Polygon","coordinates":[[[106.8165,-6.2001],[106.8168,-6.2001],[106.8168,-6.1998],[106.8165,-6.1998],[106.8165,-6.2001]]]},"properties":{"name":"Tower","height":40,"roofMaterial":"glass"}},
		{"type":"Feature","id":"w2","geometry":{"type":"Polygon","coordinates":[[[106.817,-6.2001],[106.8172,-6.2001],[106.8172,-6.1999],[106.817,-6.2001]]]},"properties":{"levels":3}}
	]}"#;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn positions() {
		assert_eq!(parse_position("106.8,-6.2").unwrap(), Coordinates::new(106.8, -6.2));
		assert_eq!(parse_position(" 1 , 2 ").unwrap(), Coordinates::new(1.0, 2.0));
		assert!(parse_position("1").is_err());
		assert!(parse_position("1,2,3").is_err());
		assert!(parse_position("a,2").is_err());
		assert!(parse_position("inf,2").is_err());
	}
}
