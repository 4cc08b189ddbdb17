use crate::TileCoord;
use anyhow::{Result, ensure};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Endpoints {
	/// Base URL of the building tiles, requested as `{base}/{z}/{x}/{y}.json`.
	pub building_tiles: String,

	/// Reverse-geocoding endpoint (Nominatim compatible).
	pub reverse_geocode: String,

	/// Routing endpoint (OSRM compatible), including the profile.
	pub route: String,
}

impl Default for Endpoints {
	fn default() -> Self {
		Endpoints {
			building_tiles: String::from("https://data.osmbuildings.org/0.2/59fcc2e8/tile"),
			reverse_geocode: String::from("https://nominatim.openstreetmap.org/reverse"),
			route: String::from("https://router.project-osrm.org/route/v1/driving"),
		}
	}
}

impl Endpoints {
	pub fn validate(&self) -> Result<()> {
		for (name, url) in [
			("building_tiles", &self.building_tiles),
			("reverse_geocode", &self.reverse_geocode),
			("route", &self.route),
		] {
			ensure!(
				url.starts_with("http://") || url.starts_with("https://"),
				"endpoint '{name}' must be an http(s) URL, got '{url}'"
			);
		}
		Ok(())
	}

	/// ```
	/// use footprint_core::{TileCoord, config::Endpoints};
	///
	/// let url = Endpoints::default().tile_url(&TileCoord::new(16, 52212, 33897));
	/// assert_eq!(url, "https://data.osmbuildings.org/0.2/59fcc2e8/tile/16/52212/33897.json");
	/// ```
	#[must_use]
	pub fn tile_url(&self, coord: &TileCoord) -> String {
		format!(
			"{}/{}/{}/{}.json",
			self.building_tiles.trim_end_matches('/'),
			coord.level,
			coord.x,
			coord.y
		)
	}

	#[must_use]
	pub fn reverse_geocode_url(&self, lon: f64, lat: f64) -> String {
		let separator = if self.reverse_geocode.contains('?') { '&' } else { '?' };
		format!(
			"{}{separator}format=jsonv2&lat={lat}&lon={lon}",
			self.reverse_geocode
		)
	}

	#[must_use]
	pub fn route_url(&self, start: [f64; 2], end: [f64; 2]) -> String {
		format!(
			"{}/{},{};{},{}?overview=full&geometries=geojson",
			self.route.trim_end_matches('/'),
			start[0],
			start[1],
			end[0],
			end[1]
		)
	}
}
