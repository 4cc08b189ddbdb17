//! Slippy-map tile coordinates in the Web-Mercator tile pyramid.
//!
//! Tile `x` grows eastwards from the antimeridian and tile `y` grows southwards
//! from the northern edge of the projection, so the northern edge of a viewport
//! maps to the *smaller* `y` index.
//!
//! ```
//! use footprint_core::TileCoord;
//!
//! let coord = TileCoord::from_geo(106.816666, -6.2, 15);
//! assert_eq!((coord.level, coord.x, coord.y), (15, 26106, 16949));
//! assert_eq!(coord.to_string(), "15/26106/16949");
//! ```

use std::{
	f64::consts::PI,
	fmt::{self, Debug, Display},
};

/// A tile coordinate with zoom level, x and y index.
///
/// Indices are signed and unclamped: coordinates outside the Web-Mercator
/// domain produce indices outside `0..2^level`, which the tile service answers
/// like any other unknown tile.
#[derive(Eq, PartialEq, Clone, Hash, Copy)]
pub struct TileCoord {
	/// The zoom level of the tile.
	pub level: u8,
	/// The x index of the tile.
	pub x: i64,
	/// The y index of the tile.
	pub y: i64,
}

impl TileCoord {
	#[must_use]
	pub fn new(level: u8, x: i64, y: i64) -> TileCoord {
		TileCoord { level, x, y }
	}

	/// Tile containing the geographic position `(lon, lat)` at zoom `level`.
	#[must_use]
	pub fn from_geo(lon: f64, lat: f64, level: u8) -> TileCoord {
		TileCoord {
			level,
			x: lon_to_tile_x(lon, level),
			y: lat_to_tile_y(lat, level),
		}
	}

	/// Northwest corner of the tile as `[lon, lat]` in degrees.
	#[must_use]
	pub fn as_geo(&self) -> [f64; 2] {
		let zoom = tile_count(self.level);
		let x = self.x as f64;
		let y = self.y as f64;
		[
			x / zoom * 360.0 - 180.0,
			(PI * (1.0 - 2.0 * y / zoom)).sinh().atan().to_degrees(),
		]
	}
}

/// Number of tiles along one axis at `level`, i.e. `2^level`.
fn tile_count(level: u8) -> f64 {
	2.0f64.powi(i32::from(level))
}

/// `floor((lon + 180) / 360 * 2^level)`
#[must_use]
pub fn lon_to_tile_x(lon: f64, level: u8) -> i64 {
	((lon + 180.0) / 360.0 * tile_count(level)).floor() as i64
}

/// `floor((1 - ln(tan(lat) + sec(lat)) / π) / 2 * 2^level)`
#[must_use]
pub fn lat_to_tile_y(lat: f64, level: u8) -> i64 {
	let lat = lat.to_radians();
	let mercator = (lat.tan() + 1.0 / lat.cos()).ln();
	((1.0 - mercator / PI) / 2.0 * tile_count(level)).floor() as i64
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", self.level, self.x, self.y)
	}
}

impl Display for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}/{}", self.level, self.x, self.y)
	}
}
