//! Inclusive tile index ranges covering a geographic bounding box.
//!
//! A `TileRange` is the rectangle of tiles `[x_min, x_max] × [y_min, y_max]` at a
//! single zoom level. Both maxima are inclusive. The range is derived from a
//! [`GeoBBox`] by flooring the projected corners, nothing is clamped:
//!
//! - `x_min`/`x_max` come from the west/east longitude,
//! - `y_min` comes from the **north** latitude and `y_max` from the south one,
//!   since tile rows are counted southwards.
//!
//! ```
//! use footprint_core::{GeoBBox, TileRange};
//!
//! let world = GeoBBox::new(-180.0, -85.0, 180.0, 85.0).unwrap();
//! let range = TileRange::from_geo(0, &world);
//! assert_eq!(range.as_tuple(), (0, 1, 0, 0));
//! assert_eq!(range.count_tiles(), 2);
//! ```

use crate::{GeoBBox, TileCoord, lat_to_tile_y, lon_to_tile_x};
use anyhow::{Result, ensure};
use itertools::Itertools;
use std::fmt::{self, Debug, Display};

#[derive(Clone, Copy, Hash, PartialEq, Eq)]
pub struct TileRange {
	/// Zoom level of the range.
	pub level: u8,
	x_min: i64,
	x_max: i64,
	y_min: i64,
	y_max: i64,
}

impl TileRange {
	/// Creates a range from inclusive minimum and maximum indices.
	///
	/// # Errors
	/// Returns an error if a minimum exceeds its maximum.
	pub fn new(level: u8, x_min: i64, x_max: i64, y_min: i64, y_max: i64) -> Result<TileRange> {
		ensure!(x_min <= x_max, "x_min ({x_min}) must be <= x_max ({x_max})");
		ensure!(y_min <= y_max, "y_min ({y_min}) must be <= y_max ({y_max})");
		Ok(TileRange {
			level,
			x_min,
			x_max,
			y_min,
			y_max,
		})
	}

	/// Tile range covering `bbox` at zoom `level`.
	///
	/// Any zoom level is accepted; levels the tile service does not publish simply
	/// yield tiles that fail to load.
	#[must_use]
	pub fn from_geo(level: u8, bbox: &GeoBBox) -> TileRange {
		TileRange {
			level,
			x_min: lon_to_tile_x(bbox.west(), level),
			x_max: lon_to_tile_x(bbox.east(), level),
			y_min: lat_to_tile_y(bbox.north(), level),
			y_max: lat_to_tile_y(bbox.south(), level),
		}
	}

	#[must_use]
	pub fn x_min(&self) -> i64 {
		self.x_min
	}

	#[must_use]
	pub fn x_max(&self) -> i64 {
		self.x_max
	}

	#[must_use]
	pub fn y_min(&self) -> i64 {
		self.y_min
	}

	#[must_use]
	pub fn y_max(&self) -> i64 {
		self.y_max
	}

	/// Returns `(x_min, x_max, y_min, y_max)`.
	#[must_use]
	pub fn as_tuple(&self) -> (i64, i64, i64, i64) {
		(self.x_min, self.x_max, self.y_min, self.y_max)
	}

	/// Number of columns, saturating at `u64::MAX`.
	#[must_use]
	pub fn width(&self) -> u64 {
		span(self.x_min, self.x_max)
	}

	/// Number of rows, saturating at `u64::MAX`.
	#[must_use]
	pub fn height(&self) -> u64 {
		span(self.y_min, self.y_max)
	}

	#[must_use]
	pub fn count_tiles(&self) -> u64 {
		self.width().saturating_mul(self.height())
	}

	#[must_use]
	pub fn contains(&self, coord: &TileCoord) -> bool {
		coord.level == self.level
			&& (self.x_min..=self.x_max).contains(&coord.x)
			&& (self.y_min..=self.y_max).contains(&coord.y)
	}

	/// Iterates all tiles of the range column by column: `x` is the outer loop,
	/// `y` the inner one.
	pub fn iter_coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
		let level = self.level;
		(self.x_min..=self.x_max)
			.cartesian_product(self.y_min..=self.y_max)
			.map(move |(x, y)| TileCoord::new(level, x, y))
	}
}

/// Length of the inclusive interval `min..=max`.
fn span(min: i64, max: i64) -> u64 {
	let length = i128::from(max) - i128::from(min) + 1;
	u64::try_from(length.max(0)).unwrap_or(u64::MAX)
}

impl Debug for TileRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}: [{}, {}, {}, {}] ({})",
			self.level,
			self.x_min,
			self.y_min,
			self.x_max,
			self.y_max,
			self.count_tiles()
		)
	}
}

impl Display for TileRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"z{} x {}..={} y {}..={}",
			self.level, self.x_min, self.x_max, self.y_min, self.y_max
		)
	}
}
