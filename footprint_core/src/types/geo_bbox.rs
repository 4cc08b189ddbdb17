use anyhow::{Context, Result, ensure};
use std::{fmt::Debug, str::FromStr};

/// A geographical bounding box, usually the visible area of the map.
///
/// West/east are longitudes (`x_min`/`x_max`), south/north latitudes
/// (`y_min`/`y_max`), all in degrees.
///
/// Longitudes are not wrapped or clamped: a viewport that was panned across the
/// antimeridian may report values beyond ±180 and they are kept as reported.
///
/// # Examples
/// ```
/// use footprint_core::GeoBBox;
///
/// let bbox = GeoBBox::new(106.81, -6.21, 106.83, -6.19).unwrap();
/// assert_eq!(bbox.as_tuple(), (106.81, -6.21, 106.83, -6.19));
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct GeoBBox {
	pub x_min: f64,
	pub y_min: f64,
	pub x_max: f64,
	pub y_max: f64,
}

impl GeoBBox {
	/// Creates a new `GeoBBox` from `west, south, east, north`.
	///
	/// # Errors
	/// Returns an error if a value is not finite, a latitude lies outside
	/// `[-90, 90]`, or the box is inverted.
	pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<GeoBBox> {
		GeoBBox {
			x_min,
			y_min,
			x_max,
			y_max,
		}
		.checked()
	}

	#[must_use]
	pub fn west(&self) -> f64 {
		self.x_min
	}

	#[must_use]
	pub fn south(&self) -> f64 {
		self.y_min
	}

	#[must_use]
	pub fn east(&self) -> f64 {
		self.x_max
	}

	#[must_use]
	pub fn north(&self) -> f64 {
		self.y_max
	}

	/// Returns the bounding box as `[west, south, east, north]`.
	#[must_use]
	pub fn as_array(&self) -> [f64; 4] {
		[self.x_min, self.y_min, self.x_max, self.y_max]
	}

	/// Returns the bounding box as a tuple `(x_min, y_min, x_max, y_max)`.
	#[must_use]
	pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
		(self.x_min, self.y_min, self.x_max, self.y_max)
	}

	/// Center of the box as `[lon, lat]`.
	#[must_use]
	pub fn center(&self) -> [f64; 2] {
		[(self.x_min + self.x_max) / 2.0, (self.y_min + self.y_max) / 2.0]
	}

	fn checked(self) -> Result<Self> {
		ensure!(
			self.as_array().iter().all(|v| v.is_finite()),
			"bbox values must be finite, got {:?}",
			self
		);
		ensure!(self.y_min >= -90., "y_min ({}) must be >= -90", self.y_min);
		ensure!(self.y_max <= 90., "y_max ({}) must be <= 90", self.y_max);
		ensure!(
			self.x_min <= self.x_max,
			"x_min ({}) must be <= x_max ({})",
			self.x_min,
			self.x_max
		);
		ensure!(
			self.y_min <= self.y_max,
			"y_min ({}) must be <= y_max ({})",
			self.y_min,
			self.y_max
		);
		Ok(self)
	}
}

impl Debug for GeoBBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"GeoBBox({}, {}, {}, {})",
			self.x_min, self.y_min, self.x_max, self.y_max
		)
	}
}

impl TryFrom<Vec<f64>> for GeoBBox {
	type Error = anyhow::Error;

	fn try_from(input: Vec<f64>) -> Result<Self> {
		ensure!(
			input.len() == 4,
			"GeoBBox must have 4 elements (west, south, east, north), got {}",
			input.len()
		);
		GeoBBox::new(input[0], input[1], input[2], input[3])
	}
}

impl FromStr for GeoBBox {
	type Err = anyhow::Error;

	/// Parses `"west,south,east,north"`.
	fn from_str(s: &str) -> Result<Self> {
		let values = s
			.split(',')
			.map(|part| {
				part
					.trim()
					.parse::<f64>()
					.with_context(|| format!("invalid number '{}' in bbox '{s}'", part.trim()))
			})
			.collect::<Result<Vec<f64>>>()?;
		GeoBBox::try_from(values).with_context(|| format!("invalid bbox '{s}'"))
	}
}
