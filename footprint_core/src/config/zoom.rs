use anyhow::{Result, ensure};
use serde::Deserialize;

/// Inclusive window of integer zoom levels at which the overlay is rebuilt.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct ZoomRange {
	pub min: u8,
	pub max: u8,
}

impl Default for ZoomRange {
	fn default() -> Self {
		ZoomRange { min: 15, max: 16 }
	}
}

impl ZoomRange {
	pub fn validate(&self) -> Result<()> {
		ensure!(
			self.min <= self.max,
			"zoom.min ({}) must be <= zoom.max ({})",
			self.min,
			self.max
		);
		Ok(())
	}

	/// Integer level of a fractional map zoom, if it lies inside the window.
	///
	/// ```
	/// use footprint_core::config::ZoomRange;
	///
	/// let range = ZoomRange::default();
	/// assert_eq!(range.level_for(15.7), Some(15));
	/// assert_eq!(range.level_for(16.99), Some(16));
	/// assert_eq!(range.level_for(17.0), None);
	/// assert_eq!(range.level_for(14.9), None);
	/// ```
	#[must_use]
	pub fn level_for(&self, zoom: f64) -> Option<u8> {
		let level = zoom.floor();
		if level.is_nan() || level < f64::from(self.min) || level > f64::from(self.max) {
			return None;
		}
		Some(level as u8)
	}
}
