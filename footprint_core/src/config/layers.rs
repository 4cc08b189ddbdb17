use anyhow::{Result, ensure};
use serde::Deserialize;

/// Identifiers under which the overlay registers sources and layers.
///
/// The building source shares its id with the extrusion layer.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct LayerIds {
	pub buildings: String,
	pub labels: String,
	pub route: String,
}

impl Default for LayerIds {
	fn default() -> Self {
		LayerIds {
			buildings: String::from("osmbuildings"),
			labels: String::from("osmbuildingslabels"),
			route: String::from("route-layer"),
		}
	}
}

impl LayerIds {
	pub fn validate(&self) -> Result<()> {
		ensure!(
			!self.buildings.is_empty() && !self.labels.is_empty() && !self.route.is_empty(),
			"layer ids must not be empty"
		);
		ensure!(
			self.buildings != self.labels && self.buildings != self.route && self.labels != self.route,
			"layer ids must be distinct"
		);
		Ok(())
	}
}
