//! Paint and layout of the overlay layers.
//!
//! Each rule exists as a style-spec expression the engine evaluates
//! (`paint`/`layout`) and as plain Rust (`color_for`, `height_for`). Both must
//! agree.

use footprint_geometry::{BuildingProperties, RoofMaterial};
use serde_json::{Value, json};

pub const DEFAULT_ROOF_COLOR: &str = "#eeeeee";

/// Extruded building footprints, coloured by roof material.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrusionStyle {
	pub opacity: f64,
}

impl Default for ExtrusionStyle {
	fn default() -> Self {
		Self { opacity: 0.9 }
	}
}

impl ExtrusionStyle {
	pub fn color_for(material: Option<&RoofMaterial>) -> &'static str {
		match material {
			Some(RoofMaterial::Metal) => "#B0C4DE",
			Some(RoofMaterial::RoofTiles) => "#FF6347",
			Some(RoofMaterial::Concrete) => "#808080",
			Some(RoofMaterial::Asphalt) => "#696969",
			Some(RoofMaterial::Slate) => "#708090",
			Some(RoofMaterial::Thatched) => "#DEB887",
			Some(RoofMaterial::Shingles) => "#A52A2A",
			Some(RoofMaterial::Glass) => "#87CEEB",
			Some(RoofMaterial::Wood) => "#8B4513",
			Some(RoofMaterial::Other(_)) | None => DEFAULT_ROOF_COLOR,
		}
	}

	/// `height + levels`, missing values count as 0.
	pub fn height_for(properties: &BuildingProperties) -> f64 {
		properties.extrusion_height()
	}

	pub fn paint(&self) -> Value {
		let mut color = vec![json!("match"), json!(["get", "roofMaterial"])];
		for material in &RoofMaterial::KNOWN {
			color.push(json!(material.as_str()));
			color.push(json!(Self::color_for(Some(material))));
		}
		color.push(json!(DEFAULT_ROOF_COLOR));

		json!({
			"fill-extrusion-opacity": self.opacity,
			"fill-extrusion-height": [
				"+",
				["coalesce", ["get", "height"], 0],
				["coalesce", ["get", "levels"], 0]
			],
			"fill-extrusion-color": color
		})
	}
}

/// Building names drawn above the footprints.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
	pub size: f64,
	pub offset: [f64; 2],
	pub color: String,
	pub halo_color: String,
	pub halo_width: f64,
}

impl Default for LabelStyle {
	fn default() -> Self {
		Self {
			size: 12.0,
			offset: [0.0, 1.0],
			color: "#333333".to_string(),
			halo_color: "#FFFFFF".to_string(),
			halo_width: 1.0,
		}
	}
}

impl LabelStyle {
	pub fn layout(&self) -> Value {
		json!({
			"text-field": ["get", "name"],
			"text-size": self.size,
			"text-offset": self.offset,
			"text-allow-overlap": false,
			"text-pitch-alignment": "viewport"
		})
	}

	pub fn paint(&self) -> Value {
		json!({
			"text-color": self.color,
			"text-halo-color": self.halo_color,
			"text-halo-width": self.halo_width
		})
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteLineStyle {
	pub color: String,
	pub width: f64,
}

impl Default for RouteLineStyle {
	fn default() -> Self {
		Self {
			color: "#ff7e5f".to_string(),
			width: 4.0,
		}
	}
}

impl RouteLineStyle {
	pub fn layout(&self) -> Value {
		json!({"line-cap": "round", "line-join": "round"})
	}

	pub fn paint(&self) -> Value {
		json!({"line-color": self.color, "line-width": self.width})
	}
}
