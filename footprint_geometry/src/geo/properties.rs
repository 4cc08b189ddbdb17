//! Properties of a building feature.
//!
//! The tile service is loose about types: numbers sometimes arrive as strings
//! and names as numbers. Such values are coerced, and values that cannot be
//! coerced are treated as missing instead of failing the whole tile.

use super::RoofMaterial;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct BuildingProperties {
	#[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,

	/// Height in metres.
	#[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
	pub height: Option<f64>,

	/// Number of storeys.
	#[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
	pub levels: Option<f64>,

	#[serde(
		default,
		rename = "roofMaterial",
		deserialize_with = "lenient_roof_material",
		skip_serializing_if = "Option::is_none"
	)]
	pub roof_material: Option<RoofMaterial>,

	#[serde(
		default,
		rename = "type",
		deserialize_with = "lenient_string",
		skip_serializing_if = "Option::is_none"
	)]
	pub building_type: Option<String>,

	/// Every other property, passed through untouched.
	#[serde(flatten)]
	pub other: BTreeMap<String, Value>,
}

impl BuildingProperties {
	/// `height + levels`, each defaulting to 0.
	#[must_use]
	pub fn extrusion_height(&self) -> f64 {
		self.height.unwrap_or(0.0) + self.levels.unwrap_or(0.0)
	}
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
	Ok(match Value::deserialize(deserializer)? {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
		_ => None,
	})
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
	Ok(match Value::deserialize(deserializer)? {
		Value::String(s) => Some(s),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	})
}

fn lenient_roof_material<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<RoofMaterial>, D::Error> {
	Ok(lenient_string(deserializer)?.map(RoofMaterial::from))
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use serde_json::json;

	#[test]
	fn parse_full() {
		let properties: BuildingProperties = serde_json::from_value(json!({
			"name": "Menara BCA",
			"height": 230,
			"levels": 56,
			"roofMaterial": "glass",
			"type": "office",
			"color": "#ccc"
		}))
		.unwrap();
		assert_eq!(
			properties,
			BuildingProperties {
				name: Some("Menara BCA".to_string()),
				height: Some(230.0),
				levels: Some(56.0),
				roof_material: Some(RoofMaterial::Glass),
				building_type: Some("office".to_string()),
				other: BTreeMap::from([("color".to_string(), json!("#ccc"))]),
			}
		);
		assert_eq!(properties.extrusion_height(), 286.0);
	}

	#[test]
	fn parse_loose_values() {
		let properties: BuildingProperties = serde_json::from_value(json!({
			"name": 42,
			"height": "12.5",
			"levels": "many",
			"roofMaterial": null,
			"type": ["a"]
		}))
		.unwrap();
		assert_eq!(properties.name.as_deref(), Some("42"));
		assert_eq!(properties.height, Some(12.5));
		assert_eq!(properties.levels, None);
		assert_eq!(properties.roof_material, None);
		assert_eq!(properties.building_type, None);
		assert_eq!(properties.extrusion_height(), 12.5);
	}

	#[test]
	fn missing_values() {
		let properties: BuildingProperties = serde_json::from_str("{}").unwrap();
		assert_eq!(properties, BuildingProperties::default());
		assert_eq!(properties.extrusion_height(), 0.0);
	}

	#[test]
	fn serialize_skips_missing() {
		let properties = BuildingProperties {
			levels: Some(3.0),
			roof_material: Some(RoofMaterial::Other("stone".to_string())),
			..Default::default()
		};
		assert_eq!(
			serde_json::to_value(&properties).unwrap(),
			json!({"levels": 3.0, "roofMaterial": "stone"})
		);
	}
}
