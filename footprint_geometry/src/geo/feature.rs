use super::{BuildingProperties, Coordinates, Geometry, RingGeometry};
use crate::DegeneratePolygonError;
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

/// A GeoJSON `Feature` describing one building.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GeoFeature {
	#[serde(default)]
	pub id: Option<Value>,
	pub geometry: Geometry,
	#[serde(default, deserialize_with = "null_as_default")]
	pub properties: BuildingProperties,
}

fn null_as_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BuildingProperties, D::Error> {
	Ok(Option::<BuildingProperties>::deserialize(deserializer)?.unwrap_or_default())
}

impl GeoFeature {
	#[must_use]
	pub fn new(geometry: Geometry) -> Self {
		Self {
			id: None,
			geometry,
			properties: BuildingProperties::default(),
		}
	}

	pub fn set_id(&mut self, id: impl Into<Value>) {
		self.id = Some(id.into());
	}

	pub fn set_properties(&mut self, properties: BuildingProperties) {
		self.properties = properties;
	}

	/// Identifier as a string key, `None` for features without an id.
	#[must_use]
	pub fn id_key(&self) -> Option<String> {
		match self.id.as_ref()? {
			Value::Null => None,
			Value::String(s) => Some(s.clone()),
			other => Some(other.to_string()),
		}
	}

	#[must_use]
	pub fn first_ring(&self) -> Option<&RingGeometry> {
		self.geometry.first_ring()
	}

	pub fn centroid(&self) -> Result<Coordinates, DegeneratePolygonError> {
		self.geometry.centroid()
	}

	pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
		serde_json::from_str(text)
	}

	#[cfg(test)]
	pub fn new_example() -> Self {
		Self {
			id: Some(Value::from(13)),
			geometry: Geometry::new_example(),
			properties: BuildingProperties {
				name: Some("Nice".to_string()),
				height: Some(10.0),
				..Default::default()
			},
		}
	}
}

impl Serialize for GeoFeature {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(None)?;
		map.serialize_entry("type", "Feature")?;
		if let Some(id) = &self.id {
			map.serialize_entry("id", id)?;
		}
		map.serialize_entry("geometry", &self.geometry)?;
		map.serialize_entry("properties", &self.properties)?;
		map.end()
	}
}
