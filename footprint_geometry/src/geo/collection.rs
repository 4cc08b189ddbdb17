use super::GeoFeature;
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;
use std::collections::HashSet;

/// A GeoJSON `FeatureCollection`. Only the `features` array is read.
///
/// Features are read one by one: a feature that is no building (no geometry,
/// an unsupported geometry type, broken coordinates) is skipped and the rest
/// of the document is kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeoCollection {
	pub features: Vec<GeoFeature>,
}

impl GeoCollection {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.features.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}

	pub fn push(&mut self, feature: GeoFeature) {
		self.features.push(feature);
	}

	pub fn append(&mut self, features: &mut Vec<GeoFeature>) {
		self.features.append(features);
	}

	pub fn iter(&self) -> impl Iterator<Item = &GeoFeature> {
		self.features.iter()
	}

	/// Drops every feature whose id was already seen; features without an id are kept.
	/// Returns the number of removed features.
	pub fn dedup_by_id(&mut self) -> usize {
		let before = self.features.len();
		let mut seen = HashSet::new();
		self.features.retain(|feature| match feature.id_key() {
			Some(key) => seen.insert(key),
			None => true,
		});
		let removed = before - self.features.len();
		if removed > 0 {
			log::trace!("dropped {removed} duplicate features");
		}
		removed
	}

	pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Self> {
		serde_json::from_slice(bytes)
	}

	pub fn to_json_string(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}

impl From<Vec<GeoFeature>> for GeoCollection {
	fn from(features: Vec<GeoFeature>) -> Self {
		Self { features }
	}
}

impl IntoIterator for GeoCollection {
	type Item = GeoFeature;
	type IntoIter = std::vec::IntoIter<GeoFeature>;

	fn into_iter(self) -> Self::IntoIter {
		self.features.into_iter()
	}
}

impl<'de> Deserialize<'de> for GeoCollection {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		struct Document {
			features: Vec<Value>,
		}

		let document = Document::deserialize(deserializer)?;
		let features = document
			.features
			.into_iter()
			.enumerate()
			.filter_map(|(index, value)| match serde_json::from_value::<GeoFeature>(value) {
				Ok(feature) => Some(feature),
				Err(err) => {
					log::debug!("skip feature #{index}: {err}");
					None
				}
			})
			.collect();
		Ok(Self { features })
	}
}

impl Serialize for GeoCollection {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(2))?;
		map.serialize_entry("type", "FeatureCollection")?;
		map.serialize_entry("features", &self.features)?;
		map.end()
	}
}
