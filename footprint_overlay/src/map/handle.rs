use super::{LayerSpec, Subscription, SubscriptionId};
use crate::overlay::Annotation;
use anyhow::Result;
use footprint_core::GeoBBox;
use footprint_geometry::{Coordinates, GeoCollection, GeoFeature};
use serde_json::{Value, json};

/// Events a map can deliver to a [`Subscription`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapEventKind {
	/// The viewport stopped moving.
	MoveEnd,
	/// The style finished loading.
	Load,
	/// A click hit rendered features of `layer`.
	Click { layer: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
	MoveEnd,
	Load,
	Click {
		layer: String,
		lng_lat: Coordinates,
		/// Features under the cursor, topmost first.
		features: Vec<GeoFeature>,
	},
}

impl MapEvent {
	pub fn kind(&self) -> MapEventKind {
		match self {
			MapEvent::MoveEnd => MapEventKind::MoveEnd,
			MapEvent::Load => MapEventKind::Load,
			MapEvent::Click { layer, .. } => MapEventKind::Click { layer: layer.clone() },
		}
	}
}

/// Data of a GeoJSON source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
	Collection(GeoCollection),
	Feature(GeoFeature),
}

impl SourceData {
	pub fn feature_count(&self) -> usize {
		match self {
			SourceData::Collection(collection) => collection.len(),
			SourceData::Feature(_) => 1,
		}
	}

	/// The source as a style-spec `geojson` source object.
	pub fn to_json(&self) -> serde_json::Result<Value> {
		let data = match self {
			SourceData::Collection(collection) => serde_json::to_value(collection)?,
			SourceData::Feature(feature) => serde_json::to_value(feature)?,
		};
		Ok(json!({"type": "geojson", "data": data}))
	}
}

impl From<GeoCollection> for SourceData {
	fn from(collection: GeoCollection) -> Self {
		SourceData::Collection(collection)
	}
}

impl From<GeoFeature> for SourceData {
	fn from(feature: GeoFeature) -> Self {
		SourceData::Feature(feature)
	}
}

/// A rendering engine as seen by the overlay.
///
/// Implementations wrap a concrete engine. Adding a source or layer whose id is
/// already registered must fail, as must updating or removing one that is not.
pub trait MapHandle: Send + Sync {
	/// Current (fractional) zoom level.
	fn zoom(&self) -> f64;

	/// Visible area.
	fn bounds(&self) -> GeoBBox;

	fn has_source(&self, id: &str) -> bool;
	fn add_source(&self, id: &str, data: SourceData) -> Result<()>;
	/// Replaces the data of an existing source.
	fn update_source(&self, id: &str, data: SourceData) -> Result<()>;
	fn remove_source(&self, id: &str) -> Result<()>;

	fn has_layer(&self, id: &str) -> bool;
	fn add_layer(&self, layer: LayerSpec) -> Result<()>;
	/// Removes a layer. Click subscriptions bound to it are closed.
	fn remove_layer(&self, id: &str) -> Result<()>;

	fn subscribe(&self, kind: MapEventKind) -> Subscription;
	fn unsubscribe(&self, id: SubscriptionId);

	fn show_popup(&self, annotation: Annotation);
}

#[cfg(test)]
mod tests {
	use super::*;
	use footprint_geometry::Geometry;
	use pretty_assertions::assert_eq;

	#[test]
	fn event_kind() {
		assert_eq!(MapEvent::MoveEnd.kind(), MapEventKind::MoveEnd);
		assert_eq!(MapEvent::Load.kind(), MapEventKind::Load);
		let click = MapEvent::Click {
			layer: "osmbuildings".to_string(),
			lng_lat: Coordinates::new(1.0, 2.0),
			features: vec![],
		};
		assert_eq!(
			click.kind(),
			MapEventKind::Click {
				layer: "osmbuildings".to_string()
			}
		);
	}

	#[test]
	fn source_json() {
		let feature = GeoFeature::new(Geometry::Point(Coordinates::new(1.0, 2.0)));
		let data = SourceData::from(feature.clone());
		assert_eq!(data.feature_count(), 1);
		assert_eq!(
			data.to_json().unwrap(),
			json!({"type": "geojson", "data": {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}, "properties": {}}})
		);

		let data = SourceData::from(GeoCollection::from(vec![feature.clone(), feature]));
		assert_eq!(data.feature_count(), 2);
		assert_eq!(data.to_json().unwrap()["data"]["type"], "FeatureCollection");
	}
}
