//! A scripted tile reader for tests.

use super::BuildingTileReader;
use crate::TileFetchError;
use async_trait::async_trait;
use footprint_core::{
	TileCoord,
	io::{HttpError, StatusCode},
};
use footprint_geometry::{GeoCollection, GeoFeature, Geometry, PolygonGeometry, RingGeometry};
use parking_lot::Mutex;
use std::{collections::HashMap, time::Duration};

/// Serves canned collections per tile. Unlisted tiles are empty.
#[derive(Debug, Default)]
pub struct MockTileReader {
	tiles: HashMap<TileCoord, GeoCollection>,
	failures: HashMap<TileCoord, u16>,
	delays: HashMap<TileCoord, Duration>,
	requests: Mutex<Vec<TileCoord>>,
}

impl MockTileReader {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_tile(mut self, coord: TileCoord, features: Vec<GeoFeature>) -> Self {
		self.tiles.insert(coord, GeoCollection::from(features));
		self
	}

	/// The tile answers with HTTP `status`.
	pub fn with_failure(mut self, coord: TileCoord, status: u16) -> Self {
		self.failures.insert(coord, status);
		self
	}

	/// The tile answers after `delay` (tokio time).
	pub fn with_delay(mut self, coord: TileCoord, delay: Duration) -> Self {
		self.delays.insert(coord, delay);
		self
	}

	pub fn requests(&self) -> Vec<TileCoord> {
		self.requests.lock().clone()
	}
}

#[async_trait]
impl BuildingTileReader for MockTileReader {
	async fn read_tile(&self, coord: &TileCoord) -> Result<GeoCollection, TileFetchError> {
		self.requests.lock().push(*coord);
		if let Some(delay) = self.delays.get(coord) {
			tokio::time::sleep(*delay).await;
		}
		if let Some(status) = self.failures.get(coord) {
			return Err(TileFetchError {
				coord: *coord,
				source: HttpError::Status {
					url: format!("mock://{coord}.json"),
					status: StatusCode::from_u16(*status).unwrap(),
				},
			});
		}
		Ok(self.tiles.get(coord).cloned().unwrap_or_default())
	}
}

/// A unit square building at `(x, y)` with the given id and name.
pub fn building(id: i64, x: f64, y: f64, name: &str) -> GeoFeature {
	let ring = RingGeometry::from(vec![[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0], [x, y]]);
	let mut feature = GeoFeature::new(Geometry::Polygon(PolygonGeometry::new(vec![ring])));
	feature.set_id(id);
	feature.properties.name = Some(name.to_string());
	feature
}
