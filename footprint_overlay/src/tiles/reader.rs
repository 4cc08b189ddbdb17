use crate::TileFetchError;
use anyhow::Result;
use async_trait::async_trait;
use footprint_core::{TileCoord, config::Endpoints, io::HttpClient};
use footprint_geometry::GeoCollection;
use std::fmt::Debug;

/// Source of per-tile building collections.
#[async_trait]
pub trait BuildingTileReader: Debug + Send + Sync {
	/// Loads the buildings of one tile.
	async fn read_tile(&self, coord: &TileCoord) -> Result<GeoCollection, TileFetchError>;
}

/// Reads `{base}/{z}/{x}/{y}.json` documents over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTileReader {
	client: HttpClient,
	endpoints: Endpoints,
}

impl HttpTileReader {
	pub fn new(client: HttpClient, endpoints: Endpoints) -> Self {
		Self { client, endpoints }
	}

	pub fn tile_url(&self, coord: &TileCoord) -> String {
		self.endpoints.tile_url(coord)
	}
}

#[async_trait]
impl BuildingTileReader for HttpTileReader {
	async fn read_tile(&self, coord: &TileCoord) -> Result<GeoCollection, TileFetchError> {
		let url = self.tile_url(coord);
		log::trace!("read building tile {coord} from {url}");
		self.client
			.get_json::<GeoCollection>(&url)
			.await
			.map_err(|source| TileFetchError { coord: *coord, source })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use footprint_core::io::{HttpError, testing::TestServer};

	#[tokio::test]
	async fn read_tiles() {
		let server = TestServer::start(vec![
			(
				"/tile/15/26106/16949.json",
				200,
				r#"{"type":"FeatureCollection","features":[{"type":"Feature","id":1,"geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]},"properties":{}}]}"#,
			),
			("/tile/15/26107/16949.json", 200, "<html>oops</html>"),
		])
		.await
		.unwrap();
		let endpoints = Endpoints {
			building_tiles: server.url("/tile"),
			..Endpoints::default()
		};
		let reader = HttpTileReader::new(HttpClient::new(None).unwrap(), endpoints);

		let collection = reader.read_tile(&TileCoord::new(15, 26106, 16949)).await.unwrap();
		assert_eq!(collection.len(), 1);

		let err = reader.read_tile(&TileCoord::new(15, 26107, 16949)).await.unwrap_err();
		assert_eq!(err.coord, TileCoord::new(15, 26107, 16949));
		assert!(matches!(err.source, HttpError::Parse { .. }));

		let err = reader.read_tile(&TileCoord::new(15, 1, 1)).await.unwrap_err();
		assert!(matches!(err.source, HttpError::Status { .. }));
		assert!(err.to_string().starts_with("failed to load building tile 15/1/1"), "{err}");
	}

	#[tokio::test]
	async fn feature_without_geometry_keeps_the_tile() {
		let server = TestServer::start(vec![(
			"/tile/16/52212/33897.json",
			200,
			r#"{"type":"FeatureCollection","features":[
				{"type":"Feature","id":"a","geometry":null,"properties":{}},
				{"type":"Feature","id":"b","geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]},"properties":{"levels":2}}
			]}"#,
		)])
		.await
		.unwrap();
		let endpoints = Endpoints {
			building_tiles: server.url("/tile"),
			..Endpoints::default()
		};
		let reader = HttpTileReader::new(HttpClient::new(None).unwrap(), endpoints);

		let collection = reader.read_tile(&TileCoord::new(16, 52212, 33897)).await.unwrap();
		assert_eq!(collection.len(), 1);
		assert_eq!(collection.features[0].id_key().as_deref(), Some("b"));
	}
}
