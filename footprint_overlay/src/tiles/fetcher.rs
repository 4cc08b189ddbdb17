//! Fetches every tile of a [`TileRange`] and merges the results.
//!
//! Tiles are requested concurrently, at most `max_concurrent_requests` at a
//! time, and merged in x-major grid order regardless of which request finished
//! first. A failing tile is logged and reported in the [`TileBatch`]; it never
//! fails the batch.

use super::{BuildingTileReader, HttpTileReader};
use crate::TileFetchError;
use anyhow::Result;
use footprint_core::{
	TileRange,
	config::{FetchConfig, OverlayConfig},
	io::HttpClient,
};
use footprint_geometry::GeoCollection;
use futures::{StreamExt, stream};
use std::sync::Arc;

/// Result of fetching one tile range.
#[derive(Debug, Default)]
pub struct TileBatch {
	/// Features of all tiles that loaded.
	pub collection: GeoCollection,
	/// One entry per tile that did not load.
	pub failures: Vec<TileFetchError>,
	/// Features dropped as duplicates (only with deduplication enabled).
	pub duplicates_removed: usize,
}

#[derive(Debug, Clone)]
pub struct BuildingTileFetcher {
	reader: Arc<dyn BuildingTileReader>,
	max_concurrent_requests: usize,
	deduplicate_features: bool,
}

impl BuildingTileFetcher {
	pub fn new(reader: Arc<dyn BuildingTileReader>, fetch: &FetchConfig) -> Self {
		Self {
			reader,
			max_concurrent_requests: fetch.max_concurrent_requests.max(1),
			deduplicate_features: fetch.deduplicate_features,
		}
	}

	/// Fetcher reading tiles over HTTP as configured in `config`.
	pub fn from_config(config: &OverlayConfig) -> Result<Self> {
		let client = HttpClient::new(config.fetch.timeout())?;
		let reader = HttpTileReader::new(client, config.endpoints.clone());
		Ok(Self::new(Arc::new(reader), &config.fetch))
	}

	/// Merged features of every tile in `range`; failed tiles are left out.
	pub async fn fetch_tiles(&self, range: &TileRange) -> GeoCollection {
		self.fetch_tiles_with_report(range).await.collection
	}

	pub async fn fetch_tiles_with_report(&self, range: &TileRange) -> TileBatch {
		log::debug!("fetch {} building tiles of {range}", range.count_tiles());

		let reader = &self.reader;
		let results = stream::iter(range.iter_coords())
			.map(|coord| async move { reader.read_tile(&coord).await })
			.buffered(self.max_concurrent_requests)
			.collect::<Vec<_>>()
			.await;

		let mut batch = TileBatch::default();
		for result in results {
			match result {
				Ok(tile) => {
					let mut features = tile.features;
					batch.collection.append(&mut features);
				}
				Err(err) => {
					log::warn!("{err}");
					batch.failures.push(err);
				}
			}
		}

		if self.deduplicate_features {
			batch.duplicates_removed = batch.collection.dedup_by_id();
		}

		log::debug!(
			"fetched {} features, {} tiles failed, {} duplicates removed",
			batch.collection.len(),
			batch.failures.len(),
			batch.duplicates_removed
		);
		batch
	}
}
