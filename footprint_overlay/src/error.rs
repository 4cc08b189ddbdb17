use footprint_core::{TileCoord, io::HttpError};
use thiserror::Error;

/// A single building tile could not be loaded. Only that tile is lost.
#[derive(Debug, Error)]
#[error("failed to load building tile {coord}: {source}")]
pub struct TileFetchError {
	pub coord: TileCoord,
	#[source]
	pub source: HttpError,
}

#[derive(Debug, Error)]
pub enum GeocodeLookupError {
	#[error("reverse geocoding failed: {0}")]
	Http(#[from] HttpError),

	#[error("reverse geocoding returned no address")]
	Empty,
}

#[derive(Debug, Error)]
pub enum RouteLookupError {
	#[error("route lookup failed: {0}")]
	Http(#[from] HttpError),

	#[error("no route found")]
	NoRoute,
}
