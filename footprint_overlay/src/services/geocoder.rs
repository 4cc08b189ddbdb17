use crate::GeocodeLookupError;
use async_trait::async_trait;
use footprint_core::{config::Endpoints, io::HttpClient};
use serde::Deserialize;

/// Resolves a position to a human readable address.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
	async fn reverse(&self, lon: f64, lat: f64) -> Result<String, GeocodeLookupError>;
}

/// Reverse geocoding against a Nominatim compatible `reverse` endpoint.
pub struct NominatimGeocoder {
	client: HttpClient,
	endpoints: Endpoints,
}

#[derive(Deserialize)]
struct ReverseResponse {
	#[serde(default)]
	display_name: Option<String>,
}

impl NominatimGeocoder {
	pub fn new(client: HttpClient, endpoints: Endpoints) -> Self {
		Self { client, endpoints }
	}
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
	async fn reverse(&self, lon: f64, lat: f64) -> Result<String, GeocodeLookupError> {
		let url = self.endpoints.reverse_geocode_url(lon, lat);
		let response: ReverseResponse = self.client.get_json(&url).await?;
		match response.display_name {
			Some(name) if !name.trim().is_empty() => Ok(name),
			_ => Err(GeocodeLookupError::Empty),
		}
	}
}
