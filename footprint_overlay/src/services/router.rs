use crate::RouteLookupError;
use async_trait::async_trait;
use footprint_core::{config::Endpoints, io::HttpClient};
use footprint_geometry::{Coordinates, Geometry};
use serde::Deserialize;

/// Finds a route between two positions.
#[async_trait]
pub trait RouteService: Send + Sync {
	async fn route(&self, start: Coordinates, end: Coordinates) -> Result<Geometry, RouteLookupError>;
}

/// Routing against an OSRM compatible `route` endpoint; the first route wins.
pub struct OsrmRouter {
	client: HttpClient,
	endpoints: Endpoints,
}

#[derive(Deserialize)]
struct RouteResponse {
	#[serde(default)]
	routes: Vec<RouteEntry>,
}

#[derive(Deserialize)]
struct RouteEntry {
	geometry: Geometry,
}

impl OsrmRouter {
	pub fn new(client: HttpClient, endpoints: Endpoints) -> Self {
		Self { client, endpoints }
	}
}

#[async_trait]
impl RouteService for OsrmRouter {
	async fn route(&self, start: Coordinates, end: Coordinates) -> Result<Geometry, RouteLookupError> {
		let url = self.endpoints.route_url(start.into(), end.into());
		let response: RouteResponse = self.client.get_json(&url).await?;
		response
			.routes
			.into_iter()
			.next()
			.map(|route| route.geometry)
			.ok_or(RouteLookupError::NoRoute)
	}
}
