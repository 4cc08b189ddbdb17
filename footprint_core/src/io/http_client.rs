//! A small HTTP(S) client that fetches and decodes JSON documents.
//!
//! Every remote collaborator of the overlay (building tiles, reverse geocoding,
//! routing) is a plain `GET` returning JSON, so they all share this client. A
//! request is tried exactly once; failures are reported as [`HttpError`] and it
//! is up to the caller to decide whether they are fatal.
//!
//! ```rust,no_run
//! use footprint_core::io::HttpClient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Place {
//!     display_name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = HttpClient::new(None)?;
//!     let place: Place = client
//!         .get_json("https://nominatim.openstreetmap.org/reverse?format=jsonv2&lat=-6.2&lon=106.8")
//!         .await?;
//!     println!("{}", place.display_name);
//!     Ok(())
//! }
//! ```

use super::HttpError;
use anyhow::Result;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct HttpClient {
	client: Client,
}

impl HttpClient {
	/// Creates a client. Without `timeout` a request may wait indefinitely.
	pub fn new(timeout: Option<Duration>) -> Result<HttpClient> {
		let mut builder = Client::builder()
			.tcp_keepalive(Duration::from_secs(600))
			.use_rustls_tls();
		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}
		Ok(HttpClient {
			client: builder.build()?,
		})
	}

	/// Parses `url` and checks that it uses `http` or `https`.
	pub fn parse_url(url: &str) -> Result<Url, HttpError> {
		let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl {
			url: url.to_string(),
			message: e.to_string(),
		})?;
		match parsed.scheme() {
			"http" | "https" => Ok(parsed),
			other => Err(HttpError::InvalidUrl {
				url: url.to_string(),
				message: format!("unsupported scheme '{other}', expected 'http' or 'https'"),
			}),
		}
	}

	/// Fetches `url` and returns the raw body of a successful (2xx) response.
	pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, HttpError> {
		let parsed = Self::parse_url(url)?;
		log::trace!("GET {parsed}");

		let response = self.client.get(parsed).send().await.map_err(|source| HttpError::Request {
			url: url.to_string(),
			source,
		})?;

		let status = response.status();
		if !status.is_success() {
			return Err(HttpError::Status {
				url: url.to_string(),
				status,
			});
		}

		let bytes = response.bytes().await.map_err(|source| HttpError::Request {
			url: url.to_string(),
			source,
		})?;
		Ok(bytes.to_vec())
	}

	/// Fetches `url` and decodes the body as JSON into `T`.
	pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
		let bytes = self.get_bytes(url).await?;
		serde_json::from_slice(&bytes).map_err(|source| HttpError::Parse {
			url: url.to_string(),
			source,
		})
	}
}
