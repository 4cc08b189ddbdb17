pub use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single HTTP JSON request.
#[derive(Debug, Error)]
pub enum HttpError {
	#[error("invalid URL '{url}': {message}")]
	InvalidUrl { url: String, message: String },

	#[error("request to '{url}' failed: {source}")]
	Request {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("request to '{url}' returned HTTP {status}")]
	Status { url: String, status: StatusCode },

	#[error("response of '{url}' is not valid JSON: {source}")]
	Parse {
		url: String,
		#[source]
		source: serde_json::Error,
	},
}

impl HttpError {
	/// The URL the failed request was sent to.
	pub fn url(&self) -> &str {
		match self {
			HttpError::InvalidUrl { url, .. }
			| HttpError::Request { url, .. }
			| HttpError::Status { url, .. }
			| HttpError::Parse { url, .. } => url,
		}
	}
}
