use anyhow::{Result, ensure};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct FetchConfig {
	/// Upper bound of tile requests in flight per rebuild.
	pub max_concurrent_requests: usize,

	/// Per-request timeout. `None` waits as long as the server takes.
	pub timeout_seconds: Option<u64>,

	/// Drop features whose `id` was already seen in the same batch.
	pub deduplicate_features: bool,
}

impl Default for FetchConfig {
	fn default() -> Self {
		FetchConfig {
			max_concurrent_requests: 8,
			timeout_seconds: None,
			deduplicate_features: false,
		}
	}
}

impl FetchConfig {
	pub fn validate(&self) -> Result<()> {
		ensure!(
			self.max_concurrent_requests >= 1,
			"fetch.max_concurrent_requests must be at least 1"
		);
		Ok(())
	}

	#[must_use]
	pub fn timeout(&self) -> Option<Duration> {
		self.timeout_seconds.map(Duration::from_secs)
	}
}
