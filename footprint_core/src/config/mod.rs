//! Immutable overlay configuration.
//!
//! Endpoints, the zoom window of the building overlay, layer identifiers, fetch
//! behaviour and the base-map style catalog are read once (usually from YAML)
//! and then shared read-only through an `Arc<OverlayConfig>`.

mod endpoints;
mod fetch;
mod layers;
mod styles;
mod zoom;

pub use endpoints::*;
pub use fetch::*;
pub use layers::*;
pub use styles::*;
pub use zoom::*;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
	sync::Arc,
};

pub const DEFAULT_GLYPHS: &str = "https://demotiles.maplibre.org/font/{fontstack}/{range}.pbf";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OverlayConfig {
	/// Remote services consumed by the overlay.
	#[serde(default)]
	pub endpoints: Endpoints,

	/// Zoom levels at which the building overlay is rebuilt.
	#[serde(default)]
	pub zoom: ZoomRange,

	/// Identifiers of the sources/layers registered on the map.
	#[serde(default)]
	pub layers: LayerIds,

	/// Tile fetching behaviour.
	#[serde(default)]
	pub fetch: FetchConfig,

	/// Base-map styles offered to the user; the first one is the default.
	#[serde(default = "default_styles")]
	pub styles: Vec<BaseMapStyle>,

	/// Glyph URL template used by generated styles.
	#[serde(default = "default_glyphs")]
	pub glyphs: String,
}

fn default_glyphs() -> String {
	DEFAULT_GLYPHS.to_string()
}

impl Default for OverlayConfig {
	fn default() -> Self {
		OverlayConfig {
			endpoints: Endpoints::default(),
			zoom: ZoomRange::default(),
			layers: LayerIds::default(),
			fetch: FetchConfig::default(),
			styles: default_styles(),
			glyphs: default_glyphs(),
		}
	}
}

impl OverlayConfig {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		let config: OverlayConfig = serde_yaml_ng::from_reader(reader)?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		let config: OverlayConfig = serde_yaml_ng::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config file {path:?}"))?;
		Self::from_reader(BufReader::new(file)).with_context(|| format!("reading config file {path:?}"))
	}

	/// Loads `path` if given, otherwise returns the defaults.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		match path {
			Some(path) => Self::from_path(path),
			None => Ok(Self::default()),
		}
	}

	pub fn validate(&self) -> Result<()> {
		self.endpoints.validate()?;
		self.zoom.validate()?;
		self.layers.validate()?;
		self.fetch.validate()?;
		for style in &self.styles {
			style.validate()?;
		}
		ensure!(!self.glyphs.is_empty(), "glyphs URL must not be empty");
		Ok(())
	}

	/// Looks up a base-map style by key.
	pub fn style(&self, key: &str) -> Option<&BaseMapStyle> {
		self.styles.iter().find(|style| style.key == key)
	}

	/// The first style of the catalog.
	pub fn default_style(&self) -> Option<&BaseMapStyle> {
		self.styles.first()
	}

	pub fn arc(self) -> Arc<Self> {
		Arc::new(self)
	}
}
