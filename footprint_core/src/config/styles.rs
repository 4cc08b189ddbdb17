use anyhow::{Result, ensure};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::LazyLock;

/// A raster XYZ base map the user can switch to.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BaseMapStyle {
	pub key: String,
	pub title: String,
	/// Tile URL template with `{z}`, `{x}` and `{y}` placeholders.
	pub url: String,
}

pub(super) fn default_styles() -> Vec<BaseMapStyle> {
	vec![
		BaseMapStyle::new(
			"defaultSetting",
			"Light (default)",
			"https://basemaps.cartocdn.com/light_all/{z}/{x}/{y}.png",
		),
		BaseMapStyle::new(
			"nightMapSetting",
			"Dark",
			"https://basemaps.cartocdn.com/dark_all/{z}/{x}/{y}.png",
		),
		BaseMapStyle::new(
			"lightMapSetting",
			"Bright",
			"https://basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}.png",
		),
		BaseMapStyle::new(
			"streetMapSetting",
			"Streets",
			"https://tile.openstreetmap.org/{z}/{x}/{y}.png",
		),
		BaseMapStyle::new(
			"satelliteMapSetting",
			"Satellite Hybrid",
			"https://mt1.google.com/vt/lyrs=y&x={x}&y={y}&z={z}&apistyle=s.t:2|s.e:l|p.v:off,s.t:4|s.e:l|p.v:off",
		),
	]
}

static RE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([xyz])\}").unwrap());

impl BaseMapStyle {
	pub fn new(key: &str, title: &str, url: &str) -> BaseMapStyle {
		BaseMapStyle {
			key: key.to_string(),
			title: title.to_string(),
			url: url.to_string(),
		}
	}

	pub fn validate(&self) -> Result<()> {
		ensure!(!self.key.is_empty(), "style key must not be empty");
		let mut found = RE_PLACEHOLDER
			.captures_iter(&self.url)
			.map(|caps| caps[1].to_string())
			.collect::<Vec<_>>();
		found.sort();
		found.dedup();
		ensure!(
			found == ["x", "y", "z"],
			"style '{}' URL must contain {{z}}, {{x}} and {{y}}: '{}'",
			self.key,
			self.url
		);
		Ok(())
	}

	/// MapLibre style document (version 8) showing this raster base map.
	pub fn to_style_json(&self, glyphs: &str) -> Value {
		json!({
			"version": 8,
			"glyphs": glyphs,
			"sources": {
				"xyz": {
					"type": "raster",
					"tiles": [self.url],
					"tileSize": 256
				}
			},
			"layers": [{
				"id": "xyz-layer",
				"type": "raster",
				"source": "xyz",
				"minzoom": 0,
				"maxzoom": 22
			}]
		})
	}
}
