use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// `roofMaterial` of a building. Unknown values are kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum RoofMaterial {
	Metal,
	RoofTiles,
	Concrete,
	Asphalt,
	Slate,
	Thatched,
	Shingles,
	Glass,
	Wood,
	Other(String),
}

impl RoofMaterial {
	/// All materials with a dedicated colour.
	pub const KNOWN: [RoofMaterial; 9] = [
		RoofMaterial::Metal,
		RoofMaterial::RoofTiles,
		RoofMaterial::Concrete,
		RoofMaterial::Asphalt,
		RoofMaterial::Slate,
		RoofMaterial::Thatched,
		RoofMaterial::Shingles,
		RoofMaterial::Glass,
		RoofMaterial::Wood,
	];

	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			RoofMaterial::Metal => "metal",
			RoofMaterial::RoofTiles => "roof_tiles",
			RoofMaterial::Concrete => "concrete",
			RoofMaterial::Asphalt => "asphalt",
			RoofMaterial::Slate => "slate",
			RoofMaterial::Thatched => "thatched",
			RoofMaterial::Shingles => "shingles",
			RoofMaterial::Glass => "glass",
			RoofMaterial::Wood => "wood",
			RoofMaterial::Other(value) => value,
		}
	}
}

impl From<&str> for RoofMaterial {
	fn from(value: &str) -> Self {
		match value {
			"metal" => RoofMaterial::Metal,
			"roof_tiles" => RoofMaterial::RoofTiles,
			"concrete" => RoofMaterial::Concrete,
			"asphalt" => RoofMaterial::Asphalt,
			"slate" => RoofMaterial::Slate,
			"thatched" => RoofMaterial::Thatched,
			"shingles" => RoofMaterial::Shingles,
			"glass" => RoofMaterial::Glass,
			"wood" => RoofMaterial::Wood,
			other => RoofMaterial::Other(other.to_string()),
		}
	}
}

impl From<String> for RoofMaterial {
	fn from(value: String) -> Self {
		match RoofMaterial::from(value.as_str()) {
			RoofMaterial::Other(_) => RoofMaterial::Other(value),
			known => known,
		}
	}
}

impl From<RoofMaterial> for String {
	fn from(value: RoofMaterial) -> Self {
		match value {
			RoofMaterial::Other(value) => value,
			known => known.as_str().to_string(),
		}
	}
}

impl Display for RoofMaterial {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
