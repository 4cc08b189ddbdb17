use super::RingGeometry;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// An outer ring followed by optional holes.
#[derive(Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PolygonGeometry(pub Vec<RingGeometry>);

impl PolygonGeometry {
	#[must_use]
	pub fn new(rings: Vec<RingGeometry>) -> Self {
		Self(rings)
	}

	#[must_use]
	pub fn outer_ring(&self) -> Option<&RingGeometry> {
		self.0.first()
	}
}

impl Debug for PolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}
