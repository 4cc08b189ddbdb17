use super::Coordinates;
use crate::{DegeneratePolygonError, math};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A closed ring of positions, the first and last point are expected to be equal.
#[derive(Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RingGeometry(pub Vec<Coordinates>);

impl RingGeometry {
	#[must_use]
	pub fn new(coordinates: Vec<Coordinates>) -> Self {
		Self(coordinates)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	#[must_use]
	pub fn as_slice(&self) -> &[Coordinates] {
		&self.0
	}

	/// Signed area (shoelace), positive for counterclockwise rings.
	#[must_use]
	pub fn area(&self) -> f64 {
		math::signed_area(&self.0)
	}

	pub fn centroid(&self) -> Result<Coordinates, DegeneratePolygonError> {
		math::centroid(&self.0)
	}
}

impl<T: Into<Coordinates>> From<Vec<T>> for RingGeometry {
	fn from(value: Vec<T>) -> Self {
		Self(value.into_iter().map(Into::into).collect())
	}
}

impl Debug for RingGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}
