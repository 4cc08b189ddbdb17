use super::{Coordinates, PolygonGeometry, RingGeometry};
use crate::DegeneratePolygonError;
use serde::{Deserialize, Serialize};

/// A GeoJSON geometry object, `{"type": ..., "coordinates": ...}`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
	Point(Coordinates),
	MultiPoint(Vec<Coordinates>),
	LineString(Vec<Coordinates>),
	MultiLineString(Vec<Vec<Coordinates>>),
	Polygon(PolygonGeometry),
	MultiPolygon(Vec<PolygonGeometry>),
}

impl Geometry {
	#[must_use]
	pub fn type_name(&self) -> &'static str {
		match self {
			Geometry::Point(_) => "Point",
			Geometry::MultiPoint(_) => "MultiPoint",
			Geometry::LineString(_) => "LineString",
			Geometry::MultiLineString(_) => "MultiLineString",
			Geometry::Polygon(_) => "Polygon",
			Geometry::MultiPolygon(_) => "MultiPolygon",
		}
	}

	/// Outer ring of a polygon, or of the first polygon of a multipolygon.
	/// Other geometry types have no ring.
	#[must_use]
	pub fn first_ring(&self) -> Option<&RingGeometry> {
		match self {
			Geometry::Polygon(polygon) => polygon.outer_ring(),
			Geometry::MultiPolygon(polygons) => polygons.first().and_then(PolygonGeometry::outer_ring),
			_ => None,
		}
	}

	/// Centroid of [`Self::first_ring`]; a geometry without a ring counts as degenerate.
	pub fn centroid(&self) -> Result<Coordinates, DegeneratePolygonError> {
		match self.first_ring() {
			Some(ring) => ring.centroid(),
			None => Err(DegeneratePolygonError { area: 0.0 }),
		}
	}

	#[cfg(test)]
	pub fn new_example() -> Self {
		Geometry::Polygon(PolygonGeometry(vec![RingGeometry::from(vec![
			[0.0, 0.0],
			[1.0, 0.0],
			[1.0, 1.0],
			[0.0, 1.0],
			[0.0, 0.0],
		])]))
	}
}
