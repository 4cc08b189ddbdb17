//! Area and area-weighted centroid of a single closed ring.
//!
//! Both sums run over consecutive point pairs `(p[i], p[i + 1])` without wrapping
//! around, so the ring must repeat its first point at the end. Holes are not
//! taken into account.

use crate::{Coordinates, DegeneratePolygonError};

fn pairs(ring: &[Coordinates]) -> impl Iterator<Item = (&Coordinates, &Coordinates)> {
	ring.iter().zip(ring.iter().skip(1))
}

fn cross(a: &Coordinates, b: &Coordinates) -> f64 {
	a.x() * b.y() - b.x() * a.y()
}

/// `0.5 * Σ (x_i * y_{i+1} - x_{i+1} * y_i)`
#[must_use]
pub fn signed_area(ring: &[Coordinates]) -> f64 {
	pairs(ring).map(|(a, b)| cross(a, b)).sum::<f64>() * 0.5
}

/// Centroid of the area enclosed by `ring`.
///
/// # Errors
/// Returns [`DegeneratePolygonError`] if the ring encloses no area (or the area
/// is not a finite number), e.g. for collinear points or fewer than three points.
pub fn centroid(ring: &[Coordinates]) -> Result<Coordinates, DegeneratePolygonError> {
	let area = signed_area(ring);
	if area == 0.0 || !area.is_finite() {
		return Err(DegeneratePolygonError { area });
	}

	let (mut sx, mut sy) = (0.0, 0.0);
	for (a, b) in pairs(ring) {
		let f = cross(a, b);
		sx += (a.x() + b.x()) * f;
		sy += (a.y() + b.y()) * f;
	}

	let factor = 1.0 / (6.0 * area);
	Ok(Coordinates::new(sx * factor, sy * factor))
}
