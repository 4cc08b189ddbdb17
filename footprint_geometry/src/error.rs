use thiserror::Error;

/// The ring encloses no area (collinear or repeated points), so it has no centroid.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("the polygon is degenerate (area {area}); no valid centroid exists")]
pub struct DegeneratePolygonError {
	pub area: f64,
}
