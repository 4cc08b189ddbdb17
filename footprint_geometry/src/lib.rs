//! GeoJSON building features and the polygon math used on them.

mod error;
mod geo;
pub mod math;

pub use error::*;
pub use geo::*;
