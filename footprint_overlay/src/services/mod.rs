//! Remote lookups used around the overlay: reverse geocoding and routing.

mod geocoder;
mod route_overlay;
mod router;

pub use geocoder::*;
pub use route_overlay::*;
pub use router::*;
