//! # footprint
//!
//! Building footprints on top of a Web-Mercator tile map.
//!
//! - [`core`]: viewport boxes, tile math, configuration and the HTTP client
//! - [`geometry`]: the GeoJSON building model and polygon centroids
//! - [`overlay`]: the overlay controller, tile fetcher, click handling and services
//!
//! ```rust
//! use footprint::core::{GeoBBox, TileRange};
//!
//! let viewport = GeoBBox::new(106.81, -6.21, 106.83, -6.19).unwrap();
//! let range = TileRange::from_geo(15, &viewport);
//! assert_eq!(range.as_tuple(), (26106, 26107, 16948, 16950));
//! ```

pub use footprint_core as core;
pub use footprint_geometry as geometry;
pub use footprint_overlay as overlay;
