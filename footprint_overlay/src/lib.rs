//! The building overlay pipeline.
//!
//! A [`BuildingOverlayController`] listens to viewport changes of a map behind
//! the [`MapHandle`] trait, fetches the building tiles covering the viewport with
//! a [`BuildingTileFetcher`] and keeps a GeoJSON source plus an extrusion and a
//! label layer in sync with it. Clicks on a building are resolved to an address
//! by the [`FeatureInteractionHandler`].
//!
//! Nothing in here is fatal to the overlay: failures are logged, reported on the
//! [`EventBus`] and the overlay degrades.

mod error;
mod events;
pub mod map;
pub mod overlay;
pub mod services;
pub mod tiles;

pub use error::*;
pub use events::*;
pub use map::{MapEvent, MapEventKind, MapHandle, MemoryMap};
pub use overlay::{Annotation, BuildingOverlayController, FeatureInteractionHandler, RebuildOutcome};
pub use tiles::{BuildingTileFetcher, BuildingTileReader, HttpTileReader, TileBatch};
