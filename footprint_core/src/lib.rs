//! Shared building blocks of the footprint crates: viewport boxes, slippy-map
//! tile math, the immutable overlay configuration and a small HTTP JSON client.

pub mod config;

pub mod io;

pub mod types;
pub use types::*;
