//! Fetching building tiles and merging them into one collection.

mod fetcher;
mod reader;

pub use fetcher::*;
pub use reader::*;

#[cfg(test)]
pub mod mock;
