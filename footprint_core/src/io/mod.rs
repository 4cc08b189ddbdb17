//! Remote data access.

mod error;
pub use error::*;

mod http_client;
pub use http_client::*;

#[cfg(any(test, feature = "test"))]
pub mod testing;
