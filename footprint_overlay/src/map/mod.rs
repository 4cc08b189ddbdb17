//! The narrow slice of a rendering engine the overlay talks to.

mod handle;
mod layer;
mod memory;
mod subscription;

pub use handle::*;
pub use layer::*;
pub use memory::*;
pub use subscription::*;
