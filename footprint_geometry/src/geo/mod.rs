mod collection;
mod feature;
mod geometry;
mod properties;
mod roof_material;
mod types;

pub use collection::*;
pub use feature::*;
pub use geometry::*;
pub use properties::*;
pub use roof_material::*;
pub use types::*;
