mod centroid;
pub use centroid::*;
