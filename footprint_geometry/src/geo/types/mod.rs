mod coordinates;
pub use coordinates::*;

mod polygon;
pub use polygon::*;

mod ring;
pub use ring::*;
