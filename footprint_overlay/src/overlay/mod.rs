mod annotation;
mod controller;
mod interaction;
mod style;

pub use annotation::*;
pub use controller::*;
pub use interaction::*;
pub use style::*;
