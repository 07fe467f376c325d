mod bus;
mod error;
mod metadata;

pub use bus::*;
pub use error::*;
pub use metadata::*;
