pub mod error;
pub mod metadata;
pub mod raster;

pub use error::*;
pub use metadata::*;
pub use raster::*;
