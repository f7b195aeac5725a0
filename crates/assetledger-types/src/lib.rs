pub mod asset;
pub mod error;

pub use asset::*;
pub use error::*;
