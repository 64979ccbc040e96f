pub mod constants;
pub mod error;
pub mod flags;

pub use constants::*;
pub use error::*;
pub use flags::*;
