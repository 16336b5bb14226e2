mod alphabet;
mod codec;
mod error;

pub use alphabet::*;
pub use codec::*;
pub use error::*;
