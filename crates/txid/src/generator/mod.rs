mod interface;
mod txid;

pub use interface::*;
pub use txid::*;
