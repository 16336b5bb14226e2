mod txid;

pub use txid::*;
