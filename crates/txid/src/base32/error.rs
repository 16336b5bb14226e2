use core::fmt;

/// Errors raised while decoding base32 text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Base32Error {
    /// The number of symbols cannot be produced by any input length, or a
    /// padded input is not a whole number of 8-symbol groups.
    InvalidLength { len: usize },
    /// A byte outside the alphabet was found at `index`.
    InvalidSymbol { byte: u8, index: usize },
    /// The final symbol carries bits that do not belong to any output byte.
    TrailingBits,
}

impl fmt::Display for Base32Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { len } => write!(f, "invalid length: {len}"),
            Self::InvalidSymbol { byte, index } => {
                write!(f, "invalid symbol {:?} at index {index}", *byte as char)
            }
            Self::TrailingBits => f.write_str("non-zero trailing bits"),
        }
    }
}

impl core::error::Error for Base32Error {}
