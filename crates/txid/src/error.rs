use crate::Base32Error;
use core::fmt;
use std::collections::TryReserveError;

/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `txid` can produce.
///
/// Minting a [`crate::Txid`] is infallible. Errors only surface when the
/// encoded text cannot be allocated or when parsing text back into an
/// identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The output buffer for the encoded identifier could not be allocated.
    ///
    /// Callers should treat this as "no identifier available" and carry on
    /// without one.
    ResourceExhausted,

    /// Text could not be decoded into an identifier.
    Base32(Base32Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceExhausted => f.write_str("unable to allocate txid output buffer"),
            Self::Base32(err) => write!(f, "base32: {err}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::ResourceExhausted => None,
            Self::Base32(err) => Some(err),
        }
    }
}

impl From<Base32Error> for Error {
    fn from(err: Base32Error) -> Self {
        Self::Base32(err)
    }
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Self::ResourceExhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_reservation_maps_to_resource_exhausted() {
        let mut buf = Vec::<u8>::new();
        let err = buf.try_reserve_exact(usize::MAX).unwrap_err();
        assert_eq!(Error::from(err), Error::ResourceExhausted);
    }

    #[test]
    fn base32_errors_keep_their_source() {
        let err = Error::from(Base32Error::InvalidLength { len: 3 });
        assert_eq!(err.to_string(), "base32: invalid length: 3");
        assert!(core::error::Error::source(&err).is_some());
    }
}
