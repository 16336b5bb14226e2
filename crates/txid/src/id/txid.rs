use crate::{Alphabet, Base32Error, Error, Result, decode, encode_to_slice, unpadded_len};
use core::{fmt, str::FromStr};

/// Size of a [`Txid`] in bytes (96 bits).
pub const TXID_SIZE: usize = 12;

/// Length of an encoded [`Txid`] in characters, padding stripped.
pub const TXID_LEN: usize = unpadded_len(TXID_SIZE);

/// Number of tick bits a [`Txid`] has room for.
pub const TICK_BITS: u32 = 42;

/// Ticks are masked with this before packing. Larger ticks wrap.
pub const TICK_MASK: u64 = (1 << TICK_BITS) - 1;

const TICK_SHIFT: u32 = 64 - TICK_BITS;

/// Low tick bits that share byte 4 with entropy and so cannot be read back.
const TICK_LOSSY_BITS: u32 = 10;

/// A 96-bit request identifier.
///
/// ```text
///  byte  0      1      2      3      4      5 .. 11
///       +------+------+------+------+------+------------+
///       |   (tick << 22) bits 63..32  | rand | random     |
///       |          big-endian         | | ts |            |
///       +------+------+------+------+------+------------+
/// ```
///
/// - bytes 0-3 hold bits 63..32 of `(tick & TICK_MASK) << 22`, big-endian
/// - byte 4 is a random byte OR-ed with bits 31..24 of the same value
/// - bytes 5-11 are random
///
/// Comparison and hashing work on the raw bytes, so txids from later ticks
/// order after earlier ones (at ~1s granularity, see [`Txid::coarse_tick`]).
/// The text form is [`TXID_LEN`] base32hex characters, which sorts the same
/// way.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Txid([u8; TXID_SIZE]);

impl Txid {
    /// The all-zero txid.
    pub const ZERO: Self = Self([0; TXID_SIZE]);

    /// Lays `tick` over `random` to build a txid.
    ///
    /// `random` should come straight from a [`crate::RandSource`]. Bytes 0-3
    /// are overwritten, byte 4 keeps its random bits and gains the tick bits,
    /// the rest is left as is.
    ///
    /// Only the low [`TICK_BITS`] bits of `tick` are kept, so ticks past
    /// `TICK_MASK` wrap around to zero.
    ///
    /// ```
    /// use txid::Txid;
    ///
    /// let id = Txid::from_parts(1000, [0; 12]);
    /// assert_eq!(id.to_bytes(), [0, 0, 0, 0, 0xFA, 0, 0, 0, 0, 0, 0, 0]);
    /// assert_eq!(id.to_string(), "0000007q000000000000");
    /// ```
    #[must_use]
    pub const fn from_parts(tick: u64, random: [u8; TXID_SIZE]) -> Self {
        let ts = ((tick & TICK_MASK) << TICK_SHIFT).to_be_bytes();
        let mut bytes = random;
        bytes[0] = ts[0];
        bytes[1] = ts[1];
        bytes[2] = ts[2];
        bytes[3] = ts[3];
        // Share the 5th byte with entropy
        bytes[4] |= ts[4];
        Self(bytes)
    }

    /// Wraps raw bytes without interpreting them.
    pub const fn from_bytes(bytes: [u8; TXID_SIZE]) -> Self {
        Self(bytes)
    }

    /// The raw bytes.
    pub const fn as_bytes(&self) -> &[u8; TXID_SIZE] {
        &self.0
    }

    /// The raw bytes, by value.
    pub const fn to_bytes(self) -> [u8; TXID_SIZE] {
        self.0
    }

    /// The tick this txid was minted at, rounded down to a multiple of 1024.
    ///
    /// Only bytes 0-3 carry tick bits verbatim; the next eight tick bits were
    /// OR-ed into a random byte and the lowest two were never stored.
    pub const fn coarse_tick(&self) -> u64 {
        let hi = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        (hi as u64) << TICK_LOSSY_BITS
    }

    /// Encodes with the default [`Alphabet::HEX_LOWER`] alphabet.
    pub fn encode(&self) -> String {
        self.encode_with(&Alphabet::HEX_LOWER)
    }

    /// Encodes with the given alphabet.
    pub fn encode_with(&self, alphabet: &Alphabet) -> String {
        let mut buf = [0u8; TXID_LEN];
        self.encode_to_buf(alphabet, &mut buf).to_owned()
    }

    /// Encodes into a caller-provided buffer without heap allocation and
    /// returns the text.
    ///
    /// ```
    /// use txid::{Alphabet, TXID_LEN, Txid};
    ///
    /// let mut buf = [0u8; TXID_LEN];
    /// let text = Txid::ZERO.encode_to_buf(&Alphabet::STANDARD, &mut buf);
    /// assert_eq!(text, "AAAAAAAAAAAAAAAAAAAA");
    /// ```
    pub fn encode_to_buf<'a>(
        &self,
        alphabet: &Alphabet,
        buf: &'a mut [u8; TXID_LEN],
    ) -> &'a str {
        encode_to_slice(alphabet, &self.0, buf);

        // SAFETY: alphabet symbols are always ASCII
        unsafe { core::str::from_utf8_unchecked(buf) }
    }

    /// Parses a [`TXID_LEN`]-character token in the default alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Base32`] if the text has the wrong length, contains
    /// symbols outside the alphabet, or sets bits past the 96th.
    pub fn decode(s: &str) -> Result<Self> {
        Self::decode_with(&Alphabet::HEX_LOWER, s)
    }

    /// Parses a [`TXID_LEN`]-character token in the given alphabet.
    ///
    /// # Errors
    ///
    /// See [`Txid::decode`].
    pub fn decode_with(alphabet: &Alphabet, s: &str) -> Result<Self> {
        if s.len() != TXID_LEN {
            return Err(Error::Base32(Base32Error::InvalidLength { len: s.len() }));
        }
        let bytes = decode(alphabet, s)?;
        let bytes: [u8; TXID_SIZE] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| Base32Error::InvalidLength { len: v.len() })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Txid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; TXID_LEN];
        f.write_str(self.encode_to_buf(&Alphabet::HEX_LOWER, &mut buf))
    }
}

impl fmt::Debug for Txid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Txid").field(&format_args!("{self}")).finish()
    }
}

impl FromStr for Txid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl From<[u8; TXID_SIZE]> for Txid {
    fn from(bytes: [u8; TXID_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Txid> for [u8; TXID_SIZE] {
    fn from(id: Txid) -> Self {
        id.0
    }
}

impl AsRef<[u8]> for Txid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
