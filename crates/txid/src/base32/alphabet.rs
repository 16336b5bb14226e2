const NO_VALUE: u8 = 255;

/// A 32-symbol base32 alphabet together with its decoding table.
///
/// Only the RFC 4648 alphabets are provided. Decoding is case-insensitive for
/// every alphabet, so a token minted with [`Alphabet::HEX_LOWER`] can be read
/// back after a proxy or log pipeline upper-cased it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Alphabet {
    symbols: [u8; 32],
    lookup: [u8; 256],
}

impl Alphabet {
    /// RFC 4648 section 6 (`A-Z2-7`).
    pub const STANDARD: Self = Self::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567");

    /// RFC 4648 section 7 "base32hex" (`0-9A-V`). Encoded text sorts in the
    /// same order as the bytes it encodes.
    pub const HEX: Self = Self::new(b"0123456789ABCDEFGHIJKLMNOPQRSTUV");

    /// Lowercase base32hex (`0-9a-v`), the format txids have always been
    /// issued in.
    pub const HEX_LOWER: Self = Self::new(b"0123456789abcdefghijklmnopqrstuv");

    const fn new(symbols: &[u8; 32]) -> Self {
        let mut lookup = [NO_VALUE; 256];
        let mut i = 0;
        while i < 32 {
            let c = symbols[i];
            lookup[c as usize] = i as u8;
            // Accept both cases
            if c.is_ascii_alphabetic() {
                lookup[c.to_ascii_lowercase() as usize] = i as u8;
                lookup[c.to_ascii_uppercase() as usize] = i as u8;
            }
            i += 1;
        }
        Self {
            symbols: *symbols,
            lookup,
        }
    }

    /// Returns the symbol for a 5-bit value. Only the low five bits of `value`
    /// are used.
    #[inline]
    pub const fn symbol(&self, value: u8) -> u8 {
        self.symbols[(value & 0x1F) as usize]
    }

    /// Returns the 5-bit value of `symbol`, or `None` if it is not part of the
    /// alphabet.
    #[inline]
    pub const fn value(&self, symbol: u8) -> Option<u8> {
        match self.lookup[symbol as usize] {
            NO_VALUE => None,
            v => Some(v),
        }
    }

    /// The 32 symbols in value order.
    pub const fn symbols(&self) -> &[u8; 32] {
        &self.symbols
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::HEX_LOWER
    }
}
