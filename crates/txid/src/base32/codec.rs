use crate::{Alphabet, Base32Error};

/// Padding symbol appended to partial groups.
pub const PAD: u8 = b'=';

const BITS_PER_SYMBOL: usize = 5;
const GROUP_BYTES: usize = 5;
const GROUP_SYMBOLS: usize = 8;
const GROUP_BITS: usize = GROUP_BYTES * 8;
const MASK: u64 = 0x1F;

/// Number of characters needed to encode `n` bytes, including padding up to a
/// multiple of 8.
///
/// ```
/// assert_eq!(txid::encoded_len(0), 0);
/// assert_eq!(txid::encoded_len(1), 8);
/// assert_eq!(txid::encoded_len(12), 24);
/// ```
pub const fn encoded_len(n: usize) -> usize {
    n.div_ceil(GROUP_BYTES) * GROUP_SYMBOLS
}

/// Number of characters that carry data when encoding `n` bytes, i.e.
/// [`encoded_len`] without the trailing padding.
pub const fn unpadded_len(n: usize) -> usize {
    (n * 8).div_ceil(BITS_PER_SYMBOL)
}

/// Encodes `input` as padded base32.
pub fn encode(alphabet: &Alphabet, input: &[u8]) -> String {
    let mut out = vec![PAD; encoded_len(input.len())];
    encode_to_slice(alphabet, input, &mut out);

    // SAFETY: every alphabet symbol and `PAD` is ASCII
    unsafe { String::from_utf8_unchecked(out) }
}

/// Writes the data-carrying symbols of `input` into `out` and returns how
/// many were written. No padding is emitted; bytes of `out` past the returned
/// length are left untouched.
///
/// # Panics
///
/// Panics if `out` is shorter than [`unpadded_len`]`(input.len())`.
pub fn encode_to_slice(alphabet: &Alphabet, input: &[u8], out: &mut [u8]) -> usize {
    let written = unpadded_len(input.len());
    assert!(
        out.len() >= written,
        "base32 output buffer too small: {} < {written}",
        out.len()
    );

    for (chunk, dst) in input.chunks(GROUP_BYTES).zip(out.chunks_mut(GROUP_SYMBOLS)) {
        let mut acc = 0_u64;
        for &b in chunk {
            acc = (acc << 8) | u64::from(b);
        }
        // Left-align short groups so the missing bytes read as zero bits
        acc <<= (GROUP_BYTES - chunk.len()) * 8;

        let symbols = unpadded_len(chunk.len());
        for (i, slot) in dst.iter_mut().take(symbols).enumerate() {
            let shift = GROUP_BITS - BITS_PER_SYMBOL * (i + 1);
            *slot = alphabet.symbol(((acc >> shift) & MASK) as u8);
        }
    }

    written
}

/// Decodes base32 text, padded or not.
///
/// # Errors
///
/// - [`Base32Error::InvalidLength`] if the symbol count cannot come from any
///   byte length, or padded input is not a multiple of 8 characters
/// - [`Base32Error::InvalidSymbol`] for bytes outside `alphabet` (including
///   padding anywhere but the end)
/// - [`Base32Error::TrailingBits`] if the last symbol has bits set that do not
///   belong to an output byte
pub fn decode(alphabet: &Alphabet, input: &str) -> Result<Vec<u8>, Base32Error> {
    let bytes = input.as_bytes();
    let data_len = bytes.iter().rposition(|&b| b != PAD).map_or(0, |i| i + 1);
    let padding = bytes.len() - data_len;

    if padding > 0 && (bytes.len() % GROUP_SYMBOLS != 0 || padding >= GROUP_SYMBOLS - 1) {
        return Err(Base32Error::InvalidLength { len: bytes.len() });
    }
    // 1, 3 and 6 trailing symbols never come out of the encoder
    if matches!(data_len % GROUP_SYMBOLS, 1 | 3 | 6) {
        return Err(Base32Error::InvalidLength { len: bytes.len() });
    }

    let mut out = Vec::with_capacity(data_len * BITS_PER_SYMBOL / 8);
    let mut acc = 0_u16;
    let mut bits = 0;
    for (index, &byte) in bytes[..data_len].iter().enumerate() {
        let value = alphabet
            .value(byte)
            .ok_or(Base32Error::InvalidSymbol { byte, index })?;
        acc = (acc << BITS_PER_SYMBOL) | u16::from(value);
        bits += BITS_PER_SYMBOL;
        if bits >= 8 {
            bits -= 8;
            out.push((acc >> bits) as u8);
            acc &= (1 << bits) - 1;
        }
    }

    if acc != 0 {
        return Err(Base32Error::TrailingBits);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RFC4648_VECTORS: [(&str, &str, &str); 7] = [
        ("", "", ""),
        ("f", "MY======", "CO======"),
        ("fo", "MZXQ====", "CPNG===="),
        ("foo", "MZXW6===", "CPNMU==="),
        ("foob", "MZXW6YQ=", "CPNMUOG="),
        ("fooba", "MZXW6YTB", "CPNMUOJ1"),
        ("foobar", "MZXW6YTBOI======", "CPNMUOJ1E8======"),
    ];

    #[test]
    fn encode_matches_rfc4648_vectors() {
        for (plain, standard, hex) in RFC4648_VECTORS {
            assert_eq!(encode(&Alphabet::STANDARD, plain.as_bytes()), standard);
            assert_eq!(encode(&Alphabet::HEX, plain.as_bytes()), hex);
            assert_eq!(
                encode(&Alphabet::HEX_LOWER, plain.as_bytes()),
                hex.to_ascii_lowercase()
            );
        }
    }

    #[test]
    fn decode_matches_rfc4648_vectors() {
        for (plain, standard, hex) in RFC4648_VECTORS {
            assert_eq!(decode(&Alphabet::STANDARD, standard).unwrap(), plain.as_bytes());
            assert_eq!(decode(&Alphabet::HEX, hex).unwrap(), plain.as_bytes());
            assert_eq!(
                decode(&Alphabet::HEX_LOWER, hex.trim_end_matches('=')).unwrap(),
                plain.as_bytes()
            );
        }
    }

    #[test]
    fn encoded_len_is_whole_groups() {
        for n in 0..64 {
            assert_eq!(encoded_len(n), 8 * n.div_ceil(5), "n = {n}");
            assert_eq!(encode(&Alphabet::HEX, &vec![0xA5; n]).len(), encoded_len(n));
        }
        assert_eq!(encoded_len(0), 0);
    }

    #[test]
    fn unpadded_len_counts_data_symbols() {
        assert_eq!(unpadded_len(0), 0);
        assert_eq!(unpadded_len(1), 2);
        assert_eq!(unpadded_len(5), 8);
        assert_eq!(unpadded_len(12), 20);
        assert_eq!(unpadded_len(16), 26);
    }

    #[test]
    fn decode_inverts_encode_for_varied_lengths() {
        let data: Vec<u8> = (0..=255).map(|i: u8| i.wrapping_mul(37) ^ 0x5C).collect();
        for n in [0, 1, 2, 3, 4, 5, 6, 11, 12, 13, 31, 64, 255] {
            let input = &data[..n];
            for alphabet in [Alphabet::STANDARD, Alphabet::HEX, Alphabet::HEX_LOWER] {
                let text = encode(&alphabet, input);
                assert_eq!(decode(&alphabet, &text).unwrap(), input, "n = {n}");
            }
        }
    }

    #[test]
    fn encode_to_slice_stops_before_padding() {
        let mut out = [b'#'; 10];
        let written = encode_to_slice(&Alphabet::HEX, b"foob", &mut out);
        assert_eq!(written, 7);
        assert_eq!(&out[..7], b"CPNMUOG");
        assert_eq!(&out[7..], b"###");
    }

    #[test]
    #[should_panic(expected = "base32 output buffer too small")]
    fn encode_to_slice_rejects_short_buffer() {
        let mut out = [0u8; 19];
        encode_to_slice(&Alphabet::HEX, &[0u8; 12], &mut out);
    }

    #[test]
    fn hex_encoding_preserves_byte_order() {
        let mut inputs: Vec<[u8; 6]> = (0..200u32)
            .map(|i| {
                let x = i.wrapping_mul(2_654_435_761);
                let b = x.to_be_bytes();
                [b[0], b[1], b[2], b[3], b[1] ^ b[3], b[0] ^ b[2]]
            })
            .collect();
        inputs.sort();
        let encoded: Vec<String> = inputs
            .iter()
            .map(|b| encode(&Alphabet::HEX_LOWER, b))
            .collect();
        assert!(encoded.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn decode_rejects_impossible_lengths() {
        for text in ["0", "000", "000000", "CO=", "CO=====", "C======="] {
            assert!(
                matches!(
                    decode(&Alphabet::HEX, text),
                    Err(Base32Error::InvalidLength { .. })
                ),
                "{text:?}"
            );
        }
    }

    #[test]
    fn decode_rejects_symbols_outside_alphabet() {
        assert_eq!(
            decode(&Alphabet::HEX, "CPNW"),
            Err(Base32Error::InvalidSymbol {
                byte: b'W',
                index: 3
            })
        );
        assert_eq!(
            decode(&Alphabet::HEX, "C=NG"),
            Err(Base32Error::InvalidSymbol {
                byte: b'=',
                index: 1
            })
        );
    }

    #[test]
    fn decode_rejects_non_canonical_tail() {
        // "CO" is 'f'; "CP" sets a bit past the end of the byte
        assert_eq!(decode(&Alphabet::HEX, "CO").unwrap(), b"f");
        assert_eq!(decode(&Alphabet::HEX, "CP"), Err(Base32Error::TrailingBits));
    }

    #[test]
    fn decode_accepts_mixed_case() {
        assert_eq!(decode(&Alphabet::HEX_LOWER, "cPnMuOj1").unwrap(), b"fooba");
    }
}
