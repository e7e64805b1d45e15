//! Base32 encoded digests: TTH content hashes and certificate keyprints.

use std::fmt;
use std::str::FromStr;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Length of a base32 encoded TTH root (24 bytes).
pub const TTH_LEN: usize = 39;
/// Length of a base32 encoded SHA-256 keyprint (32 bytes).
pub const KEYPRINT_LEN: usize = 52;

/// Decode unpadded RFC 4648 base32 (case-insensitive).
///
/// Trailing bits that do not fill a whole byte are dropped.
pub fn base32_decode(input: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0;
    for c in input.bytes() {
        let value = match c.to_ascii_uppercase() {
            c @ b'A'..=b'Z' => c - b'A',
            c @ b'2'..=b'7' => c - b'2' + 26,
            _ => return None,
        };
        buffer = (buffer << 5) | value as u32;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }
    Some(out)
}

/// Encode bytes as unpadded uppercase base32.
pub fn base32_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut buffer: u32 = 0;
    let mut bits = 0;
    for &b in bytes {
        buffer = (buffer << 8) | b as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buffer >> bits) & 31) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push(ALPHABET[((buffer << (5 - bits)) & 31) as usize] as char);
    }
    out
}

fn decode_fixed<const N: usize>(input: &str, encoded_len: usize) -> Option<[u8; N]> {
    if input.len() != encoded_len {
        return None;
    }
    let bytes = base32_decode(input)?;
    bytes.get(..N)?.try_into().ok()
}

/// Tiger tree hash root identifying file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tth(pub [u8; 24]);

impl FromStr for Tth {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed(s, TTH_LEN).map(Tth).ok_or(())
    }
}

impl fmt::Display for Tth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base32_encode(&self.0))
    }
}

/// SHA-256 digest of a hub's TLS certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keyprint(pub [u8; 32]);

impl FromStr for Keyprint {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed(s, KEYPRINT_LEN).map(Keyprint).ok_or(())
    }
}

impl fmt::Display for Keyprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base32_encode(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_known_vector() {
        assert_eq!(base32_encode(b"foobar"), "MZXW6YTBOI");
        assert_eq!(base32_decode("MZXW6YTBOI").unwrap(), b"foobar");
        assert_eq!(base32_decode("mzxw6ytboi").unwrap(), b"foobar");
    }

    #[test]
    fn decode_rejects_invalid_characters() {
        assert!(base32_decode("MZXW1").is_none());
        assert!(base32_decode("MZ=W").is_none());
    }

    #[test]
    fn tth_parses_empty_file_root() {
        let s = "LWPNACQDBZRYXW3VHJVCJ64QBZNGHOHHHZWCLNQ";
        let tth: Tth = s.parse().unwrap();
        assert_eq!(tth.to_string(), s);
    }

    #[test]
    fn tth_rejects_wrong_length() {
        assert!("LWPNACQDBZRYXW3VHJVCJ64QBZNGHOHHHZWCLN".parse::<Tth>().is_err());
        assert!("LWPNACQDBZRYXW3VHJVCJ64QBZNGHOHHHZWCLNQA".parse::<Tth>().is_err());
    }

    #[test]
    fn keyprint_length() {
        let encoded = base32_encode(&[7u8; 32]);
        assert_eq!(encoded.len(), KEYPRINT_LEN);
        let kp: Keyprint = encoded.parse().unwrap();
        assert_eq!(kp.0, [7u8; 32]);
    }
}
