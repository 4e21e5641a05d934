use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;
use crate::hexfmt::{decode_fixed, encode_prefixed};

const DIGEST_LEN: usize = 32;

/// A 32-byte digest: Merkle leaves, inner nodes, roots and signed messages.
///
/// Ordering is byte-lexicographic, which is what sorted-pair hashing relies on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash([u8; DIGEST_LEN]);

impl Hash {
    pub const LEN: usize = DIGEST_LEN;

    /// The all-zero digest. A Merkle root with this value is treated as unset.
    pub const ZERO: Hash = Hash([0u8; DIGEST_LEN]);

    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        let actual = bytes.len();
        let fixed: [u8; Self::LEN] = bytes.try_into().map_err(|_| ParseError::WrongLength {
            expected: Self::LEN,
            actual,
        })?;
        Ok(Self(fixed))
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; Self::LEN]
    }
}

impl FromStr for Hash {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed::<{ Hash::LEN }>(s).map(Self)
    }
}

impl From<[u8; DIGEST_LEN]> for Hash {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_prefixed(&self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form keeps event and log output readable
        f.write_str("Hash(0x")?;
        for b in &self.0[..8] {
            write!(f, "{:02x}", b)?;
        }
        f.write_str("...)")
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
