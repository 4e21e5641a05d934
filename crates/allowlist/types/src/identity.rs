use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;
use crate::hexfmt::{decode_fixed, encode_prefixed};

const ADDRESS_LEN: usize = 20;

/// A 20-byte account address, the unit of authorization.
///
/// Equality is byte-exact. Text forms are normalized on parse, so a checksummed
/// (mixed-case) address and its lower-case rendering are the same identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identity([u8; ADDRESS_LEN]);

impl Identity {
    pub const LEN: usize = ADDRESS_LEN;

    /// The all-zero address.
    pub const ZERO: Identity = Identity([0u8; ADDRESS_LEN]);

    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Build from a slice, failing unless it is exactly 20 bytes long.
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

impl FromStr for Identity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed::<{ Identity::LEN }>(s).map(Self)
    }
}

impl From<[u8; ADDRESS_LEN]> for Identity {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Identity {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_prefixed(&self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self)
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
