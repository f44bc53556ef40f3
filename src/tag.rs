//! Four-byte type tags.
//!
//! Both the archive magic and every record identifier are four raw bytes.
//! Tags are usually printable ASCII (`icns`, `ic10`, ...) but nothing in the
//! format guarantees it, so [`TypeTag`] keeps the bytes and escapes anything
//! non-printable when displayed (a bare PNG shows up as `\x89PNG`).

use serde::{Serialize, Serializer};
use std::fmt::{self, Write as _};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagParseError {
    #[error("type tag must be exactly 4 bytes, got {0}")]
    WrongLength(usize),
}

/// A four-byte identifier as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(pub [u8; 4]);

impl TypeTag {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for TypeTag {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::with_capacity(4);
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                s.push(b as char);
            } else {
                write!(s, "\\x{b:02x}")?;
            }
        }
        f.pad(&s)
    }
}

impl FromStr for TypeTag {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 4] = s
            .as_bytes()
            .try_into()
            .map_err(|_| TagParseError::WrongLength(s.len()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
