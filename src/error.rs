use std::fmt;
use std::io;
use thiserror::Error;

use crate::tag::TypeTag;

/// Why a header magic was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagicMismatch {
    /// Neither `icns` nor a PNG signature.
    Unrecognized,
    /// The stream is a bare PNG image, not an icon archive.
    BarePng,
}

impl fmt::Display for MagicMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MagicMismatch::Unrecognized => f.write_str("not an icns archive"),
            MagicMismatch::BarePng      => f.write_str("stream is a bare PNG image"),
        }
    }
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid magic '{found}': {kind}")]
    InvalidMagic { found: TypeTag, kind: MagicMismatch },
    #[error("Unknown record type '{tag}' at offset {offset}")]
    UnknownRecordType { tag: TypeTag, offset: u64 },
    #[error("Record '{tag}' at offset {offset} declares length {length}, below the 8-byte minimum")]
    InvalidRecordLength { tag: TypeTag, offset: u64, length: u32 },
    #[error("Truncated record at offset {offset}: declared {declared} bytes, {available} available")]
    TruncatedRecord { offset: u64, declared: u64, available: u64 },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl DecodeError {
    /// True when the header magic was a PNG signature.
    pub fn is_bare_png(&self) -> bool {
        matches!(self, DecodeError::InvalidMagic { kind: MagicMismatch::BarePng, .. })
    }

    /// Record-level failures stop the scan but leave earlier records usable.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            DecodeError::UnknownRecordType { .. }
                | DecodeError::InvalidRecordLength { .. }
                | DecodeError::TruncatedRecord { .. }
        )
    }
}
