//! Signature sniffing for record payloads.
//!
//! Nothing here decodes pixels. Payloads are classified by their leading
//! bytes only, which is all the extraction layer needs to decide whether a
//! record can be written out as a `.png` file.

use serde::Serialize;

/// Leading bytes that identify PNG data, both in payloads and as a
/// misidentified archive magic.
pub const PNG_PREFIX: [u8; 4] = [0x89, b'P', b'N', b'G'];

/// Full eight-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// JPEG 2000 JP2 container signature box.
pub const JP2_SIGNATURE: [u8; 12] = [
    0x00, 0x00, 0x00, 0x0C, b'j', b'P', 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
];

/// Raw JPEG 2000 codestream (SOC + SIZ markers).
pub const J2K_CODESTREAM: [u8; 4] = [0xFF, 0x4F, 0xFF, 0x51];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    Png,
    Jpeg2000,
    /// Legacy RLE raster, alpha mask, or anything unrecognised.
    Other,
}

impl PayloadKind {
    pub fn name(&self) -> &'static str {
        match self {
            PayloadKind::Png      => "png",
            PayloadKind::Jpeg2000 => "jpeg2000",
            PayloadKind::Other    => "other",
        }
    }
}

pub fn is_png(payload: &[u8]) -> bool {
    payload.starts_with(&PNG_PREFIX)
}

pub fn sniff(payload: &[u8]) -> PayloadKind {
    if is_png(payload) {
        PayloadKind::Png
    } else if payload.starts_with(&JP2_SIGNATURE) || payload.starts_with(&J2K_CODESTREAM) {
        PayloadKind::Jpeg2000
    } else {
        PayloadKind::Other
    }
}
