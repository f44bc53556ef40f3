use byteorder::{BigEndian, ReadBytesExt};
use serde::Serialize;
use std::io::Read;

use crate::error::{DecodeError, MagicMismatch};
use crate::payload::PNG_PREFIX;
use crate::tag::TypeTag;

pub const MAGIC: &[u8; 4] = b"icns";
pub const HEADER_SIZE: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IcnsHeader {
    pub magic:         TypeTag,
    /// Total archive length in bytes, header included.
    pub declared_size: u32,
}

impl IcnsHeader {
    pub fn read<R: Read>(mut reader: R) -> Result<Self, DecodeError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            let kind = if magic == PNG_PREFIX {
                MagicMismatch::BarePng
            } else {
                MagicMismatch::Unrecognized
            };
            return Err(DecodeError::InvalidMagic { found: TypeTag(magic), kind });
        }
        let declared_size = reader.read_u32::<BigEndian>()?;
        Ok(Self { magic: TypeTag(magic), declared_size })
    }

    /// Bytes available for records once the header is accounted for.
    pub fn body_len(&self) -> u32 {
        self.declared_size.saturating_sub(HEADER_SIZE)
    }
}
