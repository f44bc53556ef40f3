use byteorder::{BigEndian, ByteOrder};
use std::io::{self, Read};

use crate::catalog::{self, IconTypeInfo};
use crate::error::DecodeError;
use crate::payload::{self, PayloadKind};
use crate::tag::TypeTag;

/// Size of the tag + length prefix in front of every record payload.
pub const RECORD_HEADER_SIZE: u32 = 8;

/// One icon element: a catalogued type tag and its raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRecord {
    pub type_tag: TypeTag,
    /// Declared record length, sub-header included.
    pub length:   u32,
    pub payload:  Vec<u8>,
}

impl IconRecord {
    pub fn info(&self) -> Option<&'static IconTypeInfo> {
        catalog::lookup(&self.type_tag)
    }

    pub fn pixel_size(&self) -> Option<u32> {
        catalog::size_of(&self.type_tag)
    }

    pub fn payload_kind(&self) -> PayloadKind {
        payload::sniff(&self.payload)
    }

    pub fn is_png(&self) -> bool {
        payload::is_png(&self.payload)
    }

    /// Decode a single record from `reader`.
    ///
    /// `offset` is the absolute stream position of the record, used only for
    /// error reporting. On failure the reader has consumed an unspecified
    /// number of bytes.
    pub fn read<R: Read>(reader: &mut R, offset: u64) -> Result<Self, DecodeError> {
        let mut prefix = [0u8; RECORD_HEADER_SIZE as usize];
        let got = read_full(reader, &mut prefix)?;
        if got < prefix.len() {
            return Err(DecodeError::TruncatedRecord {
                offset,
                declared:  RECORD_HEADER_SIZE as u64,
                available: got as u64,
            });
        }

        let type_tag = TypeTag([prefix[0], prefix[1], prefix[2], prefix[3]]);
        let length = BigEndian::read_u32(&prefix[4..8]);

        if !catalog::is_known(&type_tag) {
            return Err(DecodeError::UnknownRecordType { tag: type_tag, offset });
        }
        if length < RECORD_HEADER_SIZE {
            return Err(DecodeError::InvalidRecordLength { tag: type_tag, offset, length });
        }

        // `take` bounds the read so a corrupt length cannot force a huge
        // allocation up front.
        let body_len = (length - RECORD_HEADER_SIZE) as u64;
        let mut payload = Vec::new();
        reader.by_ref().take(body_len).read_to_end(&mut payload)?;
        if (payload.len() as u64) < body_len {
            return Err(DecodeError::TruncatedRecord {
                offset,
                declared:  length as u64,
                available: RECORD_HEADER_SIZE as u64 + payload.len() as u64,
            });
        }

        Ok(Self { type_tag, length, payload })
    }
}

/// Fill `buf` as far as the stream allows; returns the number of bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn raw(tag: &[u8; 4], length: u32, payload: &[u8]) -> Vec<u8> {
        let mut out = tag.to_vec();
        out.extend_from_slice(&length.to_be_bytes());
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn reads_one_record() {
        let bytes = raw(b"ic10", 16, b"\x89PNGdata");
        let mut cur = Cursor::new(bytes);
        let rec = IconRecord::read(&mut cur, 8).unwrap();
        assert_eq!(rec.type_tag, TypeTag(*b"ic10"));
        assert_eq!(rec.length, 16);
        assert_eq!(rec.payload, b"\x89PNGdata");
        assert!(rec.is_png());
        assert_eq!(rec.pixel_size(), Some(1024));
        assert_eq!(cur.position(), 16);
    }

    #[test]
    fn empty_payload_is_valid() {
        let bytes = raw(b"ic11", 8, b"");
        let rec = IconRecord::read(&mut Cursor::new(bytes), 8).unwrap();
        assert!(rec.payload.is_empty());
        assert!(!rec.is_png());
    }

    #[test]
    fn unknown_tag_rejected_before_payload() {
        let bytes = raw(b"xx99", 12, b"abcd");
        let err = IconRecord::read(&mut Cursor::new(bytes), 24).unwrap_err();
        match err {
            DecodeError::UnknownRecordType { tag, offset } => {
                assert_eq!(tag, TypeTag(*b"xx99"));
                assert_eq!(offset, 24);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn length_below_header_size_rejected() {
        let bytes = raw(b"ic12", 4, b"");
        let err = IconRecord::read(&mut Cursor::new(bytes), 8).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidRecordLength { length: 4, .. }));
    }

    #[test]
    fn truncated_payload() {
        let bytes = raw(b"ic13", 100, b"short");
        let err = IconRecord::read(&mut Cursor::new(bytes), 8).unwrap_err();
        match err {
            DecodeError::TruncatedRecord { offset, declared, available } => {
                assert_eq!(offset, 8);
                assert_eq!(declared, 100);
                assert_eq!(available, 13);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn truncated_sub_header() {
        let err = IconRecord::read(&mut Cursor::new(b"ic1".to_vec()), 8).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedRecord { declared: 8, available: 3, .. }));
    }

    #[test]
    fn huge_length_does_not_preallocate() {
        let bytes = raw(b"ic14", u32::MAX, b"tiny");
        let err = IconRecord::read(&mut Cursor::new(bytes), 8).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedRecord { available: 12, .. }));
    }
}
