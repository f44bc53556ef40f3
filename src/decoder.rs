//! Archive decoder — header validation followed by the record loop.
//!
//! # Record loop
//! The loop tracks the number of bytes consumed from the start of the stream,
//! header included. It stops normally once that offset reaches the header's
//! declared size; a record that runs past the declared size is still read in
//! full, so the overshoot is bounded by one record.
//!
//! # Failure policy
//! A bad header is fatal: no archive is produced. A bad record ends the scan
//! but the records decoded before it are kept and returned together with the
//! error in [`Decoded`]. With [`DecodeOptions::strict`] set, a bad record
//! fails the whole decode instead.
//!
//! The decoder only needs [`Read`]; offsets are counted, never sought.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::header::{IcnsHeader, HEADER_SIZE};
use crate::record::IconRecord;

/// Decoder configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Fail the whole archive on the first bad record instead of returning
    /// the records decoded so far.
    pub strict: bool,
}

/// A decoded icon archive.
#[derive(Debug, Clone)]
pub struct IcnsArchive {
    pub header:  IcnsHeader,
    /// Records in stream order.
    pub records: Vec<IconRecord>,
}

/// Outcome of a lenient decode.
#[derive(Debug)]
pub struct Decoded {
    pub archive:        IcnsArchive,
    /// The failure that ended the record loop early, if any.
    pub error:          Option<DecodeError>,
    /// Bytes consumed by header and complete records. The last record is
    /// read in full even when it runs past the declared size, so this can
    /// exceed `header.declared_size` by up to one record.
    pub bytes_consumed: u64,
}

impl Decoded {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// All-or-nothing view: any record failure becomes an error.
    pub fn into_result(self) -> Result<IcnsArchive, DecodeError> {
        match self.error {
            Some(e) => Err(e),
            None    => Ok(self.archive),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArchiveDecoder {
    options: DecodeOptions,
}

impl ArchiveDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn decode<R: Read>(&self, mut reader: R) -> Result<Decoded, DecodeError> {
        let header = IcnsHeader::read(&mut reader)?;
        debug!(
            target: "icnsx::decode",
            declared_size = header.declared_size,
            "Header accepted"
        );
        if header.declared_size < HEADER_SIZE {
            warn!(
                target: "icnsx::decode",
                declared_size = header.declared_size,
                "Declared size is smaller than the header; archive has no records"
            );
        }

        let declared = header.declared_size as u64;
        let mut offset = HEADER_SIZE as u64;
        let mut records = Vec::new();
        let mut error = None;

        while offset < declared {
            match IconRecord::read(&mut reader, offset) {
                Ok(record) => {
                    debug!(
                        target: "icnsx::decode",
                        offset,
                        tag = %record.type_tag,
                        length = record.length,
                        "Record decoded"
                    );
                    offset += record.length as u64;
                    records.push(record);
                }
                Err(e) => {
                    if self.options.strict {
                        return Err(e);
                    }
                    warn!(
                        target: "icnsx::decode",
                        offset,
                        decoded = records.len(),
                        error = %e,
                        "Record scan stopped early"
                    );
                    error = Some(e);
                    break;
                }
            }
        }

        Ok(Decoded {
            archive: IcnsArchive { header, records },
            error,
            bytes_consumed: offset,
        })
    }

    /// Open `path` and decode it. The file is closed before returning.
    pub fn decode_file<P: AsRef<Path>>(&self, path: P) -> Result<Decoded, DecodeError> {
        let file = File::open(path.as_ref())?;
        self.decode(BufReader::new(file))
    }
}

/// Decode with the default (lenient) options.
pub fn decode_archive<R: Read>(reader: R) -> Result<Decoded, DecodeError> {
    ArchiveDecoder::new().decode(reader)
}

pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Decoded, DecodeError> {
    ArchiveDecoder::new().decode_file(path)
}
