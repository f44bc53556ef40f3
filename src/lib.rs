//! Reader for Apple Icon Image (`.icns`) archives.
//!
//! An archive is an 8-byte header (`icns` magic + big-endian total length)
//! followed by type-tagged, length-prefixed records. [`decode_archive`]
//! validates the header and walks the records in file order; the
//! [`catalog`] maps record tags to pixel sizes; [`extract`] and [`finder`]
//! build the listing and PNG-extraction tooling on top.

pub mod tag;
pub mod catalog;
pub mod payload;
pub mod error;
pub mod header;
pub mod record;
pub mod decoder;
pub mod finder;
pub mod extract;

pub use tag::TypeTag;
pub use catalog::{IconTypeInfo, size_of};
pub use error::{DecodeError, MagicMismatch};
pub use header::IcnsHeader;
pub use record::IconRecord;
pub use decoder::{ArchiveDecoder, DecodeOptions, Decoded, IcnsArchive, decode_archive, decode_file};
pub use payload::PayloadKind;
