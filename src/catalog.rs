//! Icon type catalog: frozen tag → dimensions table.
//!
//! Only the PNG/JPEG 2000 "retina era" element types are listed. A tag that
//! is not in the catalog is rejected by the record decoder, and
//! [`size_of`] returns `None` for it. Callers that need a number for an
//! unknown tag (the extraction layer uses 0) make that choice themselves.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use crate::tag::TypeTag;

/// Static description of one icon element type.
#[derive(Debug, Clone, Serialize)]
pub struct IconTypeInfo {
    pub tag:            TypeTag,
    pub width:          u32,
    pub height:         u32,
    /// First macOS release that reads this element type.
    pub min_os_version: &'static str,
    pub description:    &'static str,
}

pub static ICON_TYPES: [IconTypeInfo; 5] = [
    IconTypeInfo {
        tag:            TypeTag::new(*b"ic14"),
        width:          512,
        height:         512,
        min_os_version: "10.8",
        description:    "JPEG 2000 or PNG format (256x256@2x retina)",
    },
    IconTypeInfo {
        tag:            TypeTag::new(*b"ic13"),
        width:          256,
        height:         256,
        min_os_version: "10.8",
        description:    "JPEG 2000 or PNG format (128x128@2x retina)",
    },
    IconTypeInfo {
        tag:            TypeTag::new(*b"ic12"),
        width:          64,
        height:         64,
        min_os_version: "10.8",
        description:    "JPEG 2000 or PNG format (32x32@2x retina)",
    },
    IconTypeInfo {
        tag:            TypeTag::new(*b"ic11"),
        width:          32,
        height:         32,
        min_os_version: "10.8",
        description:    "JPEG 2000 or PNG format (16x16@2x retina)",
    },
    IconTypeInfo {
        tag:            TypeTag::new(*b"ic10"),
        width:          1024,
        height:         1024,
        min_os_version: "10.7",
        description:    "JPEG 2000 or PNG format (512x512@2x retina)",
    },
];

static BY_TAG: Lazy<HashMap<TypeTag, &'static IconTypeInfo>> =
    Lazy::new(|| ICON_TYPES.iter().map(|info| (info.tag, info)).collect());

/// Every catalog entry, in table order.
pub fn all() -> &'static [IconTypeInfo] {
    &ICON_TYPES
}

pub fn lookup(tag: &TypeTag) -> Option<&'static IconTypeInfo> {
    BY_TAG.get(tag).copied()
}

pub fn is_known(tag: &TypeTag) -> bool {
    BY_TAG.contains_key(tag)
}

/// Pixel width of the icon stored under `tag`, or `None` when unknown.
pub fn size_of(tag: &TypeTag) -> Option<u32> {
    lookup(tag).map(|info| info.width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sizes() {
        assert_eq!(size_of(&TypeTag(*b"ic10")), Some(1024));
        assert_eq!(size_of(&TypeTag(*b"ic11")), Some(32));
        assert_eq!(size_of(&TypeTag(*b"ic12")), Some(64));
        assert_eq!(size_of(&TypeTag(*b"ic13")), Some(256));
        assert_eq!(size_of(&TypeTag(*b"ic14")), Some(512));
    }

    #[test]
    fn unknown_tag_is_absent() {
        assert_eq!(size_of(&TypeTag(*b"zzzz")), None);
        assert!(!is_known(&TypeTag(*b"icns")));
        // Lookups are case-sensitive.
        assert!(!is_known(&TypeTag(*b"IC10")));
    }

    #[test]
    fn entries_are_square_and_unique() {
        for info in all() {
            assert_eq!(info.width, info.height, "{} is not square", info.tag);
            assert!(std::ptr::eq(lookup(&info.tag).unwrap(), info));
        }
        assert_eq!(BY_TAG.len(), all().len());
    }

    #[test]
    fn metadata_is_carried() {
        let ic10 = lookup(&TypeTag(*b"ic10")).unwrap();
        assert_eq!(ic10.min_os_version, "10.7");
        assert!(ic10.description.contains("512x512@2x"));
    }
}
