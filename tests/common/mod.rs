#![allow(dead_code)]

use icnsx::{IcnsHeader, IconRecord};

/// Byte-level encoder used only to build fixtures.
pub fn encode(header: &IcnsHeader, records: &[IconRecord]) -> Vec<u8> {
    let mut out = header.magic.as_bytes().to_vec();
    out.extend_from_slice(&header.declared_size.to_be_bytes());
    for r in records {
        out.extend_from_slice(r.type_tag.as_bytes());
        out.extend_from_slice(&r.length.to_be_bytes());
        out.extend_from_slice(&r.payload);
    }
    out
}

/// A well-formed archive whose declared size covers every record.
pub fn archive(records: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
    let records: Vec<IconRecord> = records
        .iter()
        .map(|(tag, payload)| record(tag, payload))
        .collect();
    let size = 8 + records.iter().map(|r| r.length).sum::<u32>();
    let header = IcnsHeader { magic: icnsx::TypeTag(*b"icns"), declared_size: size };
    encode(&header, &records)
}

pub fn record(tag: &[u8; 4], payload: &[u8]) -> IconRecord {
    IconRecord {
        type_tag: icnsx::TypeTag(*tag),
        length:   8 + payload.len() as u32,
        payload:  payload.to_vec(),
    }
}

pub fn png_payload(fill: u8) -> Vec<u8> {
    let mut data = icnsx::payload::PNG_SIGNATURE.to_vec();
    data.extend(std::iter::repeat(fill).take(24));
    data
}
