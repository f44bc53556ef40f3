//! High-level listing and extraction of PNG icons.
//!
//! ```no_run
//! use icnsx::extract::{extract_icons, ExtractOptions};
//! use icnsx::finder::find_in_folder;
//!
//! let paths = find_in_folder("/Applications/Safari.app")?;
//! let report = extract_icons(&paths, &ExtractOptions::default())?;
//! println!("{} icon(s) written", report.written.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Only PNG payloads are considered. A record's size comes from the catalog;
//! a record without a catalog size counts as 0 and therefore only passes a
//! `min_size` of 0. Files that fail to decode are logged and skipped, and a
//! file whose record scan stopped early still contributes the records read
//! before the failure.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

use crate::decoder::{ArchiveDecoder, DecodeOptions, IcnsArchive};
use crate::record::IconRecord;
use crate::tag::TypeTag;

pub const DEFAULT_MIN_SIZE: u32 = 128;
pub const DEFAULT_OUTPUT_DIR: &str = "./extracted";

// ── ExtractOptions ────────────────────────────────────────────────────────────

/// Configuration for [`list_icons`] and [`extract_icons`].
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub output_dir: PathBuf,
    /// Smallest icon edge, in pixels, that is listed or written.
    pub min_size:   u32,
    pub decode:     DecodeOptions,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            min_size:   DEFAULT_MIN_SIZE,
            decode:     DecodeOptions::default(),
        }
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// A PNG record that passed the size filter.
#[derive(Debug, Clone, Copy)]
pub struct SelectedIcon<'a> {
    /// 1-based position of the record within its archive.
    pub index:  usize,
    pub record: &'a IconRecord,
    pub size:   u32,
}

pub fn select_icons(archive: &IcnsArchive, min_size: u32) -> Vec<SelectedIcon<'_>> {
    archive
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_png())
        .map(|(i, record)| SelectedIcon {
            index: i + 1,
            record,
            size: record.pixel_size().unwrap_or(0),
        })
        .filter(|icon| icon.size >= min_size)
        .collect()
}

// ── Naming ────────────────────────────────────────────────────────────────────

fn strip_suffix_ci<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    if s.is_char_boundary(split) && s[split..].eq_ignore_ascii_case(suffix) {
        Some(&s[..split])
    } else {
        None
    }
}

/// `<bundle>_<icon>` in lower case.
///
/// `<bundle>` is the stem of the last `.app` component of `path`, or the
/// first normal component when the icon is not inside a bundle. `<icon>` is
/// the stem of the last `.icns` component.
pub fn normalize_icon_name(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_lowercase()),
            _ => None,
        })
        .collect();

    let mut base = None;
    let mut name = None;
    for part in &parts {
        if let Some(stem) = strip_suffix_ci(part, ".app") {
            base = Some(stem.to_string());
        }
        if let Some(stem) = strip_suffix_ci(part, ".icns") {
            name = Some(stem.to_string());
        }
    }
    let base = base
        .or_else(|| parts.first().cloned())
        .unwrap_or_default();
    format!("{}_{}", base, name.unwrap_or_default())
}

pub fn output_file_name(normalized: &str, index: usize, size: u32) -> String {
    format!("{normalized}_icon{index} ({size}x{size}).png")
}

// ── Listing ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct IconSummary {
    pub index:       usize,
    pub tag:         TypeTag,
    pub size:        u32,
    pub payload_len: usize,
}

/// One archive that holds at least one selected icon.
#[derive(Debug, Clone, Serialize)]
pub struct ListEntry {
    pub path:     PathBuf,
    pub icons:    Vec<IconSummary>,
    /// Set when the record scan stopped before the declared end.
    pub partial:  bool,
}

fn decode_or_skip(decoder: &ArchiveDecoder, path: &Path) -> Option<(IcnsArchive, bool)> {
    match decoder.decode_file(path) {
        Ok(decoded) => {
            let partial = !decoded.is_complete();
            if let Some(e) = &decoded.error {
                warn!(target: "icnsx::extract", path = %path.display(), error = %e,
                      "Using records decoded before the failure");
            }
            Some((decoded.archive, partial))
        }
        Err(e) => {
            warn!(target: "icnsx::extract", path = %path.display(), error = %e, "Skipping file");
            None
        }
    }
}

pub fn list_icons(paths: &[PathBuf], opts: &ExtractOptions) -> Vec<ListEntry> {
    let decoder = ArchiveDecoder::with_options(opts.decode);
    paths
        .iter()
        .filter_map(|path| {
            let (archive, partial) = decode_or_skip(&decoder, path)?;
            let icons: Vec<IconSummary> = select_icons(&archive, opts.min_size)
                .into_iter()
                .map(|icon| IconSummary {
                    index:       icon.index,
                    tag:         icon.record.type_tag,
                    size:        icon.size,
                    payload_len: icon.record.payload.len(),
                })
                .collect();
            if icons.is_empty() {
                None
            } else {
                Some(ListEntry { path: path.clone(), icons, partial })
            }
        })
        .collect()
}

// ── Extraction ────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ExtractReport {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub written:       Vec<PathBuf>,
}

/// Write every selected PNG payload under `opts.output_dir`, creating it if
/// necessary. Only a failure to create the output directory aborts the run;
/// per-file and per-icon failures are logged.
pub fn extract_icons(paths: &[PathBuf], opts: &ExtractOptions) -> io::Result<ExtractReport> {
    fs::create_dir_all(&opts.output_dir)?;
    let decoder = ArchiveDecoder::with_options(opts.decode);
    let mut report = ExtractReport::default();

    for path in paths {
        report.files_scanned += 1;
        let Some((archive, _)) = decode_or_skip(&decoder, path) else {
            report.files_skipped += 1;
            continue;
        };
        let normalized = normalize_icon_name(path);
        for icon in select_icons(&archive, opts.min_size) {
            let dest = opts
                .output_dir
                .join(output_file_name(&normalized, icon.index, icon.size));
            match fs::write(&dest, &icon.record.payload) {
                Ok(()) => {
                    info!(target: "icnsx::extract", dest = %dest.display(), "Icon written");
                    report.written.push(dest);
                }
                Err(e) => {
                    warn!(target: "icnsx::extract", dest = %dest.display(), error = %e,
                          "Cannot write icon");
                }
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::IcnsHeader;

    fn record(tag: &[u8; 4], payload: &[u8]) -> IconRecord {
        IconRecord {
            type_tag: TypeTag(*tag),
            length:   8 + payload.len() as u32,
            payload:  payload.to_vec(),
        }
    }

    fn archive(records: Vec<IconRecord>) -> IcnsArchive {
        let size = 8 + records.iter().map(|r| r.length).sum::<u32>();
        IcnsArchive {
            header: IcnsHeader { magic: TypeTag(*b"icns"), declared_size: size },
            records,
        }
    }

    #[test]
    fn selects_png_records_at_or_above_min_size() {
        let ar = archive(vec![
            record(b"ic11", b"\x89PNG...."), // 32
            record(b"ic13", b"\x89PNG...."), // 256
            record(b"ic14", b"\x00\x00\x00\x0cjP  "), // 512, not png
            record(b"ic10", b"\x89PNG...."), // 1024
        ]);
        let picked: Vec<(usize, u32)> = select_icons(&ar, 256)
            .iter()
            .map(|i| (i.index, i.size))
            .collect();
        assert_eq!(picked, vec![(2, 256), (4, 1024)]);
        assert_eq!(select_icons(&ar, 0).len(), 3);
    }

    #[test]
    fn normalizes_bundle_paths() {
        let p = Path::new("/Applications/Safari.app/Contents/Resources/AppIcon.icns");
        assert_eq!(normalize_icon_name(p), "safari_appicon");
    }

    #[test]
    fn normalizes_paths_outside_bundles() {
        assert_eq!(normalize_icon_name(Path::new("icons/Folder.ICNS")), "icons_folder");
        assert_eq!(normalize_icon_name(Path::new("/tmp/x/doc.icns")), "tmp_doc");
    }

    #[test]
    fn output_names_carry_index_and_size() {
        assert_eq!(output_file_name("safari_appicon", 3, 512), "safari_appicon_icon3 (512x512).png");
    }
}
