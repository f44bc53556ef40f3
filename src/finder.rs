//! Locating `.icns` files on disk.
//!
//! [`find_in_folder`] walks a directory tree and keeps regular files whose
//! extension is `icns` (any case). [`AppLocator`] resolves an application
//! name against a list of install roots (`/Applications` and
//! `~/Applications` by default) and walks every bundle it finds.
//!
//! Every root is treated the same way: a root that does not contain the
//! bundle is skipped, any other I/O failure is reported. Inside a tree that
//! is being walked, unreadable entries are logged and skipped.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const ICNS_EXTENSION: &str = "icns";
pub const APP_EXTENSION: &str = "app";
pub const SYSTEM_APPLICATIONS: &str = "/Applications";

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Application '{0}' not found in any search location")]
    AppNotFound(String),
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FinderError {
    fn io(path: &Path, source: io::Error) -> Self {
        FinderError::Io { path: path.to_path_buf(), source }
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Recursively collect `.icns` files under `folder`, in sorted order.
///
/// `folder` may also be a single file, which is returned as-is when it has
/// the `.icns` extension. Only a missing or unreadable root is an error;
/// nested entries that cannot be read are logged and skipped.
pub fn find_in_folder<P: AsRef<Path>>(folder: P) -> Result<Vec<PathBuf>, FinderError> {
    let folder = folder.as_ref();
    let meta = fs::metadata(folder).map_err(|e| FinderError::io(folder, e))?;
    let icons = if meta.is_dir() {
        collect(folder, &list_dir)?
    } else if meta.is_file() && has_extension(folder, ICNS_EXTENSION) {
        vec![folder.to_path_buf()]
    } else {
        Vec::new()
    };
    debug!(target: "icnsx::finder", folder = %folder.display(), found = icons.len(), "Folder scanned");
    Ok(icons)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
    Other,
}

/// Lists one directory as sorted `(path, kind)` pairs.
type ListDir<'a> = dyn Fn(&Path) -> io::Result<Vec<(PathBuf, EntryKind)>> + 'a;

fn list_dir(dir: &Path) -> io::Result<Vec<(PathBuf, EntryKind)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        // Symlinks are not followed.
        let kind = match fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_dir()  => EntryKind::Dir,
            Ok(meta) if meta.is_file() => EntryKind::File,
            Ok(_) => EntryKind::Other,
            Err(e) => {
                warn!(target: "icnsx::finder", path = %path.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        entries.push((path, kind));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

fn collect(root: &Path, list: &ListDir<'_>) -> Result<Vec<PathBuf>, FinderError> {
    let entries = list(root).map_err(|e| FinderError::io(root, e))?;
    let mut out = Vec::new();
    descend(entries, &mut out, list);
    Ok(out)
}

fn descend(entries: Vec<(PathBuf, EntryKind)>, out: &mut Vec<PathBuf>, list: &ListDir<'_>) {
    for (path, kind) in entries {
        match kind {
            EntryKind::Dir => match list(&path) {
                Ok(children) => descend(children, out, list),
                Err(e) => {
                    warn!(target: "icnsx::finder", path = %path.display(), error = %e, "Skipping unreadable directory");
                }
            },
            EntryKind::File if has_extension(&path, ICNS_EXTENSION) => out.push(path),
            _ => {}
        }
    }
}

/// Append `.app` unless `name` already carries it.
pub fn bundle_name(name: &str) -> String {
    if has_extension(Path::new(name), APP_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}.{APP_EXTENSION}")
    }
}

/// Resolves application bundles against an ordered list of roots.
#[derive(Debug, Clone)]
pub struct AppLocator {
    roots: Vec<PathBuf>,
}

impl Default for AppLocator {
    fn default() -> Self {
        let mut roots = vec![PathBuf::from(SYSTEM_APPLICATIONS)];
        if let Some(home) = env::var_os("HOME") {
            roots.push(PathBuf::from(home).join("Applications"));
        }
        Self { roots }
    }
}

impl AppLocator {
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Icons from every root that holds the bundle, in root order.
    pub fn find(&self, app: &str) -> Result<Vec<PathBuf>, FinderError> {
        let bundle = bundle_name(app);
        let mut icons = Vec::new();
        let mut found_any = false;

        for root in &self.roots {
            let candidate = root.join(&bundle);
            match fs::metadata(&candidate) {
                Ok(meta) if meta.is_dir() => {}
                Ok(_) => continue,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(target: "icnsx::finder", path = %candidate.display(), "Bundle not present");
                    continue;
                }
                Err(e) => return Err(FinderError::io(&candidate, e)),
            }
            found_any = true;
            icons.extend(find_in_folder(&candidate)?);
        }

        if !found_any {
            return Err(FinderError::AppNotFound(bundle));
        }
        Ok(icons)
    }
}

/// Search the default application roots for `app`.
pub fn find_in_app(app: &str) -> Result<Vec<PathBuf>, FinderError> {
    AppLocator::default().find(app)
}
