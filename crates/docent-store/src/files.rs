//! Upload storage on the local filesystem
//!
//! Files live under `<root>/documents/<user_id>/`. The relative path (with
//! forward slashes) is what gets recorded on the document.

use crate::StoreError;
use docent_domain::UserId;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Longest stem kept from an uploaded filename, in bytes
pub const MAX_STEM_BYTES: usize = 100;

/// Longest extension kept from an uploaded filename, in bytes
pub const MAX_EXTENSION_BYTES: usize = 16;

/// A file written by [`FileStore::save`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Path relative to the media root, e.g. `documents/3/report.pdf`
    pub relative: String,
    /// Absolute location on disk
    pub absolute: PathBuf,
    /// Bytes written
    pub size: u64,
}

/// Stores uploaded bytes beneath a media root
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root` (created on first save)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The media root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` for `owner`, keeping `filename` unless it is taken
    ///
    /// A taken name gets a numeric suffix: `report.pdf`, `report_1.pdf`, ...
    pub fn save(&self, owner: UserId, filename: &str, bytes: &[u8]) -> Result<StoredFile, StoreError> {
        let dir_relative = format!("documents/{}", owner);
        let dir = self.root.join(&dir_relative);
        std::fs::create_dir_all(&dir)?;

        let name = sanitize_filename(filename);
        let (stem, ext) = split_extension(&name);

        for attempt in 0u32.. {
            let candidate = match (attempt, ext) {
                (0, _) => name.clone(),
                (n, Some(ext)) => format!("{}_{}.{}", stem, n, ext),
                (n, None) => format!("{}_{}", stem, n),
            };
            let absolute = dir.join(&candidate);

            let mut file = match OpenOptions::new().write(true).create_new(true).open(&absolute) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            file.write_all(bytes)?;

            let relative = format!("{}/{}", dir_relative, candidate);
            debug!("Stored {} bytes at {}", bytes.len(), relative);

            return Ok(StoredFile {
                relative,
                absolute,
                size: bytes.len() as u64,
            });
        }

        Err(StoreError::InvalidData(format!("no free name for '{}'", filename)))
    }

    /// Absolute path of a stored file
    pub fn path_for(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Delete a stored file; a file that is already gone is not an error
    pub fn remove(&self, relative: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(relative)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Stored file {} was already missing", relative);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Reduce an uploaded filename to a safe single path component
///
/// Long names are shortened so the stem fits [`MAX_STEM_BYTES`] and the
/// extension [`MAX_EXTENSION_BYTES`], leaving room for a `_N` suffix.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        return "upload".to_string();
    }

    match split_extension(cleaned) {
        (stem, Some(ext)) => format!(
            "{}.{}",
            truncate_bytes(stem, MAX_STEM_BYTES),
            truncate_bytes(ext, MAX_EXTENSION_BYTES)
        ),
        (stem, None) => truncate_bytes(stem, MAX_STEM_BYTES).to_string(),
    }
}

fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}
