//! Source file discovery
//!
//! Lists candidate input files under a directory so the interactive flow can
//! offer them by index.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{MediaError, Result};

/// Recursively list files under `dir`, sorted by path
///
/// When `prefix` and/or `suffix` are given, only files whose name matches
/// all of the given filters are returned.
pub fn scan_files(dir: &Path, prefix: Option<&str>, suffix: Option<&str>) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(MediaError::InputNotFound {
            path: dir.display().to_string(),
            source: None,
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = entry.map_err(|e| MediaError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        if matches_filters(&entry.file_name().to_string_lossy(), prefix, suffix) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

fn matches_filters(name: &str, prefix: Option<&str>, suffix: Option<&str>) -> bool {
    prefix.map_or(true, |p| name.starts_with(p)) && suffix.map_or(true, |s| name.ends_with(s))
}

/// Pick the file at `index` from a scan result
pub fn select_file(files: &[PathBuf], index: usize) -> Result<&Path> {
    files
        .get(index)
        .map(PathBuf::as_path)
        .ok_or_else(|| MediaError::InvalidParameter {
            param: "file_index",
            value: index.to_string(),
            range: "an index from the listed files",
        })
}
