//! Frame symbol tables
//!
//! Scans a directory of image frames that the firmware build embeds as
//! binary resources, and generates:
//! - a header declaring each frame's linker boundary symbols, plus a
//!   `g_frames` table of start/end pairs in playback order;
//! - optionally, a build-descriptor fragment registering each frame as an
//!   embedded file.
//!
//! Two presets cover the usual layouts: [`FrameTableConfig::indexed`]
//! (numeric order, flat rows) and [`FrameTableConfig::embedded`]
//! (lexicographic order, braced rows, build fragment).

pub mod emit;
pub mod order;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

pub use emit::{render_build_fragment, render_header, BuildFragment, FrameSymbol, RowStyle};
pub use order::{numeric_key, sort_frames, FrameOrder};

use crate::error::{MediaError, Result};

/// Table generation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTableConfig {
    /// Ordering policy for table rows
    pub order: FrameOrder,
    /// Row layout
    pub row_style: RowStyle,
    /// Name of the generated table
    pub table_name: String,
    /// Build fragment settings; `None` skips the fragment
    pub build: Option<BuildFragment>,
}

impl FrameTableConfig {
    /// Numeric order, flat rows, no build fragment
    pub fn indexed() -> Self {
        FrameTableConfig {
            order: FrameOrder::Numeric,
            row_style: RowStyle::Flat,
            table_name: "g_frames".to_string(),
            build: None,
        }
    }

    /// Lexicographic order, braced rows, with a build fragment
    pub fn embedded() -> Self {
        FrameTableConfig {
            order: FrameOrder::Lexicographic,
            row_style: RowStyle::Braced,
            table_name: "g_frames".to_string(),
            build: Some(BuildFragment::default()),
        }
    }
}

impl Default for FrameTableConfig {
    fn default() -> Self {
        Self::indexed()
    }
}

/// Summary of one table generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTableReport {
    /// Path of the generated header
    pub header: PathBuf,
    /// Path of the generated build fragment, if any
    pub build_fragment: Option<PathBuf>,
    /// Frame file names in table order
    pub frames: Vec<String>,
}

/// Recursively collect the base names of all files under `dir`
///
/// Directory structure below `dir` is not preserved. The result is in walk
/// order; callers sort it with [`sort_frames`].
pub fn discover_frames(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(MediaError::InputNotFound {
            path: dir.display().to_string(),
            source: None,
        });
    }

    let mut names = Vec::new();
    let mut seen = HashSet::new();
    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = entry.map_err(|e| MediaError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if !seen.insert(name.clone()) {
            warn!(
                "Duplicate frame name '{}' at {}; symbols will collide",
                name,
                entry.path().display()
            );
        }
        names.push(name);
    }

    debug!("Discovered {} frame files in {}", names.len(), dir.display());
    Ok(names)
}

/// Build the ordered symbol list for a frames directory
pub fn collect_frame_symbols(dir: &Path, order: FrameOrder) -> Result<Vec<FrameSymbol>> {
    let mut names = discover_frames(dir)?;
    sort_frames(&mut names, order)?;
    Ok(names.iter().map(|name| FrameSymbol::new(name)).collect())
}

/// Generate the header (and optional build fragment) for a frames directory
pub fn generate_frame_table(
    frames_dir: &Path,
    config: &FrameTableConfig,
    header_path: &Path,
) -> Result<FrameTableReport> {
    let symbols = collect_frame_symbols(frames_dir, config.order)?;
    if symbols.is_empty() {
        warn!("No frames found in {}; emitting an empty table", frames_dir.display());
    }
    for symbol in &symbols {
        info!("\"{}\"", symbol.file_name);
    }

    let header = render_header(&symbols, &config.table_name, config.row_style);
    fs::write(header_path, header).map_err(|e| MediaError::write_failure(header_path, e))?;
    info!("Wrote {} ({} frames)", header_path.display(), symbols.len());

    let build_fragment = match &config.build {
        Some(build) => {
            let fragment = render_build_fragment(&symbols, build);
            fs::write(&build.output, fragment)
                .map_err(|e| MediaError::write_failure(&build.output, e))?;
            info!("Wrote {}", build.output.display());
            Some(build.output.clone())
        }
        None => None,
    };

    Ok(FrameTableReport {
        header: header_path.to_path_buf(),
        build_fragment,
        frames: symbols.into_iter().map(|s| s.file_name).collect(),
    })
}
