//! Saving rendered sheets to disk as standalone HTML pages.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::render::RenderedSheet;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Write the full document to `<dir>/<sheet>_<YYYYmmdd_HHMMSS>.html`,
/// creating `dir` if needed. Returns the written path.
///
/// # Errors
/// Returns [`XlmarkupError::Io`](crate::XlmarkupError::Io) when the
/// directory or file cannot be written.
pub fn save_document(dir: &Path, sheet_name: &str, rendered: &RenderedSheet) -> Result<PathBuf> {
    save_document_at(dir, sheet_name, rendered, chrono::Local::now().naive_local())
}

/// [`save_document`] with an explicit timestamp.
///
/// # Errors
/// See [`save_document`].
pub fn save_document_at(
    dir: &Path,
    sheet_name: &str,
    rendered: &RenderedSheet,
    timestamp: NaiveDateTime,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(document_file_name(sheet_name, timestamp));
    fs::write(&path, rendered.to_document(sheet_name))?;
    log::info!("Saved sheet '{sheet_name}' to {}", path.display());
    Ok(path)
}

pub fn document_file_name(sheet_name: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}.html",
        sanitize_file_stem(sheet_name),
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

/// Keep letters, digits, `-` and `_`; everything else becomes `_`.
fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "sheet".to_string()
    } else {
        stem
    }
}
