use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use walkdir::WalkDir;

static USFM_EXTENSIONS: &[&str] = &["sfm", "usfm"];

pub fn is_usfm_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| USFM_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

// Recursive, sorted by file name
pub fn find_usfm_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if entry.file_type().is_file() && is_usfm_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

// BOM is stripped, malformed sequences are replaced with U+FFFD
pub fn read_usfm_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        tracing::warn!(path = %path.display(), "Invalid UTF-8 sequences were replaced");
    }
    Ok(text.into_owned())
}
