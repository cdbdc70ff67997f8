use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Filename prefixes that mark a local file as an uploadable drop.
pub const DROP_PREFIXES: [&str; 2] = ["dnx-clr", "dnx-coreclr"];

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("directory {} does not exist", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Lists immediate entries of `directory` whose base filename starts with
/// any of `prefixes`.
///
/// Non-recursive; directories are skipped. An existing directory with no
/// matches yields an empty vec, not an error. Results are sorted so the
/// order is stable for an unchanged directory state.
pub fn scan(directory: &Path, prefixes: &[&str]) -> Result<Vec<PathBuf>, ScanError> {
    if !directory.is_dir() {
        return Err(ScanError::DirectoryNotFound(directory.to_path_buf()));
    }

    let mut drops = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        if let Some(name) = file_name.to_str() {
            if prefixes.iter().any(|prefix| name.starts_with(prefix)) {
                drops.push(entry.path());
            }
        }
    }
    drops.sort();
    debug!(
        directory = %directory.display(),
        matched = drops.len(),
        "Scanned directory for drops"
    );
    Ok(drops)
}
