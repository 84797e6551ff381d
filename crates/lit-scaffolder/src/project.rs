//! Locating the project the generator just created

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// The most recently modified visible directory directly under `base`.
///
/// The generator creates the project next to whatever already exists, so the
/// newest directory is the one it just wrote. Hidden entries and plain files
/// are skipped.
pub fn newest_directory(base: &Path) -> io::Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(base)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let metadata = entry.metadata()?;
        if !metadata.is_dir() {
            continue;
        }

        let modified = metadata.modified()?;
        if newest.as_ref().map_or(true, |(seen, _)| modified > *seen) {
            newest = Some((modified, entry.path()));
        }
    }

    Ok(newest.map(|(_, path)| path))
}
