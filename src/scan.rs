//! Source folder scanning

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;
use walkdir::WalkDir;

use crate::engine::tools::is_candidate_image_name;
use crate::state::StateStore;

/// List candidate image names directly inside `dir` (no recursion), sorted by name.
/// Dot-files, extensionless names and directories are skipped. Read errors are returned.
pub fn list_images(dir: &Path) -> Result<Vec<String>> {
    let mut images = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("scan directory {}", dir.display()))?;
        // Follows symlinks, so a link to a folder is skipped too.
        if entry.path().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            debug!("Skipping non UTF-8 name: {:?}", entry.file_name());
            continue;
        };
        if is_candidate_image_name(name) {
            images.push(name.to_string());
        }
    }
    debug!("Scanned {}: {} images", dir.display(), images.len());
    Ok(images)
}

/// Scan `dir` and remember the result as the store's scanned images.
pub fn scan_directory(store: &mut StateStore, dir: &Path) -> Result<Vec<String>> {
    let images = list_images(dir)?;
    store.set_scanned_images(images.clone());
    Ok(images)
}
