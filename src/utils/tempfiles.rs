use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::config::PackagePaths;

/// Get the temporary sibling path used while rewriting `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_else(|| PackagePaths::get().state_filename());
    path.parent()
        .unwrap_or(Path::new("."))
        .join(format!("{name}.tmp"))
}

pub fn rename_temp_to_final(temp_path: &Path, final_path: &Path) -> Result<()> {
    fs::rename(temp_path, final_path).with_context(|| {
        format!(
            "atomic rename temp state to final path ({} -> {})",
            temp_path.display(),
            final_path.display()
        )
    })
}

/// Write `contents` to `path` through a temp file and rename, creating the parent directory if needed.
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create state directory {}", parent.display()))?;
    }
    let temp_path = temp_path_for(path);
    fs::write(&temp_path, contents)
        .with_context(|| format!("write temp state {}", temp_path.display()))?;
    rename_temp_to_final(&temp_path, path)
}
