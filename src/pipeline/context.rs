//! Export context: resolved folders of one export and the options it runs with.

use anyhow::{Context, Result};
use log::debug;
use std::io;
use std::path::{Path, PathBuf};

use crate::ExportOpts;
use crate::utils::config::LayoutNames;

/// Folders and files of one exported memory under `<destination>/<reference>`.
#[derive(Clone, Debug)]
pub struct ExportLayout {
    pub reference: String,
    pub root: PathBuf,
    pub images_dir: PathBuf,
    pub thumb_dir: PathBuf,
    pub index_file: PathBuf,
}

impl ExportLayout {
    pub fn new(destination: &Path, reference: &str) -> Self {
        let root = destination.join(reference);
        Self {
            reference: reference.to_string(),
            images_dir: root.join(LayoutNames::IMAGES_DIR),
            thumb_dir: root.join(LayoutNames::THUMB_DIR),
            index_file: root.join(LayoutNames::INDEX_FILE),
            root,
        }
    }

    pub fn image_path(&self, image: &str) -> PathBuf {
        self.images_dir.join(image)
    }

    pub fn thumb_path(&self, image: &str) -> PathBuf {
        self.thumb_dir.join(image)
    }

    /// Create the export root. Already existing is fine; anything else is an error.
    pub fn create_root(&self) -> Result<()> {
        create_dir_idempotent(&self.root)
            .with_context(|| format!("create memory folder {}", self.root.display()))
    }
}

/// `create_dir` that treats an existing directory as success.
/// Anything else already at `dir` (e.g. a regular file) is an error.
pub fn create_dir_idempotent(dir: &Path) -> io::Result<()> {
    match std::fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if !dir.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} exists and is not a directory", dir.display()),
                ));
            }
            debug!("{} already exists", dir.display());
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Everything one export run needs besides the store.
#[derive(Clone, Debug)]
pub struct ExportContext {
    pub source: PathBuf,
    pub layout: ExportLayout,
    pub opts: ExportOpts,
}

impl ExportContext {
    pub fn source_path(&self, image: &str) -> PathBuf {
        self.source.join(image)
    }
}
