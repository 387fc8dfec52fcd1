//! Public and internal types for the memento API and export pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::utils::config::ThumbnailConsts;

/// A saved gallery export. Appended to the memory history, never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    /// Description with HTML tags stripped.
    pub description: String,
    /// Destination subfolder of the export.
    pub path: PathBuf,
    /// Up to [`MEMORY_PREVIEW_THUMBS`](crate::utils::config::MEMORY_PREVIEW_THUMBS) thumbnail paths.
    pub thumbs: Vec<PathBuf>,
}

/// What to export: image names (relative to the source folder) and a description (HTML allowed).
#[derive(Clone, Debug, Default)]
pub struct ExportRequest {
    pub images: Vec<String>,
    pub description: String,
}

impl ExportRequest {
    pub fn new<I, S>(images: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            images: images.into_iter().map(Into::into).collect(),
            description: description.into(),
        }
    }
}

/// Step of the export an individual failure belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportStage {
    /// Creating `images/` or `thumb/`.
    Layout,
    /// Image name rejected before any file work.
    Selection,
    Copy,
    Thumbnail,
    /// Reading or filling the gallery template.
    Template,
    /// Writing `index.html`.
    GalleryWrite,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExportStage::Layout => "layout",
            ExportStage::Selection => "selection",
            ExportStage::Copy => "copy",
            ExportStage::Thumbnail => "thumbnail",
            ExportStage::Template => "template",
            ExportStage::GalleryWrite => "gallery write",
        };
        f.write_str(s)
    }
}

/// One operation that failed during an export. `image` is None for whole-export steps (layout, template).
#[derive(Clone, Debug)]
pub struct ExportFailure {
    pub image: Option<String>,
    pub stage: ExportStage,
    pub message: String,
}

impl fmt::Display for ExportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.image {
            Some(image) => write!(f, "{} [{}]: {}", image, self.stage, self.message),
            None => write!(f, "[{}]: {}", self.stage, self.message),
        }
    }
}

/// Whether every operation of an export succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    Complete,
    Partial,
}

/// Result of [`save_memory`](crate::pipeline::save_memory).
#[derive(Clone, Debug)]
pub struct ExportReport {
    /// Subfolder name, shown to the user as the reference name.
    pub reference: String,
    /// The memory recorded in the store for this export.
    pub memory: Memory,
    /// Images copied into `images/`.
    pub copied: Vec<String>,
    /// Images with a thumbnail in `thumb/`.
    pub thumbnails: Vec<String>,
    /// Whether `index.html` was written.
    pub gallery_written: bool,
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    pub fn outcome(&self) -> ExportOutcome {
        if self.failures.is_empty() {
            ExportOutcome::Complete
        } else {
            ExportOutcome::Partial
        }
    }

    pub fn is_complete(&self) -> bool {
        self.outcome() == ExportOutcome::Complete
    }
}

/// Lib options for [`save_memory`](crate::pipeline::save_memory).
#[derive(Clone, Debug)]
pub struct ExportOpts {
    /// Gallery template file. When None, the built-in template is used.
    pub template: Option<PathBuf>,
    /// Thumbnail width in pixels.
    pub thumb_width: u32,
    /// Thumbnail JPEG quality (1..=100).
    pub jpeg_quality: u8,
    /// Show a progress bar over copy and thumbnail operations.
    pub progress: bool,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            template: None,
            thumb_width: ThumbnailConsts::WIDTH,
            jpeg_quality: ThumbnailConsts::JPEG_QUALITY,
            progress: false,
        }
    }
}

/// Full options (CLI). Use [`ExportOpts`] for lib.
#[derive(Clone, Debug, Default)]
pub struct Opts {
    /// State file path. When None, `<state dir>/memento.json`.
    pub state_path: Option<PathBuf>,
    /// Debug logging and progress bar.
    pub verbose: bool,
    pub export: ExportOpts,
}
