//! Application configuration constants.
//! Export layout, thumbnail tuning and state file names in one place.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    state_filename: String,
    config_filename: String,
    home_env_key: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                state_filename: format!("{pkg}.json"),
                config_filename: format!(".{pkg}.toml"),
                home_env_key: format!("{}_HOME", pkg.to_uppercase()),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// File name of the persisted key/value state (e.g. `memento.json`).
    pub fn state_filename(&self) -> &str {
        &self.state_filename
    }

    /// File name of the optional config file in the state directory (e.g. `.memento.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Environment variable overriding the state directory (e.g. `MEMENTO_HOME`).
    pub fn home_env_key(&self) -> &str {
        &self.home_env_key
    }

    /// Per-user data directory for state, e.g. `~/.local/share/memento` on Linux.
    /// Falls back to the home directory, then the working directory.
    pub fn default_state_dir(&self) -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(self.pkg_name)
    }

    pub fn state_path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.state_filename())
    }
}

// ---- Export layout ----

/// Folder and file names inside one exported memory.
pub struct LayoutNames;

impl LayoutNames {
    /// Full-size copies of the selected images.
    pub const IMAGES_DIR: &'static str = "images";
    /// Generated thumbnails, same file names as the originals.
    pub const THUMB_DIR: &'static str = "thumb";
    /// Rendered gallery page.
    pub const INDEX_FILE: &'static str = "index.html";
    /// `chrono` format of the per-export subfolder (UTC, second resolution, no colons).
    pub const SUBFOLDER_FORMAT: &'static str = "%Y-%m-%dT%H-%M-%S";
}

// ---- Thumbnails ----

/// Thumbnail tuning defaults.
pub struct ThumbnailConsts;

impl ThumbnailConsts {
    /// Target thumbnail width in pixels; height follows the aspect ratio.
    pub const WIDTH: u32 = 350;
    /// JPEG quality for thumbnails (1..=100).
    pub const JPEG_QUALITY: u8 = 100;
    /// Largest width or height a JPEG can hold.
    pub const MAX_DIMENSION: u32 = u16::MAX as u32;
}

// ---- Memories ----

/// Max preview thumbnails recorded on a memory.
pub const MEMORY_PREVIEW_THUMBS: usize = 3;

// ---- Gallery template ----

/// Built-in gallery template used when no template file is configured.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/gallery.html");
/// Element id receiving one `<li>` per exported image.
pub const GRID_ELEMENT_ID: &str = "grid";
/// Element id receiving the memory description.
pub const DESCRIPTION_ELEMENT_ID: &str = "description";
