//! Load `.memento.toml` from the state directory (CLI only). Lib callers pass [`ExportOpts`](crate::ExportOpts) directly.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Deserialize)]
pub(crate) struct MementoToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    template: Option<String>,
    thumb_width: Option<u32>,
    jpeg_quality: Option<u8>,
}

/// Load the config file from `dir` if present. Returns None if missing or unreadable; parse errors are logged.
pub(crate) fn load_memento_toml(dir: &Path) -> Option<MementoToml> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    toml::from_str(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $sec_field:ident => $($opts_field:ident).+) => {
        if let Some(v) = $sec.$sec_field {
            $opts.$($opts_field).+ = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI flags.
/// A relative `template` path is resolved against `dir`.
pub(crate) fn apply_file_to_opts(file: &MementoToml, dir: &Path, opts: &mut Opts) {
    let sec = &file.settings;
    if let Some(ref t) = sec.template {
        let p = PathBuf::from(t);
        opts.export.template = Some(if p.is_absolute() { p } else { dir.join(p) });
    }
    apply_file_opt!(sec, opts, thumb_width => export.thumb_width);
    apply_file_opt!(sec, opts, jpeg_quality => export.jpeg_quality);
}
