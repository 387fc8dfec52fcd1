//! State directory lookup: env var → .env in working dir → per-user data dir.

use log::debug;
use std::path::{Path, PathBuf};

use crate::utils::config::PackagePaths;

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn try_env_then_dotenv(dir: &Path) -> Option<PathBuf> {
    let key = PackagePaths::get().home_env_key();
    if let Some(s) = non_empty_var(key) {
        return Some(PathBuf::from(s));
    }
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
        if let Some(s) = non_empty_var(key) {
            debug!("{} loaded from {}", key, env_path.display());
            return Some(PathBuf::from(s));
        }
    }
    None
}

/// Directory holding the state file and `.memento.toml`.
/// `MEMENTO_HOME` (env, then `.env` in `cwd`) wins over the per-user data directory.
pub fn resolve_state_dir(cwd: &Path) -> PathBuf {
    try_env_then_dotenv(cwd).unwrap_or_else(|| PackagePaths::get().default_state_dir())
}
