use anyhow::{Context, Result, bail};
use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::utils::write_atomically;

/// String key → string value file, rewritten as a whole on every `set_item`.
///
/// On disk it is a single JSON object. Structured values are stored as JSON text inside
/// the string, so a corrupt value only affects its own key.
#[derive(Debug, Default)]
pub struct LocalStorage {
    path: Option<PathBuf>,
    items: BTreeMap<String, String>,
}

impl LocalStorage {
    /// Open the file at `path`. A missing file is an empty storage; it is created on first write.
    pub fn open(path: &Path) -> Result<Self> {
        let items = match std::fs::read_to_string(path) {
            Ok(s) if s.trim().is_empty() => BTreeMap::new(),
            Ok(s) => parse_items(&s)
                .with_context(|| format!("parse state file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No state file at {}; starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("read state file {}", path.display()));
            }
        };
        Ok(Self {
            path: Some(path.to_path_buf()),
            items,
        })
    }

    /// Storage with no backing file; writes stay in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.items.insert(key.to_string(), value.into());
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.items).context("serialize state")?;
        write_atomically(path, json.as_bytes())
    }
}

fn parse_items(s: &str) -> Result<BTreeMap<String, String>> {
    let value: serde_json::Value = serde_json::from_str(s)?;
    let serde_json::Value::Object(map) = value else {
        bail!("expected a JSON object of string values");
    };
    let mut items = BTreeMap::new();
    for (key, value) in map {
        match value {
            serde_json::Value::String(s) => {
                items.insert(key, s);
            }
            serde_json::Value::Null => {}
            // Non-string values are kept as their JSON text, the way a string store would hold them.
            other => {
                items.insert(key, other.to_string());
            }
        }
    }
    Ok(items)
}
