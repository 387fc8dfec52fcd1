//! Name, path and text utilities

use chrono::{DateTime, Utc};
use std::path::{Component, Path};

use crate::utils::config::LayoutNames;

/// True for dot-files (`.DS_Store`, `.hidden.jpg`, ...).
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

/// True when `name` contains a `.`, i.e. splits into more than one dot-separated part.
/// `photo.jpg` and `archive.tar.gz` qualify; `README` does not.
pub fn has_extension(name: &str) -> bool {
    name.split('.').count() > 1
}

/// Scanner filter: visible names with an extension.
pub fn is_candidate_image_name(name: &str) -> bool {
    !is_hidden_name(name) && has_extension(name)
}

/// True when `name` is a single plain file name, safe to join under the source and export folders.
pub fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Subfolder name for an export started at `now`: ISO-8601 at second resolution with `:` replaced by `-`.
pub fn memory_folder_name(now: DateTime<Utc>) -> String {
    now.format(LayoutNames::SUBFOLDER_FORMAT).to_string()
}

/// Remove HTML tags from `html`. Anything from `<` up to and including the next `>` is dropped;
/// an unterminated `<` drops the rest of the text.
pub fn strip_html_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match (in_tag, c) {
            (false, '<') => in_tag = true,
            (false, _) => out.push(c),
            (true, '>') => in_tag = false,
            (true, _) => {}
        }
    }
    out
}
