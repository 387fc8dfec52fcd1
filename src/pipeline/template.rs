//! Gallery page rendering: fills the `#grid` and `#description` elements of an HTML template.
//!
//! The template is handled as text. Elements are located by their `id` attribute and matched
//! to their closing tag by counting nested tags of the same name, which is all a hand-written
//! gallery template needs.

use anyhow::{Context, Result, anyhow};
use maud::html;
use std::borrow::Cow;
use std::path::Path;

use crate::utils::config::{
    DEFAULT_TEMPLATE, DESCRIPTION_ELEMENT_ID, GRID_ELEMENT_ID, LayoutNames,
};

const DOCTYPE: &str = "<!DOCTYPE html>";

/// One image in the gallery grid.
#[derive(Clone, Debug)]
pub struct GalleryItem<'a> {
    pub image: &'a str,
    pub note: Option<&'a str>,
}

/// Read the template at `path`, or the built-in one when None.
pub fn load_template(path: Option<&Path>) -> Result<Cow<'static, str>> {
    match path {
        Some(p) => std::fs::read_to_string(p)
            .map(Cow::Owned)
            .with_context(|| format!("read template {}", p.display())),
        None => Ok(Cow::Borrowed(DEFAULT_TEMPLATE)),
    }
}

/// `<li>` markup for one image: full-size link in `data-src`, caption in `data-sub-html`.
pub fn gallery_item_html(item: &GalleryItem<'_>) -> String {
    let full = format!("./{}/{}", LayoutNames::IMAGES_DIR, item.image);
    let thumb = format!("./{}/{}", LayoutNames::THUMB_DIR, item.image);
    let caption = item.note.filter(|n| !n.is_empty());
    html! {
        li data-src=(full) data-sub-html=[caption] {
            a href="#" { img src=(thumb); }
        }
    }
    .into_string()
}

/// Render the gallery page: append one item per image to `#grid`, set the inner HTML of
/// `#description` to `description` (inserted as-is), and emit exactly one leading doctype.
pub fn render_gallery(template: &str, items: &[GalleryItem<'_>], description: &str) -> Result<String> {
    let grid = find_element_by_id(template, GRID_ELEMENT_ID)
        .ok_or_else(|| anyhow!("template has no element with id \"{}\"", GRID_ELEMENT_ID))?;
    let mut html = String::with_capacity(template.len() + items.len() * 128 + description.len());
    html.push_str(&template[..grid.inner_end]);
    for item in items {
        html.push_str(&gallery_item_html(item));
    }
    html.push_str(&template[grid.inner_end..]);

    let desc = find_element_by_id(&html, DESCRIPTION_ELEMENT_ID).ok_or_else(|| {
        anyhow!("template has no element with id \"{}\"", DESCRIPTION_ELEMENT_ID)
    })?;
    html.replace_range(desc.inner_start..desc.inner_end, description);

    Ok(format!("{}\n{}", DOCTYPE, strip_doctype(&html)))
}

/// Drop the template's own `<!doctype ...>` (any case), also when comments come before it.
/// Those comments are kept.
fn strip_doctype(html: &str) -> Cow<'_, str> {
    let mut pos = 0;
    loop {
        let rest = &html[pos..];
        let trimmed = rest.trim_start();
        pos += rest.len() - trimmed.len();
        if trimmed.starts_with("<!--") {
            match trimmed.find("-->") {
                Some(end) => pos += end + 3,
                None => return Cow::Borrowed(html.trim_start()),
            }
            continue;
        }
        if !trimmed
            .get(..9)
            .is_some_and(|head| head.eq_ignore_ascii_case("<!doctype"))
        {
            return Cow::Borrowed(html.trim_start());
        }
        let tail = match trimmed.find('>') {
            Some(end) => trimmed[end + 1..].trim_start(),
            None => "",
        };
        let comments = html[..pos].trim();
        return if comments.is_empty() {
            Cow::Borrowed(tail)
        } else {
            Cow::Owned(format!("{comments}\n{tail}"))
        };
    }
}

/// Byte range of an element's content, between its start tag and its closing tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementSpan {
    pub inner_start: usize,
    pub inner_end: usize,
}

struct StartTag {
    name: String,
    id: Option<String>,
    /// Index just past the closing `>`.
    end: usize,
    self_closing: bool,
}

/// Locate the element whose `id` attribute equals `id`. None if absent, self-closing, or never closed.
pub fn find_element_by_id(html: &str, id: &str) -> Option<ElementSpan> {
    let mut pos = 0;
    while let Some(rel) = html[pos..].find('<') {
        let start = pos + rel;
        if html[start..].starts_with("<!--") {
            pos = html[start..]
                .find("-->")
                .map_or(html.len(), |e| start + e + 3);
            continue;
        }
        let Some(tag) = parse_start_tag(html, start) else {
            pos = start + 1;
            continue;
        };
        if tag.id.as_deref() == Some(id) {
            if tag.self_closing {
                return None;
            }
            let inner_end = find_closing_tag(html, &tag.name, tag.end)?;
            return Some(ElementSpan {
                inner_start: tag.end,
                inner_end,
            });
        }
        pos = tag.end;
    }
    None
}

/// Parse the start tag beginning at `start` (which must point at `<`).
fn parse_start_tag(html: &str, start: usize) -> Option<StartTag> {
    let bytes = html.as_bytes();
    let name_start = start + 1;
    let mut i = name_start;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-') {
        i += 1;
    }
    if i == name_start || !bytes[name_start].is_ascii_alphabetic() {
        return None;
    }
    let name = html[name_start..i].to_ascii_lowercase();

    let attrs_start = i;
    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        match (quote, bytes[i]) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"') | (None, b'\'') => quote = Some(bytes[i]),
            (None, b'>') => break,
            _ => {}
        }
        i += 1;
    }
    if i >= bytes.len() {
        return None;
    }
    let attrs = &html[attrs_start..i];
    Some(StartTag {
        name,
        id: attribute_value(attrs, "id"),
        end: i + 1,
        self_closing: attrs.trim_end().ends_with('/'),
    })
}

/// Value of attribute `wanted` (case-insensitive name) in a start tag's attribute text.
fn attribute_value(attrs: &str, wanted: &str) -> Option<String> {
    let bytes = attrs.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        let name_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' && bytes[i] != b'/' {
            i += 1;
        }
        if i == name_start {
            break;
        }
        let name = &attrs[name_start..i];
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let mut value = None;
        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let q = bytes[i];
                let v_start = i + 1;
                let v_end = attrs[v_start..].find(q as char).map_or(attrs.len(), |e| v_start + e);
                value = Some(&attrs[v_start..v_end]);
                i = (v_end + 1).min(bytes.len());
            } else {
                let v_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                value = Some(&attrs[v_start..i]);
            }
        }
        if name.eq_ignore_ascii_case(wanted) {
            return Some(value.unwrap_or("").to_string());
        }
    }
    None
}

/// Index of the `</name` that closes an element whose content starts at `from`.
fn find_closing_tag(html: &str, name: &str, from: usize) -> Option<usize> {
    let mut depth = 1_usize;
    let mut pos = from;
    while let Some(rel) = html[pos..].find('<') {
        let at = pos + rel;
        let rest = &html[at..];
        if let Some(after) = strip_tag_name(rest, "</", name) {
            depth -= 1;
            if depth == 0 {
                return Some(at);
            }
            pos = at + (rest.len() - after.len());
        } else if strip_tag_name(rest, "<", name).is_some() {
            match parse_start_tag(html, at) {
                Some(tag) => {
                    if !tag.self_closing {
                        depth += 1;
                    }
                    pos = tag.end;
                }
                None => pos = at + 1,
            }
        } else {
            pos = at + 1;
        }
    }
    None
}

/// If `s` starts with `prefix` + `name` (case-insensitive) followed by a tag boundary, return the rest.
fn strip_tag_name<'s>(s: &'s str, prefix: &str, name: &str) -> Option<&'s str> {
    let rest = s.strip_prefix(prefix)?;
    if rest.len() < name.len() || !rest.is_char_boundary(name.len()) {
        return None;
    }
    let (head, tail) = rest.split_at(name.len());
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }
    match tail.bytes().next() {
        Some(b) if b.is_ascii_whitespace() || b == b'>' || b == b'/' => Some(tail),
        _ => None,
    }
}
