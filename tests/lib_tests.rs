use chrono::{TimeZone, Utc};
use memento::engine::{
    has_extension, is_candidate_image_name, is_hidden_name, is_plain_file_name,
    memory_folder_name, parse_note, strip_html_tags,
};
use memento::pipeline::{
    GalleryItem, find_element_by_id, gallery_item_html, render_gallery, scaled_height,
};
use memento::utils::config::DEFAULT_TEMPLATE;
use memento::{StateStore, list_images, scan_directory};
use std::fs;

// --- name filters ---

#[test]
fn test_hidden_names() {
    assert!(is_hidden_name(".DS_Store"));
    assert!(is_hidden_name(".hidden.jpg"));
    assert!(!is_hidden_name("photo.jpg"));
}

#[test]
fn test_has_extension() {
    assert!(has_extension("photo.jpg"));
    assert!(has_extension("archive.tar.gz"));
    assert!(has_extension("trailing."));
    assert!(!has_extension("README"));
}

#[test]
fn test_candidate_image_name() {
    assert!(is_candidate_image_name("IMG_0001.JPG"));
    assert!(!is_candidate_image_name(".thumbs.db"));
    assert!(!is_candidate_image_name("Makefile"));
}

#[test]
fn test_plain_file_name() {
    assert!(is_plain_file_name("a.jpg"));
    assert!(is_plain_file_name("with space.png"));
    assert!(!is_plain_file_name(""));
    assert!(!is_plain_file_name("."));
    assert!(!is_plain_file_name(".."));
    assert!(!is_plain_file_name("../a.jpg"));
    assert!(!is_plain_file_name("dir/a.jpg"));
    assert!(!is_plain_file_name("dir\\a.jpg"));
    assert!(!is_plain_file_name("/abs.jpg"));
}

// --- memory_folder_name ---

#[test]
fn test_memory_folder_name_second_resolution_no_colons() {
    let t = Utc.with_ymd_and_hms(2026, 10, 18, 9, 43, 7).unwrap();
    assert_eq!(memory_folder_name(t), "2026-10-18T09-43-07");
}

#[test]
fn test_memory_folder_name_ignores_subseconds() {
    let t = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap() + chrono::Duration::milliseconds(999);
    assert_eq!(memory_folder_name(t), "2026-01-02T03-04-05");
}

// --- strip_html_tags ---

#[test]
fn test_strip_html_tags_simple() {
    assert_eq!(strip_html_tags("<p>Hello <b>world</b></p>"), "Hello world");
}

#[test]
fn test_strip_html_tags_attributes_and_breaks() {
    assert_eq!(
        strip_html_tags("Trip<br/>to <a href=\"x\">Rome</a>"),
        "Tripto Rome"
    );
}

#[test]
fn test_strip_html_tags_unterminated_tag_strips_rest() {
    assert_eq!(strip_html_tags("Sunset <i"), "Sunset ");
}

#[test]
fn test_strip_html_tags_plain_text_unchanged() {
    assert_eq!(strip_html_tags("a > b"), "a > b");
}

// --- parse_note ---

#[test]
fn test_parse_note_splits_on_first_equals() {
    assert_eq!(
        parse_note("a.jpg=x = y").unwrap(),
        ("a.jpg".to_string(), "x = y".to_string())
    );
}

#[test]
fn test_parse_note_rejects_missing_name() {
    assert!(parse_note("=text").is_err());
    assert!(parse_note("no-separator").is_err());
}

// --- thumbnails ---

#[test]
fn test_scaled_height_keeps_aspect() {
    assert_eq!(scaled_height(700, 400, 350), 200);
    assert_eq!(scaled_height(100, 50, 350), 175);
    assert_eq!(scaled_height(4000, 1, 350), 1);
}

// --- template ---

#[test]
fn test_find_element_by_id_nested_same_tag() {
    let html = r#"<div id="outer"><div>inner</div><div id="x">y</div></div><p>after</p>"#;
    let span = find_element_by_id(html, "outer").unwrap();
    assert_eq!(
        &html[span.inner_start..span.inner_end],
        r#"<div>inner</div><div id="x">y</div>"#
    );
}

#[test]
fn test_find_element_by_id_quote_styles() {
    let html = "<ul class='g' id='grid'></ul><p id=description>d</p>";
    assert!(find_element_by_id(html, "grid").is_some());
    let span = find_element_by_id(html, "description").unwrap();
    assert_eq!(&html[span.inner_start..span.inner_end], "d");
}

#[test]
fn test_find_element_by_id_skips_comments_and_missing() {
    let html = r#"<!-- <div id="grid"> --><section id="grid">ok</section>"#;
    let span = find_element_by_id(html, "grid").unwrap();
    assert_eq!(&html[span.inner_start..span.inner_end], "ok");
    assert!(find_element_by_id(html, "nope").is_none());
}

#[test]
fn test_gallery_item_html_without_note() {
    let html = gallery_item_html(&GalleryItem {
        image: "a.jpg",
        note: None,
    });
    assert_eq!(
        html,
        r##"<li data-src="./images/a.jpg"><a href="#"><img src="./thumb/a.jpg"></a></li>"##
    );
}

#[test]
fn test_gallery_item_html_with_escaped_note() {
    let html = gallery_item_html(&GalleryItem {
        image: "a.jpg",
        note: Some(r#"Say "cheese""#),
    });
    assert!(html.contains(r#"data-sub-html="Say &quot;cheese&quot;""#));
}

#[test]
fn test_gallery_item_html_escapes_names_and_drops_empty_note() {
    let html = gallery_item_html(&GalleryItem {
        image: "Tom & \"Jerry\" <3>.jpg",
        note: Some(""),
    });
    assert!(html.contains(r#"data-src="./images/Tom &amp; &quot;Jerry&quot; &lt;3&gt;.jpg""#));
    assert!(!html.contains("data-sub-html"));
}

#[test]
fn test_render_gallery_fills_grid_and_description() {
    let template = "<!doctype html>\n<html><body><div id=\"description\">old</div><ul id=\"grid\"><li>keep</li></ul></body></html>";
    let items = [
        GalleryItem {
            image: "a.jpg",
            note: Some("first"),
        },
        GalleryItem {
            image: "b.png",
            note: None,
        },
    ];
    let html = render_gallery(template, &items, "<b>Rome</b> 2026").unwrap();

    assert!(html.starts_with("<!DOCTYPE html>\n<html>"));
    assert_eq!(html.matches("<!DOCTYPE").count() + html.matches("<!doctype").count(), 1);
    assert!(html.contains(r#"<div id="description"><b>Rome</b> 2026</div>"#));
    assert!(!html.contains(">old<"));
    let keep = html.find("<li>keep</li>").unwrap();
    let a = html.find(r#"data-src="./images/a.jpg" data-sub-html="first""#).unwrap();
    let b = html.find(r#"data-src="./images/b.png""#).unwrap();
    assert!(keep < a && a < b);
    assert!(html.ends_with("</ul></body></html>"));
}

#[test]
fn test_render_gallery_doctype_after_leading_comment_is_not_duplicated() {
    let template = "<!-- gallery v2 -->\n<!DOCTYPE html>\n<html><body><p id=\"description\"></p><ul id=\"grid\"></ul></body></html>";
    let html = render_gallery(template, &[], "d").unwrap();

    assert!(html.starts_with("<!DOCTYPE html>\n<!-- gallery v2 -->\n<html>"));
    assert_eq!(html.to_ascii_lowercase().matches("<!doctype").count(), 1);
}

#[test]
fn test_render_gallery_requires_grid() {
    let err = render_gallery("<div id=\"description\"></div>", &[], "x").unwrap_err();
    assert!(err.to_string().contains("grid"));
}

#[test]
fn test_render_gallery_default_template() {
    let items = [GalleryItem {
        image: "a.jpg",
        note: None,
    }];
    let html = render_gallery(DEFAULT_TEMPLATE, &items, "hello").unwrap();
    assert!(html.contains(r#"<img src="./thumb/a.jpg">"#));
    assert!(html.contains(">hello</div>"));
}

// --- scan ---

#[test]
fn test_list_images_filters_hidden_extensionless_and_dirs() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["b.jpg", "a.PNG", ".hidden.jpg", "README", ".DS_Store", "notes.txt"] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    fs::create_dir(dir.path().join("sub.dir")).unwrap();
    fs::write(dir.path().join("sub.dir").join("nested.jpg"), b"x").unwrap();

    let images = list_images(dir.path()).unwrap();
    assert_eq!(images, vec!["a.PNG", "b.jpg", "notes.txt"]);
}

#[cfg(unix)]
#[test]
fn test_list_images_skips_symlinked_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.jpg"), b"x").unwrap();
    std::os::unix::fs::symlink(target.path(), dir.path().join("album.2024")).unwrap();
    std::os::unix::fs::symlink(dir.path().join("a.jpg"), dir.path().join("link.jpg")).unwrap();

    let images = list_images(dir.path()).unwrap();
    assert_eq!(images, vec!["a.jpg", "link.jpg"]);
}

#[test]
fn test_list_images_missing_dir_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(list_images(&dir.path().join("missing")).is_err());
}

#[test]
fn test_scan_directory_remembers_scan_and_unhandled() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.jpg", "b.jpg", "c.jpg"] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    let mut store = StateStore::in_memory();
    store.remember_handled_images(&["b.jpg"]).unwrap();

    let images = scan_directory(&mut store, dir.path()).unwrap();
    assert_eq!(images.len(), 3);
    assert_eq!(store.scanned_images(), images.as_slice());
    assert_eq!(store.unhandled_images(), vec!["a.jpg", "c.jpg"]);
}
