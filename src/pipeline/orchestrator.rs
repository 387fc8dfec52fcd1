use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::engine::progress::{export_progress_bar, finish_progress_bar};
use crate::engine::tools::{is_plain_file_name, memory_folder_name, strip_html_tags};
use crate::state::StateStore;
use crate::utils::config::MEMORY_PREVIEW_THUMBS;
use crate::{ExportOpts, ExportReport, ExportRequest, ExportStage, Memory};

use super::context::{ExportContext, ExportLayout, create_dir_idempotent};
use super::error_handler::FailureLog;
use super::ops::{plan_file_ops, run_file_ops};
use super::template::{GalleryItem, load_template, render_gallery};

/// Export the request as a new memory, stamped with the current time.
/// See [`save_memory_at`].
pub fn save_memory(
    store: &mut StateStore,
    request: &ExportRequest,
    opts: &ExportOpts,
) -> Result<ExportReport> {
    save_memory_at(store, request, opts, Utc::now())
}

/// Export the request into `<destination>/<timestamp of now>/`:
/// copy images into `images/`, write thumbnails into `thumb/`, render `index.html`,
/// then mark the images handled and append the memory to the store.
///
/// Missing source/destination settings, an uncreatable memory folder and state persistence
/// errors are returned as `Err`. Every other failure is logged and listed in the report, and
/// the export carries on.
pub fn save_memory_at(
    store: &mut StateStore,
    request: &ExportRequest,
    opts: &ExportOpts,
    now: DateTime<Utc>,
) -> Result<ExportReport> {
    let source = store
        .source_path()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("source folder is not set"))?;
    let destination = store
        .destination_path()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("destination folder is not set"))?;

    let reference = memory_folder_name(now);
    let ctx = ExportContext {
        source,
        layout: ExportLayout::new(&destination, &reference),
        opts: opts.clone(),
    };
    ctx.layout.create_root()?;
    debug!("Exporting into {}", ctx.layout.root.display());

    let mut failures = FailureLog::default();
    let images = select_images(&request.images, &mut failures);

    let images_ready = create_layout_dir(&ctx.layout.images_dir, &mut failures);
    let thumbs_ready = create_layout_dir(&ctx.layout.thumb_dir, &mut failures);

    let ops = plan_file_ops(&images, images_ready, thumbs_ready);
    let bar = export_progress_bar(ctx.opts.progress, ops.len());
    let written = run_file_ops(&ops, &ctx, bar.as_ref());
    if let Some(bar) = &bar {
        finish_progress_bar(bar);
    }
    for failure in written.failures {
        failures.push(failure);
    }

    let gallery_written = write_gallery(store, &ctx, &images, &request.description, &mut failures);

    store
        .remember_handled_images(&images)
        .context("remember handled images")?;
    let memory = Memory {
        description: strip_html_tags(&request.description),
        path: ctx.layout.root.clone(),
        thumbs: images
            .iter()
            .take(MEMORY_PREVIEW_THUMBS)
            .map(|i| ctx.layout.thumb_path(i))
            .collect(),
    };
    store
        .remember_memory(memory.clone())
        .context("remember memory")?;

    let report = ExportReport {
        reference,
        memory,
        copied: written.copied,
        thumbnails: written.thumbnails,
        gallery_written,
        failures: failures.into_vec(),
    };
    if report.is_complete() {
        info!(
            "Created a new photo memory! Reference name: {}",
            report.reference
        );
    } else {
        info!(
            "Created a new photo memory with {} failed step(s). Reference name: {}",
            report.failures.len(),
            report.reference
        );
    }
    Ok(report)
}

/// De-duplicate `requested` (first occurrence wins) and drop names that are not plain file names.
fn select_images(requested: &[String], failures: &mut FailureLog) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut images = Vec::with_capacity(requested.len());
    for image in requested {
        if !seen.insert(image.as_str()) {
            continue;
        }
        if is_plain_file_name(image) {
            images.push(image.clone());
        } else {
            failures.record(Some(image.as_str()), ExportStage::Selection, "not a plain file name");
        }
    }
    images
}

fn create_layout_dir(dir: &std::path::Path, failures: &mut FailureLog) -> bool {
    match create_dir_idempotent(dir) {
        Ok(()) => true,
        Err(e) => {
            failures.record(
                None,
                ExportStage::Layout,
                format!("create {}: {}", dir.display(), e),
            );
            false
        }
    }
}

/// Render and write `index.html`. Returns whether it was written.
fn write_gallery(
    store: &StateStore,
    ctx: &ExportContext,
    images: &[String],
    description: &str,
    failures: &mut FailureLog,
) -> bool {
    let template = match load_template(ctx.opts.template.as_deref()) {
        Ok(t) => t,
        Err(e) => {
            failures.record(None, ExportStage::Template, e);
            return false;
        }
    };
    let items: Vec<GalleryItem<'_>> = images
        .iter()
        .map(|image| GalleryItem {
            image: image.as_str(),
            note: store.image_note(image),
        })
        .collect();
    let html = match render_gallery(&template, &items, description) {
        Ok(html) => html,
        Err(e) => {
            failures.record(None, ExportStage::Template, e);
            return false;
        }
    };
    match std::fs::write(&ctx.layout.index_file, html) {
        Ok(()) => true,
        Err(e) => {
            failures.record(
                None,
                ExportStage::GalleryWrite,
                format!("write {}: {}", ctx.layout.index_file.display(), e),
            );
            false
        }
    }
}
