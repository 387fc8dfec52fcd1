//! Command handlers for the CLI subcommands

use anyhow::{Context, Result, bail};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::engine::arg_parser::SaveArgs;
use crate::pipeline::save_memory;
use crate::scan::scan_directory;
use crate::state::StateStore;
use crate::utils::Colors;
use crate::{ExportOutcome, ExportRequest, Opts};

/// Canonical form of `dir`, which must be an existing directory.
fn existing_dir(dir: &Path) -> Result<PathBuf> {
    let dir = dir
        .canonicalize()
        .with_context(|| format!("resolve {}", dir.display()))?;
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }
    Ok(dir)
}

/// Handle `source`
pub fn handle_source(store: &mut StateStore, dir: &Path) -> Result<()> {
    let dir = existing_dir(dir)?;
    store.set_source_path(&dir)?;
    info!("Source folder: {}", dir.display());
    Ok(())
}

/// Handle `destination`
pub fn handle_destination(store: &mut StateStore, dir: &Path) -> Result<()> {
    let dir = existing_dir(dir)?;
    store.set_destination_path(&dir)?;
    info!("Destination folder: {}", dir.display());
    Ok(())
}

fn source_or_bail(store: &StateStore) -> Result<PathBuf> {
    match store.source_path() {
        Some(p) => Ok(p.to_path_buf()),
        None => bail!("No source folder set. Run `memento source <DIR>` first."),
    }
}

/// Handle `scan`
pub fn handle_scan(store: &mut StateStore, dir: Option<&Path>) -> Result<()> {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => source_or_bail(store)?,
    };
    let images = scan_directory(store, &dir)?;
    for image in &images {
        if store.is_handled(image) {
            println!("{}", Colors::colorize(Colors::HANDLED, &format!("{image} (handled)")));
        } else {
            println!("{image}");
        }
    }
    info!(
        "{} images, {} not yet in a memory",
        images.len(),
        store.unhandled_images().len()
    );
    Ok(())
}

/// Handle `save`
pub fn handle_save(store: &mut StateStore, args: &SaveArgs, opts: &Opts) -> Result<()> {
    for (image, note) in &args.notes {
        store.set_image_note(image, note);
    }

    let mut images = args.images.clone();
    if args.unhandled {
        let source = source_or_bail(store)?;
        scan_directory(store, &source)?;
        images.extend(store.unhandled_images());
    }
    if images.is_empty() {
        bail!("No images selected");
    }

    let request = ExportRequest::new(images, args.description.clone());
    let report = save_memory(store, &request, &opts.export)?;

    let reference = Colors::colorize(Colors::REFERENCE, &report.reference);
    match report.outcome() {
        ExportOutcome::Complete => println!(
            "{} {} images -> {}",
            Colors::colorize(Colors::OK, "Saved"),
            report.copied.len(),
            reference
        ),
        ExportOutcome::Partial => {
            warn!(
                "Memory {} saved with {} failure(s)",
                report.reference,
                report.failures.len()
            );
            println!(
                "{} {} images, {} thumbnails -> {}",
                Colors::colorize(Colors::FAILED, "Partially saved"),
                report.copied.len(),
                report.thumbnails.len(),
                reference
            );
            for failure in &report.failures {
                println!("  {}", failure);
            }
        }
    }
    println!("{}", report.memory.path.display());
    Ok(())
}

/// Handle `memories`
pub fn handle_memories(store: &StateStore) -> Result<()> {
    if store.memories().is_empty() {
        info!("No memories yet.");
        return Ok(());
    }
    for (i, memory) in store.memories().iter().enumerate() {
        let name = memory
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| memory.path.display().to_string());
        println!(
            "{:>3}. {}  {}",
            i + 1,
            Colors::colorize(Colors::REFERENCE, &name),
            memory.description.trim()
        );
        println!("     {} ({} previews)", memory.path.display(), memory.thumbs.len());
    }
    Ok(())
}

/// Handle `status`
pub fn handle_status(store: &StateStore) -> Result<()> {
    let show = |p: Option<&Path>| {
        p.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    };
    println!("state:       {}", show(store.path()));
    println!("source:      {}", show(store.source_path()));
    println!("destination: {}", show(store.destination_path()));
    println!("handled:     {}", store.handled_images().len());
    println!("memories:    {}", store.memories().len());
    Ok(())
}
