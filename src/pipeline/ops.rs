//! Copy and thumbnail operations, run concurrently on the rayon pool and joined.

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::engine::progress::{ProgressBar, update_progress_bar};
use crate::pipeline::thumbnail::generate_thumbnail;
use crate::{ExportFailure, ExportStage};

use super::context::ExportContext;

/// One independent file write of an export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileOp<'a> {
    Copy(&'a str),
    Thumbnail(&'a str),
}

impl<'a> FileOp<'a> {
    pub fn image(&self) -> &'a str {
        match self {
            FileOp::Copy(image) | FileOp::Thumbnail(image) => image,
        }
    }

    pub fn stage(&self) -> ExportStage {
        match self {
            FileOp::Copy(_) => ExportStage::Copy,
            FileOp::Thumbnail(_) => ExportStage::Thumbnail,
        }
    }

    fn run(&self, ctx: &ExportContext) -> Result<()> {
        let image = self.image();
        let src = ctx.source_path(image);
        match self {
            FileOp::Copy(_) => {
                let dest = ctx.layout.image_path(image);
                std::fs::copy(&src, &dest).with_context(|| {
                    format!("copy {} -> {}", src.display(), dest.display())
                })?;
            }
            FileOp::Thumbnail(_) => {
                let dest = ctx.layout.thumb_path(image);
                generate_thumbnail(&src, &dest, ctx.opts.thumb_width, ctx.opts.jpeg_quality)?;
            }
        }
        Ok(())
    }
}

/// Outcome of [`run_file_ops`]: what was written and what failed.
#[derive(Debug, Default)]
pub struct FileOpsResult {
    pub copied: Vec<String>,
    pub thumbnails: Vec<String>,
    pub failures: Vec<ExportFailure>,
}

/// Build the op list: every copy, then every thumbnail, skipping the kinds whose folder is missing.
pub fn plan_file_ops<'a>(images: &'a [String], copy: bool, thumbnails: bool) -> Vec<FileOp<'a>> {
    let mut ops = Vec::with_capacity(images.len() * 2);
    if copy {
        ops.extend(images.iter().map(|i| FileOp::Copy(i.as_str())));
    }
    if thumbnails {
        ops.extend(images.iter().map(|i| FileOp::Thumbnail(i.as_str())));
    }
    ops
}

/// Run all ops concurrently; a failing op does not stop the others. Results keep op order.
pub fn run_file_ops(ops: &[FileOp<'_>], ctx: &ExportContext, bar: Option<&ProgressBar>) -> FileOpsResult {
    let outcomes: Vec<(FileOp<'_>, Result<()>)> = ops
        .par_iter()
        .map(|op| {
            let res = op.run(ctx);
            if let Some(bar) = bar {
                update_progress_bar(bar, 1);
            }
            (*op, res)
        })
        .collect();

    let mut result = FileOpsResult::default();
    for (op, res) in outcomes {
        match (res, op) {
            (Ok(()), FileOp::Copy(image)) => result.copied.push(image.to_string()),
            (Ok(()), FileOp::Thumbnail(image)) => result.thumbnails.push(image.to_string()),
            (Err(e), op) => result.failures.push(ExportFailure {
                image: Some(op.image().to_string()),
                stage: op.stage(),
                message: format!("{:#}", e),
            }),
        }
    }
    result
}
