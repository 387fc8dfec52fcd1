//! Thumbnail generation: fixed width, proportional height, JPEG output.

use anyhow::{Context, Result, ensure};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::path::Path;

use crate::utils::config::ThumbnailConsts;

/// Height for a `width`-wide thumbnail of a `src_width` x `src_height` image, at least 1.
pub fn scaled_height(src_width: u32, src_height: u32, width: u32) -> u32 {
    if src_width == 0 {
        return 1;
    }
    let h = (u64::from(src_height) * u64::from(width) + u64::from(src_width) / 2) / u64::from(src_width);
    h.clamp(1, u64::from(u32::MAX)) as u32
}

/// Decode `src` (format sniffed from content), resize it to `width` pixels wide (up or down) and write it to `dest` as JPEG.
/// The destination keeps whatever file name it is given, extension included.
/// Nothing is written to `dest` unless encoding succeeds.
pub fn generate_thumbnail(src: &Path, dest: &Path, width: u32, quality: u8) -> Result<()> {
    ensure!(
        (1..=ThumbnailConsts::MAX_DIMENSION).contains(&width),
        "thumbnail width {} outside 1..={}",
        width,
        ThumbnailConsts::MAX_DIMENSION
    );
    let data = std::fs::read(src).with_context(|| format!("read {}", src.display()))?;
    // Decode by content: file names do not have to match the encoded format.
    let img = image::load_from_memory(&data).with_context(|| format!("decode {}", src.display()))?;
    let height = scaled_height(img.width(), img.height(), width);
    ensure!(
        height <= ThumbnailConsts::MAX_DIMENSION,
        "thumbnail {}x{} exceeds the JPEG size limit",
        width,
        height
    );
    let thumb = img.resize_exact(width, height, FilterType::Lanczos3).to_rgb8();

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, quality.clamp(1, 100))
        .encode_image(&thumb)
        .with_context(|| format!("encode thumbnail {}", dest.display()))?;
    std::fs::write(dest, encoded).with_context(|| format!("write {}", dest.display()))
}
