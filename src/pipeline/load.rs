use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::RgbaImage;
use log::debug;

/// Longest side of the working image. Extraction samples a fixed stride,
/// so anything bigger just burns time without changing the result much.
pub const MAX_DIM: u32 = 200;

/// Load an image, resize to fit within 200x200 (preserving aspect ratio),
/// and convert to an RGBA8 buffer for sampling.
pub fn load_and_prepare(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).with_context(|| {
        if !path.exists() {
            format!("file not found: {}", path.display())
        } else {
            format!(
                "unsupported or corrupt image: {}. Supported formats: PNG, JPEG, WebP, BMP, TIFF, GIF",
                path.display()
            )
        }
    })?;

    let img = if img.width() > MAX_DIM || img.height() > MAX_DIM {
        img.resize(MAX_DIM, MAX_DIM, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    debug!(
        "prepared {}: {}x{} ({} pixels)",
        path.display(),
        rgba.width(),
        rgba.height(),
        rgba.width() * rgba.height()
    );
    Ok(rgba)
}
