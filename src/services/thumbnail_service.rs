use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use log::debug;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use crate::errors::ListingError;

/// Writes a JPEG preview of `img` that fits inside `max_width` x `max_height`.
pub fn generate_thumbnail<P: AsRef<Path>>(
    img: &DynamicImage,
    output_path: P,
    max_width: u32,
    max_height: u32,
    quality: u8,
) -> Result<(), ListingError> {
    let start_time = Instant::now();

    let resized = resize_preserving_aspect_ratio(img, max_width, max_height);

    // JPEG has no alpha channel
    let rgb = resized.to_rgb8();

    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), quality);
    encoder.encode_image(&rgb)?;

    if let Some(parent) = output_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, bytes)?;

    debug!(
        "Thumbnail {} written in {:.3}s",
        output_path.as_ref().display(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn resize_preserving_aspect_ratio(
    img: &DynamicImage,
    max_width: u32,
    max_height: u32,
) -> DynamicImage {
    let (width, height) = img.dimensions();

    if width <= max_width && height <= max_height {
        return img.clone();
    }

    let (new_width, new_height) = calculate_dimensions(width, height, max_width, max_height);

    let filter = if new_width <= 200 || new_height <= 200 {
        FilterType::Triangle
    } else {
        FilterType::Lanczos3
    };

    img.resize_exact(new_width, new_height, filter)
}

#[inline]
fn calculate_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let width_ratio = max_width as f32 / width as f32;
    let height_ratio = max_height as f32 / height as f32;
    let scale_ratio = width_ratio.min(height_ratio);

    (
        ((width as f32 * scale_ratio).round() as u32).max(1),
        ((height as f32 * scale_ratio).round() as u32).max(1),
    )
}
