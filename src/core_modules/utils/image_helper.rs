// Debug helper: dump the sampling window around a tap point to a PNG so a
// questionable classification can be inspected by eye.

use crate::core_modules::frame::Frame;
use image::ImageEncoder;
use std::path::Path;

/// Saves the clamped square window of half-width `radius` around
/// (`center_x`, `center_y`) as an RGBA PNG.
pub fn save_window(
    frame: &Frame,
    center_x: i64,
    center_y: i64,
    radius: u32,
    path: &Path,
) -> Result<(), image::error::ImageError> {
    let width = frame.width() as i64;
    let height = frame.height() as i64;

    let center_x = center_x.clamp(0, width - 1);
    let center_y = center_y.clamp(0, height - 1);
    let radius = radius as i64;
    let x_min = (center_x - radius).max(0) as u32;
    let x_max = (center_x + radius).min(width - 1) as u32;
    let y_min = (center_y - radius).max(0) as u32;
    let y_max = (center_y + radius).min(height - 1) as u32;

    let window_width = x_max - x_min + 1;
    let window_height = y_max - y_min + 1;

    let mut buffer = Vec::with_capacity((window_width * window_height * 4) as usize);
    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let pixel = frame.pixel_at(x, y);
            buffer.extend_from_slice(&[pixel.r, pixel.g, pixel.b, 0xFF]);
        }
    }

    let output = std::fs::File::create(path)?;
    let encoder = image::codecs::png::PngEncoder::new(output);
    encoder.write_image(
        &buffer,
        window_width,
        window_height,
        image::ExtendedColorType::Rgba8,
    )?;

    Ok(())
}
