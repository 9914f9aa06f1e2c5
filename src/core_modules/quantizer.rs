// THEORY:
// The `quantizer` module reduces a pixel neighborhood to its handful of
// dominant colors. Raw camera pixels are noisy: two neighboring pixels of the
// "same" surface rarely share exact channel values. Counting exact colors
// would therefore fragment the histogram into thousands of one-count entries.
// Quantization fixes this by truncating each channel to 8 coarse levels
// (divide by 32), collapsing perceptually-similar pixels into one of at most
// 512 buckets before counting.
//
// Key architectural principles:
// 1.  **Pure function**: `quantize` reads only its arguments and holds no
//     state. Identical frame + center + radius always produces an identically
//     ordered result, which the test suite depends on.
// 2.  **Clamp, never reject**: the center point and the sampling window are
//     both clamped into frame bounds. A tap near an edge shrinks the window
//     instead of reading out of bounds or failing.
// 3.  **Deterministic ranking**: buckets are ordered by descending count with
//     ties broken by first encounter during the row-major scan.
// 4.  **Midpoint de-quantization**: a bucket's representative color is
//     `level * 32 + 16`, the center of the band, so repeated quantization
//     does not systematically darken colors the way `level * 32` would.

use crate::core_modules::color::Rgb;
use crate::core_modules::frame::Frame;
use std::collections::HashMap;

/// Width of one quantization band per channel (8 levels across 0-255).
pub const QUANT_BAND_SIZE: u8 = 32;
/// Default half-width of the square sampling window, in pixels.
pub const DEFAULT_SAMPLE_RADIUS: u32 = 20;
/// Number of top buckets reported per sampling pass.
pub const TOP_BUCKET_COUNT: usize = 3;

/// One ranked quantization bucket: a representative color and how many
/// pixels of the window fell into its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizedBucket {
    /// The de-quantized band midpoint.
    pub color: Rgb,
    /// The number of window pixels that landed in this bucket.
    pub count: u32,
}

/// Extracts the dominant color buckets of the square window of half-width
/// `radius` centered on (`center_x`, `center_y`).
///
/// The center is clamped into frame bounds first and the window is then
/// clamped again, so any coordinates (including negative ones) are safe.
/// Returns up to [`TOP_BUCKET_COUNT`] buckets, most frequent first.
pub fn quantize(frame: &Frame, center_x: i64, center_y: i64, radius: u32) -> Vec<QuantizedBucket> {
    let width = frame.width() as i64;
    let height = frame.height() as i64;

    let center_x = center_x.clamp(0, width - 1);
    let center_y = center_y.clamp(0, height - 1);

    let radius = radius as i64;
    let x_min = (center_x - radius).max(0) as u32;
    let x_max = (center_x + radius).min(width - 1) as u32;
    let y_min = (center_y - radius).max(0) as u32;
    let y_max = (center_y + radius).min(height - 1) as u32;

    // Per bucket: occurrence count plus the scan position of first encounter,
    // which serves as the deterministic tie breaker.
    let mut buckets: HashMap<u32, (u32, u32)> = HashMap::new();
    let mut scan_position = 0u32;

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let pixel = frame.pixel_at(x, y);
            let key = bucket_key(pixel);
            buckets
                .entry(key)
                .and_modify(|(count, _)| *count += 1)
                .or_insert((1, scan_position));
            scan_position += 1;
        }
    }

    let mut ranked: Vec<(u32, u32, u32)> = buckets
        .into_iter()
        .map(|(key, (count, first_seen))| (key, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(TOP_BUCKET_COUNT)
        .map(|(key, count, _)| QuantizedBucket {
            color: representative_color(key),
            count,
        })
        .collect()
}

/// Packs the three quantized channel levels into one bucket key.
fn bucket_key(pixel: Rgb) -> u32 {
    let rq = (pixel.r / QUANT_BAND_SIZE) as u32;
    let gq = (pixel.g / QUANT_BAND_SIZE) as u32;
    let bq = (pixel.b / QUANT_BAND_SIZE) as u32;
    (rq << 16) | (gq << 8) | bq
}

/// De-quantizes a bucket key back to the midpoint of its band.
fn representative_color(key: u32) -> Rgb {
    let rq = ((key >> 16) & 0xFF) as u8;
    let gq = ((key >> 8) & 0xFF) as u8;
    let bq = (key & 0xFF) as u8;
    Rgb {
        r: rq * QUANT_BAND_SIZE + QUANT_BAND_SIZE / 2,
        g: gq * QUANT_BAND_SIZE + QUANT_BAND_SIZE / 2,
        b: bq * QUANT_BAND_SIZE + QUANT_BAND_SIZE / 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_window_yields_single_bucket_near_original() {
        let color = Rgb::new(200, 10, 10);
        let frame = Frame::solid(100, 100, color).unwrap();
        let buckets = quantize(&frame, 50, 50, DEFAULT_SAMPLE_RADIUS);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 41 * 41);
        // The representative must sit within one quantization band of the input.
        let rep = buckets[0].color;
        assert!((rep.r as i16 - color.r as i16).unsigned_abs() <= QUANT_BAND_SIZE as u16);
        assert!((rep.g as i16 - color.g as i16).unsigned_abs() <= QUANT_BAND_SIZE as u16);
        assert!((rep.b as i16 - color.b as i16).unsigned_abs() <= QUANT_BAND_SIZE as u16);
    }

    #[test]
    fn representative_is_band_midpoint() {
        let frame = Frame::solid(8, 8, Rgb::new(200, 10, 10)).unwrap();
        let buckets = quantize(&frame, 4, 4, 2);
        // 200/32 = 6 -> 6*32+16 = 208; 10/32 = 0 -> 16.
        assert_eq!(buckets[0].color, Rgb::new(208, 16, 16));
    }

    #[test]
    fn ranking_is_by_descending_count() {
        // Left 30 columns red, right 10 columns blue: window at the seam.
        let mut data = Vec::new();
        for _y in 0..40 {
            for x in 0..40u32 {
                if x < 30 {
                    data.extend_from_slice(&[0, 0, 200, 255]);
                } else {
                    data.extend_from_slice(&[200, 0, 0, 255]);
                }
            }
        }
        let frame = Frame::new(40, 40, 160, data).unwrap();
        let buckets = quantize(&frame, 20, 20, DEFAULT_SAMPLE_RADIUS);

        assert_eq!(buckets.len(), 2);
        assert!(buckets[0].count > buckets[1].count);
        assert_eq!(buckets[0].color, Rgb::new(208, 16, 16));
        assert_eq!(buckets[1].color, Rgb::new(16, 16, 208));
    }

    #[test]
    fn ties_break_by_first_encounter() {
        // Two columns, two colors, equal counts. The left (red) column is
        // scanned first and must win the tie.
        let mut data = Vec::new();
        for _y in 0..4 {
            data.extend_from_slice(&[0, 0, 200, 255]); // red
            data.extend_from_slice(&[200, 0, 0, 255]); // blue
        }
        let frame = Frame::new(2, 4, 8, data).unwrap();
        let buckets = quantize(&frame, 0, 0, 10);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].count, buckets[1].count);
        assert_eq!(buckets[0].color, Rgb::new(208, 16, 16));
    }

    #[test]
    fn determinism_across_repeated_calls() {
        let mut data = Vec::new();
        for y in 0..50u32 {
            for x in 0..50u32 {
                let v = ((x * 7 + y * 13) % 256) as u8;
                data.extend_from_slice(&[v, v.wrapping_mul(3), v.wrapping_add(40), 255]);
            }
        }
        let frame = Frame::new(50, 50, 200, data).unwrap();
        let first = quantize(&frame, 25, 25, DEFAULT_SAMPLE_RADIUS);
        for _ in 0..5 {
            assert_eq!(quantize(&frame, 25, 25, DEFAULT_SAMPLE_RADIUS), first);
        }
    }

    #[test]
    fn out_of_bounds_center_is_clamped() {
        let frame = Frame::solid(10, 10, Rgb::new(30, 180, 90)).unwrap();
        // Far outside in every direction; must not panic and must still sample.
        for (cx, cy) in [(-100, -100), (1000, 1000), (-5, 1000), (1000, -5)] {
            let buckets = quantize(&frame, cx, cy, DEFAULT_SAMPLE_RADIUS);
            assert_eq!(buckets.len(), 1);
            assert!(buckets[0].count > 0);
        }
    }

    #[test]
    fn edge_window_shrinks_instead_of_reading_out_of_bounds() {
        let frame = Frame::solid(100, 100, Rgb::new(10, 10, 10)).unwrap();
        let buckets = quantize(&frame, 0, 0, 20);
        // Window clamps to [0, 20] x [0, 20] = 21 * 21 pixels.
        assert_eq!(buckets[0].count, 21 * 21);
    }

    #[test]
    fn caps_output_at_top_three() {
        // Four distinct quantization bands inside one window.
        let mut data = Vec::new();
        for value in [0u8, 64, 128, 192] {
            data.extend_from_slice(&[value, value, value, 255]);
        }
        let frame = Frame::new(4, 1, 16, data).unwrap();
        let buckets = quantize(&frame, 1, 0, 10);
        assert_eq!(buckets.len(), TOP_BUCKET_COUNT);
    }
}
