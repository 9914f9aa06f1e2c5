// THEORY:
// The `color` module is the most fundamental unit of the sampling side of the
// engine. It is a "dumb" data container for a single RGB color plus the small
// set of transforms every other component needs: hexadecimal formatting and
// parsing (the wire format the saved-color service speaks) and conversion to
// hue/saturation/value (the space the classifier reasons in).
//
// Key architectural principles:
// 1.  **Value semantics**: `Rgb` is Copy and immutable. Colors flow through the
//     engine as plain values, never as shared mutable state.
// 2.  **Single source of truth for formats**: hex encoding is defined once,
//     here, so the quantizer, classifier, and render-layer snapshots can never
//     disagree about what "#RRGGBB" means.
// 3.  **No color science beyond what is consumed**: HSV is the only derived
//     space because it is the only one the classifier's decision table uses.

use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGB color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// The red channel value (0-255).
    pub r: u8,
    /// The green channel value (0-255).
    pub g: u8,
    /// The blue channel value (0-255).
    pub b: u8,
}

/// Hue angle in degrees [0, 360), saturation and value in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats the color as an uppercase `#RRGGBB` string.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parses a `#RRGGBB` or `RRGGBB` string (case-insensitive, surrounding
    /// whitespace tolerated). Returns `None` for anything else.
    pub fn parse_hex(input: &str) -> Option<Self> {
        let cleaned = input.trim();
        let cleaned = cleaned.strip_prefix('#').unwrap_or(cleaned);

        if cleaned.len() != 6 || !cleaned.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let value = u32::from_str_radix(cleaned, 16).ok()?;
        Some(Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        })
    }

    /// Converts the color to hue/saturation/value.
    ///
    /// Hue is the angle on the color wheel in degrees [0, 360); an achromatic
    /// color (chroma of zero) reports a hue of 0.0. Saturation and value are
    /// normalized to [0, 1].
    pub fn to_hsv(&self) -> Hsv {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let maximum_channel = r.max(g.max(b));
        let minimum_channel = r.min(g.min(b));
        let chroma = maximum_channel - minimum_channel;

        let hue = if chroma <= 1e-6 {
            0.0
        } else {
            let (base_difference, sector_offset) = if maximum_channel == r {
                (g - b, 0.0)
            } else if maximum_channel == g {
                (b - r, 2.0)
            } else {
                (r - g, 4.0)
            };
            let mut degrees = (base_difference / chroma + sector_offset) * 60.0;
            if degrees < 0.0 {
                degrees += 360.0;
            }
            degrees
        };

        let saturation = if maximum_channel <= 1e-6 {
            0.0
        } else {
            chroma / maximum_channel
        };

        Hsv {
            hue,
            saturation,
            value: maximum_channel,
        }
    }
}
