// THEORY:
// The `classifier` module maps an RGB color to a human-readable name bucket.
// It is the last stage of a sampling pass: the quantizer decides *which*
// colors dominate a region, and the classifier decides what to *call* them.
//
// The decision table is a frozen contract. Names are resolved in order:
// darkness first (Black), then near-white (White), then low saturation (Gray),
// and only then by hue band. Every hue band is a half-open interval, so each
// possible hue angle resolves to exactly one name. The [330, 345) gap between
// Magenta and the upper Red band deliberately falls through to the generic
// name rather than being forced into a neighbor.

use crate::core_modules::color::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

const BLACK_VALUE_CEILING: f32 = 0.15;
const WHITE_VALUE_FLOOR: f32 = 0.92;
const WHITE_SATURATION_CEILING: f32 = 0.15;
const GRAY_SATURATION_CEILING: f32 = 0.2;

/// The fixed name taxonomy a sampled color can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorName {
    Black,
    White,
    Gray,
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Magenta,
    /// Fallback for hues no named band claims.
    #[serde(rename = "Color")]
    Other,
}

impl ColorName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorName::Black => "Black",
            ColorName::White => "White",
            ColorName::Gray => "Gray",
            ColorName::Red => "Red",
            ColorName::Orange => "Orange",
            ColorName::Yellow => "Yellow",
            ColorName::Green => "Green",
            ColorName::Cyan => "Cyan",
            ColorName::Blue => "Blue",
            ColorName::Purple => "Purple",
            ColorName::Magenta => "Magenta",
            ColorName::Other => "Color",
        }
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a color to its name bucket. First matching rule wins.
pub fn classify(color: Rgb) -> ColorName {
    let hsv = color.to_hsv();

    if hsv.value < BLACK_VALUE_CEILING {
        return ColorName::Black;
    }
    if hsv.value > WHITE_VALUE_FLOOR && hsv.saturation < WHITE_SATURATION_CEILING {
        return ColorName::White;
    }
    if hsv.saturation < GRAY_SATURATION_CEILING {
        return ColorName::Gray;
    }

    classify_hue(hsv.hue)
}

/// Buckets a hue angle (degrees, [0, 360)) into its named band.
fn classify_hue(degrees: f32) -> ColorName {
    match degrees {
        d if (0.0..15.0).contains(&d) || (345.0..360.0).contains(&d) => ColorName::Red,
        d if (15.0..45.0).contains(&d) => ColorName::Orange,
        d if (45.0..65.0).contains(&d) => ColorName::Yellow,
        d if (65.0..170.0).contains(&d) => ColorName::Green,
        d if (170.0..200.0).contains(&d) => ColorName::Cyan,
        d if (200.0..250.0).contains(&d) => ColorName::Blue,
        d if (250.0..290.0).contains(&d) => ColorName::Purple,
        d if (290.0..330.0).contains(&d) => ColorName::Magenta,
        _ => ColorName::Other,
    }
}
