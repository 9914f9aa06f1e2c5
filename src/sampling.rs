// THEORY:
// The `sampling` module is the top-level color sampling engine. It sits
// between two very different execution contexts: a producer delivering camera
// frames tens of times per second, and a consumer handling discrete user taps.
// The engine's whole job is to bridge them safely and cheaply:
//
// 1.  **Frame arrival** replaces the held latest frame through a `LatestCell`.
//     The producer path never blocks on consumers and never copies pixel data
//     on the swap.
// 2.  **Tap handling** takes a frozen snapshot of the latest frame, maps the
//     normalized tap coordinate to pixel coordinates, runs the quantizer over
//     the surrounding window, names each dominant bucket through the
//     classifier, and publishes the fresh result set wholesale.
//
// Coordinate convention: taps arrive normalized to [0, 1] x [0, 1] with y
// growing downward in view space, while image row 0 is the visual top. The
// engine therefore inverts the vertical axis (`row = (1 - y) * height`) when
// converting to pixel coordinates. Out-of-range taps are clamped, never
// rejected.
//
// Failure model: a tap before the first frame is a silent no-op that leaves
// the previous result set unchanged. Real-time sensor paths treat "not ready"
// as ordinary, not exceptional.

use crate::core_modules::classifier::{self, ColorName};
use crate::core_modules::color::Rgb;
use crate::core_modules::frame::Frame;
use crate::core_modules::latest_cell::LatestCell;
use crate::core_modules::quantizer::{self, DEFAULT_SAMPLE_RADIUS};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// One named dominant color extracted by a tap, published to the render layer
/// as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampledColor {
    /// The de-quantized representative color.
    pub rgb: Rgb,
    /// Uppercase `#RRGGBB` rendering of `rgb`.
    pub hex: String,
    /// The taxonomy bucket the color resolved to.
    pub name: ColorName,
}

impl SampledColor {
    fn from_rgb(rgb: Rgb) -> Self {
        Self {
            rgb,
            hex: rgb.hex(),
            name: classifier::classify(rgb),
        }
    }
}

/// The color sampling engine: buffers the most recent camera frame and, on a
/// tap, extracts and names the dominant colors around the tapped point.
pub struct ColorSamplingEngine {
    /// The single most recent frame; replaced atomically on each arrival.
    latest_frame: LatestCell<Frame>,
    /// Half-width of the square sampling window, in pixels.
    radius: u32,
    /// Publisher of the current result set (at most 3 entries, replaced
    /// wholesale on each successful tap).
    results_tx: watch::Sender<Vec<SampledColor>>,
}

impl ColorSamplingEngine {
    pub fn new() -> Self {
        Self::with_radius(DEFAULT_SAMPLE_RADIUS)
    }

    pub fn with_radius(radius: u32) -> Self {
        let (results_tx, _) = watch::channel(Vec::new());
        Self {
            latest_frame: LatestCell::new(),
            radius,
            results_tx,
        }
    }

    /// Producer path: replaces the held latest frame. Non-blocking, always
    /// succeeds, safe to call at sensor rate.
    pub fn on_frame_arrived(&self, frame: Frame) {
        self.latest_frame.publish(frame);
    }

    /// Consumer path: samples the dominant colors around a normalized tap
    /// point and returns the fresh result set (0-3 entries).
    ///
    /// `normalized_x`/`normalized_y` are in [0, 1] with y growing downward;
    /// values outside that range are clamped. If no frame has arrived yet the
    /// previous result set is returned unchanged.
    pub fn on_tap(&self, normalized_x: f32, normalized_y: f32) -> Vec<SampledColor> {
        let Some(frame) = self.latest_frame.snapshot() else {
            debug!("tap before first frame; keeping previous result set");
            return self.results_tx.borrow().clone();
        };

        // View-space y grows downward while row 0 is the visual top, so the
        // vertical axis is inverted here.
        let center_x = (normalized_x * frame.width() as f32) as i64;
        let center_y = ((1.0 - normalized_y) * frame.height() as f32) as i64;

        let buckets = quantizer::quantize(&frame, center_x, center_y, self.radius);
        let results: Vec<SampledColor> = buckets
            .into_iter()
            .map(|bucket| SampledColor::from_rgb(bucket.color))
            .collect();

        self.results_tx.send_replace(results.clone());
        results
    }

    /// The current result set without re-sampling.
    pub fn current_results(&self) -> Vec<SampledColor> {
        self.results_tx.borrow().clone()
    }

    /// Subscribes an observer to result-set snapshots.
    pub fn subscribe_results(&self) -> watch::Receiver<Vec<SampledColor>> {
        self.results_tx.subscribe()
    }

    /// Spawns a task forwarding frames from an async producer channel into
    /// the engine. Dropping the sender stops the pump; in-flight taps keep
    /// using the last-good frame.
    pub fn spawn_frame_pump(
        engine: Arc<Self>,
        mut frames: mpsc::Receiver<Frame>,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(frame) = frames.recv().await {
                engine.on_frame_arrived(frame);
            }
        })
    }
}

impl Default for ColorSamplingEngine {
    fn default() -> Self {
        Self::new()
    }
}
