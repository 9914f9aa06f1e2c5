// THEORY:
// This file is the main entry point for the `chroma_anchor` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the public
// API that will be exposed to external consumers (the camera/tracking host and
// the render layer above it).
//
// The crate is split into two orchestration engines that share a common set of
// leaf components (`core_modules`):
// - `sampling`: the color sampling engine. It buffers the most recent camera
//   frame and, on a tap, extracts and classifies the dominant colors around
//   the tapped point.
// - `placement`: the surface-anchored placement engine. It resolves a 2D tap
//   through tracked real-world geometry to a 3D point and records a colored
//   marker frozen at that position for the rest of the session.
//
// Both engines consume continuous producer streams (frames, surface events)
// and publish immutable result snapshots outward; the render layer only ever
// reads what they publish.

pub mod core_modules;
pub mod placement;
pub mod sampling;

pub use core_modules::anchor_store::{AnchorStore, PlacedMarker};
pub use core_modules::classifier::ColorName;
pub use core_modules::color::Rgb;
pub use core_modules::frame::{Frame, FrameError};
pub use core_modules::geometry::{
    RayHit, ScreenPoint, SurfaceId, SurfaceKind, SurfacePose, TrackedSurface, WorldPoint,
};
pub use core_modules::raycast::{RayCaster, RayResolver};
pub use placement::PlacementEngine;
pub use sampling::{ColorSamplingEngine, SampledColor};
