// THEORY:
// The `anchor_store` module is the registry of placed markers. A marker is
// created at tap time, bound to the world position the ray resolver produced,
// and then never moved: later refinement of the underlying surface geometry
// must not retroactively shift markers the user already placed. The store is
// therefore append-only within a session; the only destructive operation is
// the whole-session `clear`.
//
// Mutation happens exclusively on the consumer (gesture) context, so the store
// needs no internal locking; the placement engine owns it and serializes
// access by construction.

use crate::core_modules::color::Rgb;
use crate::core_modules::geometry::{SurfaceKind, WorldPoint};
use serde::Serialize;

/// Edge length of a marker placed on a horizontal surface, in meters.
pub const HORIZONTAL_MARKER_SIZE: f32 = 0.15;
/// Edge length of a marker placed on a vertical surface, in meters.
pub const VERTICAL_MARKER_SIZE: f32 = 0.10;

/// A unique identifier for one placed marker, assigned in placement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerId(pub u64);

/// A flat colored square anchored to a fixed world position for the rest of
/// the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedMarker {
    pub id: MarkerId,
    /// World position, frozen at creation.
    pub position: WorldPoint,
    pub color: Rgb,
    /// The orientation class of the surface the marker was placed on.
    pub kind: SurfaceKind,
    /// Edge length of the rendered square, in meters.
    pub size: f32,
}

/// Append-only registry of the markers placed this session.
#[derive(Debug, Default)]
pub struct AnchorStore {
    markers: Vec<PlacedMarker>,
    next_id: u64,
}

impl AnchorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a marker at `position` and appends it to the registry. The
    /// footprint is the fixed per-mode constant.
    pub fn place(&mut self, position: WorldPoint, color: Rgb, kind: SurfaceKind) -> PlacedMarker {
        let size = match kind {
            SurfaceKind::Horizontal => HORIZONTAL_MARKER_SIZE,
            SurfaceKind::Vertical => VERTICAL_MARKER_SIZE,
        };
        let marker = PlacedMarker {
            id: MarkerId(self.next_id),
            position,
            color,
            kind,
            size,
        };
        self.next_id += 1;
        self.markers.push(marker);
        marker
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers in placement order.
    pub fn markers(&self) -> &[PlacedMarker] {
        &self.markers
    }

    /// Drops every marker and restarts id assignment. Session reset only.
    pub fn clear(&mut self) {
        self.markers.clear();
        self.next_id = 0;
    }
}
