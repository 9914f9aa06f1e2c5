// THEORY:
// The `raycast` module turns a 2D tap into a 3D world position. The actual ray
// intersection is performed by the external tracking source, abstracted here
// behind the `RayCaster` trait so the engine (and its tests) never depend on a
// particular tracking backend. The `RayResolver` applies the engine's own
// policy on top of the raw hits: take the nearest hit only, and for horizontal
// placement lift the point a fixed millimeter off the surface so a flat marker
// rendered at that position does not z-fight with the plane it sits on.
// Vertical markers are rendered flush, so no offset is applied there.
//
// A ray that misses everything is an expected, frequent outcome — the user
// tapped sky, or tracking has not mapped that region yet. It is reported as
// `None`, logged at debug level, and never treated as an error.

use crate::core_modules::geometry::{RayHit, ScreenPoint, SurfaceKind, WorldPoint};
use std::sync::Arc;
use tracing::debug;

/// Offset applied along the surface normal for horizontal placement, in
/// meters. Keeps flat markers from z-fighting with the surface underneath.
pub const SURFACE_OFFSET_EPSILON: f32 = 0.001;

/// The ray-casting capability of the external tracking source.
///
/// Implementations return every intersection of the ray through `screen_point`
/// with tracked geometry of the requested kind, ordered nearest-first. An
/// empty vector means the ray missed.
pub trait RayCaster: Send + Sync {
    fn cast_ray(&self, screen_point: ScreenPoint, kind: SurfaceKind) -> Vec<RayHit>;
}

/// Resolves screen taps to placement-ready world points.
pub struct RayResolver {
    caster: Arc<dyn RayCaster>,
}

impl RayResolver {
    pub fn new(caster: Arc<dyn RayCaster>) -> Self {
        Self { caster }
    }

    /// Projects `screen_point` through tracked geometry of the given kind and
    /// returns the placement position, or `None` if no surface intersects the
    /// ray.
    pub fn resolve(&self, screen_point: ScreenPoint, kind: SurfaceKind) -> Option<WorldPoint> {
        let hits = self.caster.cast_ray(screen_point, kind);
        let Some(first) = hits.first() else {
            debug!(x = screen_point.x, y = screen_point.y, "ray missed all tracked surfaces");
            return None;
        };

        let point = match kind {
            SurfaceKind::Horizontal => first.point + first.normal * SURFACE_OFFSET_EPSILON,
            SurfaceKind::Vertical => first.point,
        };
        Some(point)
    }
}
