// THEORY:
// The `geometry` module defines the shared vocabulary between the engines and
// the external world-tracking source: screen-space tap points, world-space
// positions and poses, and the records describing tracked surfaces and ray
// hits. Nothing in here computes geometry; the heavy lifting (pose estimation,
// plane detection, ray intersection) is the tracking source's job. These types
// only carry its answers across the boundary in a strongly-typed form.

use nalgebra::{Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A 2D point in screen/view coordinates, in points or pixels depending on
/// what the host's gesture recognizer delivers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A 3D position in the tracking source's world coordinate space, in meters.
pub type WorldPoint = Point3<f32>;

/// The orientation class of a detected surface. Placement behavior (raycast
/// filter, normal offset, marker footprint) differs between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    Horizontal,
    Vertical,
}

/// A stable identifier assigned by the tracking source to one detected surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

/// A position plus orientation in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePose {
    pub position: WorldPoint,
    pub orientation: UnitQuaternion<f32>,
}

impl SurfacePose {
    pub fn from_position(position: WorldPoint) -> Self {
        Self {
            position,
            orientation: UnitQuaternion::identity(),
        }
    }
}

/// A detected real-world surface as reported by the tracking source. The pose
/// may be refined over time by its owner; the engines only read the latest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackedSurface {
    pub id: SurfaceId,
    pub kind: SurfaceKind,
    pub pose: SurfacePose,
}

/// One intersection of a screen-point ray with tracked geometry. Casters
/// return hits ordered nearest-first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The intersection point in world space.
    pub point: WorldPoint,
    /// The unit surface normal at the intersection.
    pub normal: Vector3<f32>,
    /// The surface the ray struck.
    pub surface_id: SurfaceId,
}
