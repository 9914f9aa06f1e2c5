// End-to-end exercises of the two engines together, driving them the way the
// camera/tracking host would: continuous producer updates, discrete taps,
// passive observers on the published snapshots.

use chroma_anchor::{
    ColorName, ColorSamplingEngine, Frame, PlacementEngine, RayCaster, RayHit, Rgb, ScreenPoint,
    SurfaceId, SurfaceKind, SurfacePose, TrackedSurface,
};
use nalgebra::{Point3, Vector3};
use parking_lot::Mutex;
use std::sync::Arc;

struct ScriptedCaster {
    hits: Mutex<Vec<RayHit>>,
}

impl ScriptedCaster {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            hits: Mutex::new(Vec::new()),
        })
    }

    fn set_hit(&self, x: f32, y: f32, z: f32) {
        *self.hits.lock() = vec![RayHit {
            point: Point3::new(x, y, z),
            normal: Vector3::y(),
            surface_id: SurfaceId(1),
        }];
    }
}

impl RayCaster for ScriptedCaster {
    fn cast_ray(&self, _screen_point: ScreenPoint, _kind: SurfaceKind) -> Vec<RayHit> {
        self.hits.lock().clone()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn uniform_red_frame_samples_as_red() {
    init_tracing();
    let engine = ColorSamplingEngine::new();
    engine.on_frame_arrived(Frame::solid(100, 100, Rgb::new(200, 10, 10)).unwrap());

    let results = engine.on_tap(0.5, 0.5);

    assert_eq!(results.len(), 1);
    // One quantization band midpoint away from #C80A0A.
    assert_eq!(results[0].hex, "#D01010");
    assert_eq!(results[0].name, ColorName::Red);
}

#[test]
fn sampling_survives_a_frame_producer_running_concurrently() {
    init_tracing();
    let engine = Arc::new(ColorSamplingEngine::new());
    let producer_engine = Arc::clone(&engine);

    let producer = std::thread::spawn(move || {
        for i in 0..200u8 {
            let frame = Frame::solid(64, 48, Rgb::new(i, 200, 10)).unwrap();
            producer_engine.on_frame_arrived(frame);
        }
    });

    // Taps interleave with frame arrivals; every result must be well-formed.
    for _ in 0..50 {
        let results = engine.on_tap(0.5, 0.5);
        for sample in &results {
            assert_eq!(sample.hex, sample.rgb.hex());
        }
    }
    producer.join().unwrap();

    let results = engine.on_tap(0.5, 0.5);
    assert_eq!(results.len(), 1);
}

#[test]
fn ray_miss_leaves_anchor_store_unchanged() {
    init_tracing();
    let caster = ScriptedCaster::new();
    let mut engine = PlacementEngine::new(caster, SurfaceKind::Horizontal);

    for _ in 0..10 {
        assert!(engine.on_tap(ScreenPoint::new(50.0, 50.0)).is_none());
    }
    assert_eq!(engine.marker_count(), 0);
}

#[test]
fn each_resolving_tap_adds_exactly_one_marker_in_order() {
    init_tracing();
    let caster = ScriptedCaster::new();
    let mut engine = PlacementEngine::new(caster.clone(), SurfaceKind::Horizontal);
    let mut additions = engine.subscribe_additions();

    caster.set_hit(0.0, 0.0, -1.0);
    let first = engine.on_tap(ScreenPoint::new(10.0, 20.0)).unwrap();
    assert_eq!(engine.marker_count(), 1);

    caster.set_hit(0.4, 0.0, -0.7);
    let second = engine.on_tap(ScreenPoint::new(300.0, 80.0)).unwrap();
    assert_eq!(engine.marker_count(), 2);

    assert_eq!(additions.try_recv().unwrap(), first);
    assert_eq!(additions.try_recv().unwrap(), second);
}

#[test]
fn a_hundred_surface_events_fire_one_notice() {
    init_tracing();
    let caster = ScriptedCaster::new();
    let engine = PlacementEngine::new(caster, SurfaceKind::Horizontal);

    let mut fired = 0;
    for i in 0..100 {
        let surface = TrackedSurface {
            id: SurfaceId(i),
            kind: SurfaceKind::Horizontal,
            pose: SurfacePose::from_position(Point3::new(i as f32, 0.0, 0.0)),
        };
        if engine.on_surface_detected(surface) {
            fired += 1;
        }
    }
    assert_eq!(fired, 1);
}

#[test]
fn sampled_palette_feeds_placement() {
    init_tracing();
    // Sample a color from the camera...
    let sampling = ColorSamplingEngine::new();
    sampling.on_frame_arrived(Frame::solid(100, 100, Rgb::new(200, 10, 10)).unwrap());
    let samples = sampling.on_tap(0.5, 0.5);

    // ...then hand its hex strings to the placement palette, the same way the
    // saved-color service round-trips them.
    let caster = ScriptedCaster::new();
    caster.set_hit(0.0, 0.0, -1.0);
    let mut placement = PlacementEngine::new(caster, SurfaceKind::Horizontal);
    placement.set_palette_from_hex(samples.iter().map(|s| s.hex.as_str()));

    let marker = placement.on_tap(ScreenPoint::new(0.0, 0.0)).unwrap();
    assert_eq!(marker.color, samples[0].rgb);
    // Horizontal placement lifts the point 1mm off the surface.
    assert!(marker.position.y > 0.0);
}

#[test]
fn marker_snapshot_serializes_for_the_render_layer() {
    init_tracing();
    let caster = ScriptedCaster::new();
    caster.set_hit(1.0, 0.0, -2.0);
    let mut engine = PlacementEngine::new(caster, SurfaceKind::Horizontal);
    let marker = engine.on_tap(ScreenPoint::new(0.0, 0.0)).unwrap();

    let json = serde_json::to_value(marker).unwrap();
    assert_eq!(json["kind"], "Horizontal");
    assert_eq!(json["color"]["r"], 0);
    assert!(json["position"].is_array() || json["position"].is_object());
}
