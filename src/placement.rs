// THEORY:
// The `placement` module is the top-level surface-anchored placement engine.
// It orchestrates the leaf components around the lifetime of one AR session:
//
// 1.  **Surface discovery**: the tracking source pushes "surface added" events
//     continuously as it maps the room. The engine reacts to exactly one of
//     them per session through a one-shot latch, publishing a single
//     discovery notice so the layer above can tell the user that tapping is
//     now meaningful.
// 2.  **Tap placement**: a tap is resolved through the `RayResolver` against
//     the active surface mode. A hit creates one marker in the `AnchorStore`
//     with the currently selected palette color and broadcasts it as an
//     incremental addition; the render layer never needs the whole history
//     re-sent. A miss mutates nothing.
// 3.  **Palette selection**: the engine carries the loaded color palette
//     (saved colors arriving as hex strings from the layer above) and the
//     current selection, so a tap does not need to be told its color.
//
// All mutation happens on the single consumer (gesture) context; the store
// therefore needs no locking. Session reset is the only path that clears
// state, and it re-arms the discovery latch.

use crate::core_modules::anchor_store::{AnchorStore, PlacedMarker};
use crate::core_modules::color::Rgb;
use crate::core_modules::geometry::{ScreenPoint, SurfaceKind, TrackedSurface};
use crate::core_modules::one_shot::OneShotLatch;
use crate::core_modules::raycast::{RayCaster, RayResolver};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

const ADDITION_CHANNEL_CAPACITY: usize = 64;

/// Default marker color before any palette is loaded.
const DEFAULT_COLOR: Rgb = Rgb {
    r: 0,
    g: 122,
    b: 255,
};

/// The surface-anchored placement engine for one AR session.
pub struct PlacementEngine {
    resolver: RayResolver,
    /// The surface orientation this session places against.
    mode: SurfaceKind,
    store: AnchorStore,
    palette: Vec<Rgb>,
    selected: usize,
    discovery_latch: OneShotLatch,
    /// Incremental marker additions for the render layer.
    additions_tx: broadcast::Sender<PlacedMarker>,
    /// The one-shot discovery notice; `None` until the first surface event.
    discovery_tx: watch::Sender<Option<TrackedSurface>>,
}

impl PlacementEngine {
    pub fn new(caster: Arc<dyn RayCaster>, mode: SurfaceKind) -> Self {
        let (additions_tx, _) = broadcast::channel(ADDITION_CHANNEL_CAPACITY);
        let (discovery_tx, _) = watch::channel(None);
        Self {
            resolver: RayResolver::new(caster),
            mode,
            store: AnchorStore::new(),
            palette: vec![DEFAULT_COLOR],
            selected: 0,
            discovery_latch: OneShotLatch::new(),
            additions_tx,
            discovery_tx,
        }
    }

    pub fn mode(&self) -> SurfaceKind {
        self.mode
    }

    /// Loads the palette of available marker colors, selecting the first
    /// entry. An empty palette is ignored.
    pub fn set_palette(&mut self, colors: Vec<Rgb>) {
        if colors.is_empty() {
            return;
        }
        self.palette = colors;
        self.selected = 0;
    }

    /// Loads the palette from hex strings, skipping entries that fail to
    /// parse. This is the format the saved-color service delivers.
    pub fn set_palette_from_hex<'a, I>(&mut self, codes: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let colors: Vec<Rgb> = codes.into_iter().filter_map(Rgb::parse_hex).collect();
        self.set_palette(colors);
    }

    /// Selects the palette entry markers will be placed with. Out-of-range
    /// indices leave the selection unchanged.
    pub fn select_color(&mut self, index: usize) -> bool {
        if index < self.palette.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn selected_color(&self) -> Rgb {
        self.palette[self.selected]
    }

    /// Push path from the tracking source: a new surface was detected. The
    /// discovery notice fires for the first event of the session only;
    /// returns whether this call was the one that fired it.
    pub fn on_surface_detected(&self, surface: TrackedSurface) -> bool {
        if !self.discovery_latch.fire() {
            debug!(id = surface.id.0, "surface event after discovery notice; ignored");
            return false;
        }
        info!(id = surface.id.0, kind = ?surface.kind, "first surface discovered");
        self.discovery_tx.send_replace(Some(surface));
        true
    }

    /// Consumer path: resolves a tap against tracked geometry and, on a hit,
    /// anchors a marker with the selected color at the resolved position.
    ///
    /// A miss returns `None` and leaves the store untouched; it is an
    /// expected outcome, not an error.
    pub fn on_tap(&mut self, screen_point: ScreenPoint) -> Option<PlacedMarker> {
        let color = self.selected_color();
        self.place_at(screen_point, color)
    }

    /// Like [`on_tap`](Self::on_tap) but with an explicit color.
    pub fn place_at(&mut self, screen_point: ScreenPoint, color: Rgb) -> Option<PlacedMarker> {
        let position = self.resolver.resolve(screen_point, self.mode)?;
        let marker = self.store.place(position, color, self.mode);
        // No live observers is fine; the store remains the source of truth.
        let _ = self.additions_tx.send(marker);
        Some(marker)
    }

    /// Markers placed so far this session, in placement order.
    pub fn markers(&self) -> &[PlacedMarker] {
        self.store.markers()
    }

    pub fn marker_count(&self) -> usize {
        self.store.len()
    }

    /// Subscribes an observer to incremental marker additions.
    pub fn subscribe_additions(&self) -> broadcast::Receiver<PlacedMarker> {
        self.additions_tx.subscribe()
    }

    /// Subscribes an observer to the one-shot discovery notice.
    pub fn subscribe_discovery(&self) -> watch::Receiver<Option<TrackedSurface>> {
        self.discovery_tx.subscribe()
    }

    /// Full session restart: drops every marker, clears the discovery notice,
    /// and re-arms the one-shot latch. Idempotent.
    pub fn reset_session(&mut self) {
        info!(markers = self.store.len(), "resetting placement session");
        self.store.clear();
        self.discovery_latch.reset();
        self.discovery_tx.send_replace(None);
    }
}
