//! Viewport controller: lifecycle, zoom, pan, item drag, and item queries.
//!
//! `ViewportController` owns the transform of one board view and drives the
//! step pipeline on every transform change:
//!
//! ```text
//! zoom: scale -> anchors (rescale + adjust) -> grid phase -> items -> tiles
//! pan:  anchors (translate + adjust) -> focal/origin shift -> borders -> items -> tiles
//! ```
//!
//! Every step runs synchronously to completion. The item store and the drawing
//! surface are injected at construction; the controller never reaches for
//! global state. The typed operations (`open`, `zoom`, `pan`, ...) return
//! `Result`; the raw `handle_*` entry points log errors and return no actions,
//! so a failed gesture degrades to nothing happening.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, info, warn};

use crate::boundary::{Adjustment, Anchors};
use crate::config::ViewportConfig;
use crate::doc::{BoardId, BoardItem, ItemId, ItemKind, ItemStore};
use crate::error::ViewportError;
use crate::grid::{self, Borders, PhaseInput};
use crate::input::{InputState, PanDelta, PanThrottle};
use crate::projector::{ItemProjection, Projector, zoom_origin};
use crate::surface::TileSurface;
use crate::tiles;
use crate::transform::{Point, Size, ViewportTransform, quantize_scale};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The transform changed; every item overlay must be repositioned.
    ViewChanged,
    /// One item moved on screen during a drag.
    ItemMoved { id: ItemId },
    /// A drag finished and the item's world position was written to the store.
    ItemPositionCommitted { id: ItemId, x: f64, y: f64 },
    /// A gesture referenced an item that is no longer loaded and was ended.
    ItemDropped { id: ItemId },
}

/// Visibility of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Closed,
    Open,
}

/// Result of a single zoom or pan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The transform changed and the view was repainted.
    Applied,
    /// The pan delta was accumulated and will commit on a later event.
    Deferred,
    /// Clamping absorbed the whole request; nothing changed.
    Absorbed,
}

/// State fixed by the first `open()`.
#[derive(Debug, Clone)]
struct Layout {
    transform: ViewportTransform,
    /// Background tile size at scale 1.0.
    cell: Size,
}

impl Layout {
    fn scaled_cell(&self) -> Size {
        self.cell.scaled(self.transform.scale)
    }
}

/// The viewport engine for one board view.
pub struct ViewportController<S, T> {
    config: ViewportConfig,
    board_id: BoardId,
    store: S,
    surface: T,
    state: ViewState,
    previously_opened: bool,
    layout: Option<Layout>,
    projector: Projector,
    input: InputState,
    throttle: PanThrottle,
}

impl<S: ItemStore, T: TileSurface> ViewportController<S, T> {
    /// Build a closed controller. Nothing is measured or loaded until `open()`.
    #[must_use]
    pub fn new(config: ViewportConfig, board_id: BoardId, store: S, surface: T) -> Self {
        let throttle = PanThrottle::new(config.pan_interval_ms);
        Self {
            config,
            board_id,
            store,
            surface,
            state: ViewState::Closed,
            previously_opened: false,
            layout: None,
            projector: Projector::new(),
            input: InputState::Idle,
            throttle,
        }
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Show the view. The first call lays the board out: it measures the
    /// viewport, loads and fits the tile image, places the initial anchors,
    /// loads the board's items, and paints. Later calls only reveal it.
    ///
    /// # Errors
    ///
    /// - [`ViewportError::EmptyViewport`] if the surface has no area.
    /// - [`ViewportError::AssetLoadFailure`] if the tile image is missing or empty.
    /// - [`ViewportError::Store`] if the items cannot be listed.
    ///
    /// On error the view stays closed and a later `open()` retries the layout.
    pub fn open(&mut self) -> Result<(), ViewportError> {
        if self.previously_opened && self.layout.is_some() {
            self.state = ViewState::Open;
            debug!(board_id = %self.board_id, "viewport revealed");
            return Ok(());
        }

        let viewport = self.surface.viewport_size();
        if !viewport.has_area() {
            return Err(ViewportError::EmptyViewport { width: viewport.width, height: viewport.height });
        }
        let path = self.config.tile_asset_path.clone();
        let image = self.surface.load_tile_image(&path)?;
        let cell = image.fit(&path, self.config.tile_width)?;

        let mut transform = ViewportTransform::new(self.config.min_scale, self.config.max_scale, viewport);
        transform.anchors = Anchors::initial(viewport, self.config.min_scale, self.config.anchor_margin);
        let first = grid::step(PhaseInput {
            previous_focal: transform.focal_point,
            focal: transform.focal_point,
            local_offset: transform.local_offset,
            cell,
            previous_scale: transform.scale,
            scale: transform.scale,
            adjustment: Adjustment::default(),
        });
        transform.local_offset = first.local_offset;
        transform.borders = first.borders;

        let items = self.store.list_items(self.board_id)?;
        self.projector.load(items, &transform);

        let layout = Layout { transform, cell };
        self.surface.set_tile_size(layout.scaled_cell());
        let count = tiles::repaint(&mut self.surface, layout.transform.borders, viewport, layout.scaled_cell());
        self.layout = Some(layout);
        self.state = ViewState::Open;
        self.previously_opened = true;

        info!(
            board_id = %self.board_id,
            items = self.projector.len(),
            tiles = count,
            width = viewport.width,
            height = viewport.height,
            "viewport opened"
        );
        Ok(())
    }

    /// Hide the view. The transform is kept so the next `open()` resumes it.
    /// An item drag in progress is committed first.
    pub fn close(&mut self) -> Vec<Action> {
        let actions = self.finish_drag();
        self.state = ViewState::Closed;
        self.input = InputState::Idle;
        info!(board_id = %self.board_id, "viewport closed");
        actions
    }

    /// Release every per-item and per-tile resource. The next `open()` lays the
    /// board out from scratch from the store, so an uncommitted item drag is
    /// discarded.
    pub fn destroy(&mut self) {
        self.projector.clear();
        self.surface.clear_tiles();
        self.layout = None;
        self.previously_opened = false;
        self.state = ViewState::Closed;
        self.input = InputState::Idle;
        info!(board_id = %self.board_id, "viewport destroyed");
    }

    /// Apply a new viewport size. Items keep their screen positions; the far
    /// anchors widen if needed so the larger view is still backed by tiles.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::EmptyViewport`] for a zero or non-finite size.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), ViewportError> {
        let viewport = Size::new(width, height);
        if !viewport.has_area() {
            return Err(ViewportError::EmptyViewport { width, height });
        }
        let Some(layout) = self.layout.as_mut() else {
            return Ok(());
        };
        let t = &mut layout.transform;
        t.viewport_size = viewport;
        t.anchors.ensure_span(viewport, t.scale, t.min_scale);
        let count = tiles::repaint(&mut self.surface, t.borders, viewport, layout.cell.scaled(t.scale));
        debug!(width, height, tiles = count, "viewport resized");
        Ok(())
    }

    // =========================================================================
    // TRANSFORM STEPS
    // =========================================================================

    /// Zoom by `delta` scale steps about the screen point `focal`.
    ///
    /// The new scale is quantized to two decimals, then clamped. When that
    /// leaves the scale unchanged, no state is touched.
    ///
    /// # Errors
    ///
    /// [`ViewportError::NotInitialized`] before the first `open()`,
    /// [`ViewportError::ViewportClosed`] while hidden.
    pub fn zoom(&mut self, delta: f64, focal: Point) -> Result<StepOutcome, ViewportError> {
        self.check_open()?;
        let Some(layout) = self.layout.as_mut() else {
            return Err(ViewportError::NotInitialized);
        };
        let t = &mut layout.transform;

        let old_scale = t.scale;
        let requested = quantize_scale(old_scale + delta * self.config.scale_step);
        let clamped = t.set_scale(requested);
        let new_scale = t.scale;
        if new_scale == old_scale {
            debug!(requested, scale = old_scale, clamped, "zoom absorbed");
            return Ok(StepOutcome::Absorbed);
        }
        t.previous_scale = old_scale;

        t.anchors.rescale_about(focal, old_scale, new_scale);
        let adj = t.anchors.adjust(t.viewport_size);

        let phase = grid::step(PhaseInput {
            previous_focal: t.focal_point,
            focal,
            local_offset: t.local_offset,
            cell: layout.cell,
            previous_scale: old_scale,
            scale: new_scale,
            adjustment: adj,
        });
        t.local_offset = phase.local_offset;
        t.borders = phase.borders;
        t.origin = zoom_origin(t.origin, focal, old_scale, new_scale, adj);
        t.previous_focal_point = t.focal_point;
        t.focal_point = focal.offset(adj.x, adj.y);

        self.projector.reproject_all(t);
        let tile = layout.cell.scaled(new_scale);
        self.surface.set_tile_size(tile);
        let count = tiles::repaint(&mut self.surface, t.borders, t.viewport_size, tile);

        debug!(
            from = old_scale,
            to = new_scale,
            clamped,
            focal_x = focal.x,
            focal_y = focal.y,
            adj_x = adj.x,
            adj_y = adj.y,
            tiles = count,
            "zoom step"
        );
        Ok(StepOutcome::Applied)
    }

    /// Pan by a raw pointer delta observed at `now_ms`.
    ///
    /// Deltas accumulate until more than `pan_interval_ms` has passed since
    /// the last committed step; then the accumulated delta is committed.
    ///
    /// # Errors
    ///
    /// [`ViewportError::NotInitialized`] before the first `open()`,
    /// [`ViewportError::ViewportClosed`] while hidden.
    pub fn pan(&mut self, dx: f64, dy: f64, now_ms: f64) -> Result<StepOutcome, ViewportError> {
        self.check_open()?;
        match self.throttle.push(dx, dy, now_ms) {
            Some(delta) => self.commit_pan(delta),
            None => Ok(StepOutcome::Deferred),
        }
    }

    /// Commit whatever pan delta is still pending.
    ///
    /// # Errors
    ///
    /// Same as [`ViewportController::pan`].
    pub fn flush_pan(&mut self) -> Result<StepOutcome, ViewportError> {
        self.check_open()?;
        match self.throttle.flush() {
            Some(delta) => self.commit_pan(delta),
            None => Ok(StepOutcome::Absorbed),
        }
    }

    fn commit_pan(&mut self, raw: PanDelta) -> Result<StepOutcome, ViewportError> {
        let Some(layout) = self.layout.as_mut() else {
            return Err(ViewportError::NotInitialized);
        };
        let t = &mut layout.transform;

        t.anchors.translate(raw.dx, raw.dy);
        let adj = t.anchors.adjust(t.viewport_size);
        let mx = raw.dx + adj.x;
        let my = raw.dy + adj.y;
        if mx == 0.0 && my == 0.0 {
            debug!(dx = raw.dx, dy = raw.dy, "pan absorbed by boundary");
            return Ok(StepOutcome::Absorbed);
        }

        t.focal_point = t.focal_point.offset(mx, my);
        t.previous_focal_point = t.previous_focal_point.offset(mx, my);
        t.origin = t.origin.offset(mx, my);
        let tile = layout.cell.scaled(t.scale);
        t.borders = Borders::at_phase(t.focal_point, t.local_offset, tile);

        self.projector.reproject_all(t);
        let count = tiles::repaint(&mut self.surface, t.borders, t.viewport_size, tile);
        debug!(dx = mx, dy = my, adj_x = adj.x, adj_y = adj.y, tiles = count, "pan step");
        Ok(StepOutcome::Applied)
    }

    fn check_open(&self) -> Result<(), ViewportError> {
        if self.layout.is_none() {
            return Err(ViewportError::NotInitialized);
        }
        if self.state != ViewState::Open {
            return Err(ViewportError::ViewportClosed);
        }
        Ok(())
    }

    // =========================================================================
    // ITEMS
    // =========================================================================

    /// Create an item centered in the current view, store it, and project it.
    ///
    /// # Errors
    ///
    /// [`ViewportError::NotInitialized`] before the first `open()`, or
    /// [`ViewportError::Store`] if the store rejects the item.
    pub fn add_item(&mut self, kind: ItemKind) -> Result<ItemProjection, ViewportError> {
        let Some(layout) = self.layout.as_ref() else {
            return Err(ViewportError::NotInitialized);
        };
        let t = &layout.transform;
        let center = t.screen_to_world(t.viewport_center());
        let base = kind.base_size();
        let label = kind.label();
        let item = BoardItem::new(self.board_id, kind, center.x - base.width * 0.5, center.y - base.height * 0.5);

        let id = self.store.add_item(item.clone())?;
        let projection = self.projector.insert(item, t);
        info!(item_id = %id, kind = label, x = center.x, y = center.y, "item added");
        Ok(projection)
    }

    /// Drop an item's projection. The store record is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidItemReference`] if it was not loaded.
    pub fn remove_item(&mut self, id: &ItemId) -> Result<(), ViewportError> {
        if self.projector.remove(id) {
            debug!(item_id = %id, "item removed from view");
            Ok(())
        } else {
            Err(ViewportError::InvalidItemReference(*id))
        }
    }

    /// Screen position of an item's top-left corner.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidItemReference`] if it is not loaded.
    pub fn screen_position_of(&self, id: &ItemId) -> Result<Point, ViewportError> {
        self.projector
            .projection(id)
            .map(|p| p.screen_position)
            .ok_or(ViewportError::InvalidItemReference(*id))
    }

    /// Scale an item is currently rendered at.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidItemReference`] if it is not loaded.
    pub fn scale_of(&self, id: &ItemId) -> Result<f64, ViewportError> {
        self.projector
            .projection(id)
            .map(|p| p.scale)
            .ok_or(ViewportError::InvalidItemReference(*id))
    }

    // =========================================================================
    // RAW INPUT
    // =========================================================================

    /// Mouse wheel at `(screen_x, screen_y)`. One notch is one scale step;
    /// positive deltas zoom in.
    pub fn handle_wheel(&mut self, delta: f64, screen_x: f64, screen_y: f64) -> Vec<Action> {
        let steps = delta / self.config.wheel_notch;
        match self.zoom(steps, Point::new(screen_x, screen_y)) {
            Ok(StepOutcome::Applied) => vec![Action::ViewChanged],
            Ok(_) => Vec::new(),
            Err(err) => {
                warn!(code = err.error_code(), retryable = err.retryable(), error = %err, "wheel ignored");
                Vec::new()
            }
        }
    }

    /// Pointer-down on the board background. An item drag in progress is
    /// committed first.
    pub fn handle_pan_start(&mut self, x: f64, y: f64, now_ms: f64) -> Vec<Action> {
        if let Err(err) = self.check_open() {
            warn!(code = err.error_code(), retryable = err.retryable(), error = %err, "pan start ignored");
            return Vec::new();
        }
        let actions = self.finish_drag();
        self.throttle.start(now_ms);
        self.input = InputState::Panning { last_screen: Point::new(x, y) };
        actions
    }

    /// Pointer-move while panning.
    pub fn handle_pan_move(&mut self, x: f64, y: f64, now_ms: f64) -> Vec<Action> {
        let InputState::Panning { last_screen } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Panning { last_screen: Point::new(x, y) };
        let result = self.pan(x - last_screen.x, y - last_screen.y, now_ms);
        self.pan_actions(result, "pan move")
    }

    /// Pointer-up after panning. Commits any motion the debounce still holds.
    pub fn handle_pan_end(&mut self) -> Vec<Action> {
        if !matches!(self.input, InputState::Panning { .. }) {
            return Vec::new();
        }
        self.input = InputState::Idle;
        let result = self.flush_pan();
        self.pan_actions(result, "pan end")
    }

    fn pan_actions(&mut self, result: Result<StepOutcome, ViewportError>, context: &'static str) -> Vec<Action> {
        match result {
            Ok(StepOutcome::Applied) => vec![Action::ViewChanged],
            Ok(_) => Vec::new(),
            Err(err) => {
                warn!(
                    code = err.error_code(),
                    retryable = err.retryable(),
                    error = %err,
                    context,
                    "pan input ignored"
                );
                self.input = InputState::Idle;
                Vec::new()
            }
        }
    }

    /// Pointer-down on an item. A drag still in progress on another item is
    /// committed first.
    pub fn handle_item_drag_start(&mut self, id: ItemId, x: f64, y: f64) -> Vec<Action> {
        if let Err(err) = self.check_open() {
            warn!(code = err.error_code(), retryable = err.retryable(), error = %err, "item drag ignored");
            return Vec::new();
        }
        let mut actions = self.finish_drag();
        let Some(origin) = self.projector.item(&id).map(BoardItem::world_position) else {
            warn!(item_id = %id, "drag on unknown item ignored");
            actions.push(Action::ItemDropped { id });
            return actions;
        };
        self.input = InputState::DraggingItem { id, last_screen: Point::new(x, y), moved: false, origin };
        actions
    }

    /// Pointer-move while dragging an item. The item only follows the pointer
    /// while the pointer is inside the viewport.
    pub fn handle_item_drag_move(&mut self, x: f64, y: f64) -> Vec<Action> {
        let InputState::DraggingItem { id, last_screen, moved, origin } = self.input else {
            return Vec::new();
        };
        let Some(layout) = self.layout.as_ref() else {
            self.input = InputState::Idle;
            return Vec::new();
        };
        let pointer = Point::new(x, y);
        let viewport = layout.transform.viewport_size;
        let inside = x >= 0.0 && y >= 0.0 && x <= viewport.width && y <= viewport.height;
        if !inside {
            self.input = InputState::DraggingItem { id, last_screen: pointer, moved, origin };
            return Vec::new();
        }

        match self.projector.translate(&id, x - last_screen.x, y - last_screen.y, &layout.transform) {
            Ok(_) => {
                self.input = InputState::DraggingItem { id, last_screen: pointer, moved: true, origin };
                vec![Action::ItemMoved { id }]
            }
            Err(err) => {
                warn!(code = err.error_code(), item_id = %id, "stale item dropped mid-drag");
                self.input = InputState::Idle;
                vec![Action::ItemDropped { id }]
            }
        }
    }

    /// Pointer-up after dragging an item. Writes the final world position to
    /// the store once.
    pub fn handle_item_drag_end(&mut self) -> Vec<Action> {
        self.finish_drag()
    }

    /// End any item drag in progress. A moved item's world position is written
    /// to the store; if the store rejects it, the item goes back to where the
    /// drag started so the view never shows a position the store lacks.
    fn finish_drag(&mut self) -> Vec<Action> {
        let InputState::DraggingItem { id, moved, origin, .. } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Idle;
        if !moved {
            return Vec::new();
        }
        let Some(item) = self.projector.item(&id) else {
            warn!(item_id = %id, "stale item dropped at drag end");
            return vec![Action::ItemDropped { id }];
        };
        let (x, y) = (item.x, item.y);
        match self.store.update_item_position(id, x, y) {
            Ok(()) => {
                debug!(item_id = %id, x, y, "item position committed");
                vec![Action::ItemPositionCommitted { id, x, y }]
            }
            Err(err) => {
                let err = ViewportError::from(err);
                warn!(
                    code = err.error_code(),
                    retryable = err.retryable(),
                    error = %err,
                    item_id = %id,
                    "item position not saved; reverting drag"
                );
                self.revert_drag(id, origin)
            }
        }
    }

    fn revert_drag(&mut self, id: ItemId, origin: Point) -> Vec<Action> {
        let Some(layout) = self.layout.as_ref() else {
            return vec![Action::ItemDropped { id }];
        };
        match self.projector.place(&id, origin, &layout.transform) {
            Ok(_) => vec![Action::ItemMoved { id }],
            Err(err) => {
                warn!(code = err.error_code(), item_id = %id, "stale item dropped on revert");
                vec![Action::ItemDropped { id }]
            }
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == ViewState::Open
    }

    #[must_use]
    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// The transform, once the first `open()` has laid the board out.
    #[must_use]
    pub fn transform(&self) -> Option<&ViewportTransform> {
        self.layout.as_ref().map(|l| &l.transform)
    }

    /// Background tile size at the current scale.
    #[must_use]
    pub fn tile_size(&self) -> Option<Size> {
        self.layout.as_ref().map(Layout::scaled_cell)
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.input
    }

    #[must_use]
    pub fn projection(&self, id: &ItemId) -> Option<&ItemProjection> {
        self.projector.projection(id)
    }

    /// All item projections, in no particular order.
    pub fn projections(&self) -> impl Iterator<Item = &ItemProjection> {
        self.projector.projections()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.projector.len()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn surface(&self) -> &T {
        &self.surface
    }
}
