//! Browser surface: draws background tiles onto a 2D canvas.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! The host creates the canvas and an `<img>` element for the tile asset,
//! waits for the image to load, and then hands both to [`CanvasSurface`].
//! Item overlays are DOM elements owned by the host and positioned from the
//! controller's projections, so nothing here draws items.

use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::doc::ItemStore;
use crate::engine::ViewportController;
use crate::error::ViewportError;
use crate::surface::{TileImage, TileSurface};
use crate::tiles::Tile;
use crate::transform::Size;

/// Viewport controller bound to a browser canvas.
pub type Engine<S> = ViewportController<S, CanvasSurface>;

/// [`TileSurface`] over a canvas element and a loaded tile image.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    image: HtmlImageElement,
}

impl CanvasSurface {
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, image: HtmlImageElement) -> Self {
        Self { canvas, ctx, image }
    }

    /// Match the canvas backing store to its CSS size and return that size.
    pub fn fit_to_client(&self) -> Size {
        let width = self.canvas.client_width().max(0);
        let height = self.canvas.client_height().max(0);
        self.canvas.set_width(width.unsigned_abs());
        self.canvas.set_height(height.unsigned_abs());
        Size::new(f64::from(width), f64::from(height))
    }
}

impl TileSurface for CanvasSurface {
    fn viewport_size(&self) -> Size {
        Size::new(f64::from(self.canvas.client_width()), f64::from(self.canvas.client_height()))
    }

    fn load_tile_image(&mut self, path: &str) -> Result<TileImage, ViewportError> {
        if !self.image.complete() || self.image.natural_width() == 0 || self.image.natural_height() == 0 {
            return Err(ViewportError::AssetLoadFailure {
                path: path.to_string(),
                reason: format!("image element not loaded (src={})", self.image.src()),
            });
        }
        Ok(TileImage::new(f64::from(self.image.natural_width()), f64::from(self.image.natural_height())))
    }

    // drawImage scales the source per call, so there is no bitmap to rebuild.
    fn set_tile_size(&mut self, _size: Size) {}

    fn clear_tiles(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(self.canvas.width()), f64::from(self.canvas.height()));
    }

    fn draw_tile(&mut self, tile: Tile) {
        if let Err(err) =
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(&self.image, tile.x, tile.y, tile.width, tile.height)
        {
            warn!(error = %describe(&err), x = tile.x, y = tile.y, "tile draw failed");
        }
    }
}

impl<S: ItemStore> ViewportController<S, CanvasSurface> {
    /// Resize after the canvas element's layout changed: sync the backing
    /// store to the element's CSS size, then resize the viewport to match.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::EmptyViewport`] while the element has no area.
    pub fn sync_canvas_size(&mut self) -> Result<(), ViewportError> {
        let size = self.surface().fit_to_client();
        self.resize(size.width, size.height)
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
