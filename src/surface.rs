//! Drawing surface abstraction for the tile renderer.
//!
//! The engine never draws directly. It measures the viewport, loads the
//! background texture, and issues tile draws through [`TileSurface`]. The
//! browser host implements it over a 2D canvas context ([`crate::web`]);
//! [`HeadlessSurface`] records draws in memory for native hosts and tests.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::error::ViewportError;
use crate::tiles::Tile;
use crate::transform::Size;

/// Natural pixel size of the background texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileImage {
    pub width: f64,
    pub height: f64,
}

impl TileImage {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Fit the image so its longer side equals `max_side`, keeping aspect ratio.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::AssetLoadFailure`] for a zero-sized or
    /// non-finite image, which would otherwise divide by zero in every frame.
    pub fn fit(self, path: &str, max_side: f64) -> Result<Size, ViewportError> {
        if !Size::new(self.width, self.height).has_area() {
            return Err(ViewportError::AssetLoadFailure {
                path: path.to_string(),
                reason: format!("image is {}x{}", self.width, self.height),
            });
        }
        let aspect = self.width / self.height;
        if aspect >= 1.0 {
            Ok(Size::new(max_side, max_side / aspect))
        } else {
            Ok(Size::new(max_side * aspect, max_side))
        }
    }
}

/// Where background tiles are painted.
pub trait TileSurface {
    /// Current visible size of the drawing area.
    fn viewport_size(&self) -> Size;

    /// Load the background texture.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::AssetLoadFailure`] if the asset is missing or unusable.
    fn load_tile_image(&mut self, path: &str) -> Result<TileImage, ViewportError>;

    /// Regenerate the scaled tile bitmap at `size`. Called on every scale change.
    fn set_tile_size(&mut self, size: Size);

    /// Remove every tile drawn since the last clear.
    fn clear_tiles(&mut self);

    /// Paint one tile.
    fn draw_tile(&mut self, tile: Tile);
}

/// In-memory surface that records what would have been painted.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    viewport: Size,
    image: Option<TileImage>,
    tile_size: Size,
    tiles: Vec<Tile>,
    clears: usize,
    bitmap_generation: u64,
}

impl HeadlessSurface {
    /// A surface of `viewport` size whose asset loads as `image` (or fails when `None`).
    #[must_use]
    pub fn new(viewport: Size, image: Option<TileImage>) -> Self {
        Self { viewport, image, ..Default::default() }
    }

    /// Change the reported viewport size, as a host window resize would.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Tiles drawn since the last clear.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of times the tiles were cleared.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Size of the current scaled tile bitmap.
    #[must_use]
    pub fn tile_size(&self) -> Size {
        self.tile_size
    }

    /// Number of times the scaled bitmap was regenerated.
    #[must_use]
    pub fn bitmap_generation(&self) -> u64 {
        self.bitmap_generation
    }
}

impl TileSurface for HeadlessSurface {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn load_tile_image(&mut self, path: &str) -> Result<TileImage, ViewportError> {
        self.image.ok_or_else(|| ViewportError::AssetLoadFailure {
            path: path.to_string(),
            reason: "asset not found".into(),
        })
    }

    fn set_tile_size(&mut self, size: Size) {
        self.tile_size = size;
        self.bitmap_generation += 1;
    }

    fn clear_tiles(&mut self) {
        self.tiles.clear();
        self.clears += 1;
    }

    fn draw_tile(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }
}
