//! Boundary adjustment: keeps the pannable board backed by background.
//!
//! Four anchor lines mark, in screen coordinates, how far the background
//! extends in each direction. Pans translate them, zooms rescale them about
//! the focal point, and [`Anchors::adjust`] pulls them back whenever an edge
//! of the background would come into view. The correction it returns is
//! applied by the caller to the focal point, the world origin, and (through
//! the origin) every item.

#[cfg(test)]
#[path = "boundary_test.rs"]
mod boundary_test;

use crate::transform::{Point, Size, rescale_about};

/// Translation applied by one boundary correction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Adjustment {
    pub x: f64,
    pub y: f64,
}

impl Adjustment {
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Screen-space bounds of the background.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Anchors {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Anchors {
    /// Anchors for a freshly opened board at scale 1.0.
    ///
    /// Top/left sit `margin` beyond the viewport edge. Right/bottom extend
    /// `viewport * (2 - min_scale) + margin`, widened to at least
    /// `viewport / min_scale` so the background still covers the viewport when
    /// zoomed all the way out.
    #[must_use]
    pub fn initial(viewport: Size, min_scale: f64, margin: f64) -> Self {
        let factor = (2.0 - min_scale).max(1.0 / min_scale);
        Self {
            top: -margin,
            left: -margin,
            right: viewport.width * factor + margin,
            bottom: viewport.height * factor + margin,
        }
    }

    /// Shift all four anchors.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.top += dy;
        self.bottom += dy;
        self.left += dx;
        self.right += dx;
    }

    /// Rescale each anchor's distance to `focal` from `from_scale` to `to_scale`.
    pub fn rescale_about(&mut self, focal: Point, from_scale: f64, to_scale: f64) {
        self.top = rescale_about(self.top, focal.y, from_scale, to_scale);
        self.bottom = rescale_about(self.bottom, focal.y, from_scale, to_scale);
        self.left = rescale_about(self.left, focal.x, from_scale, to_scale);
        self.right = rescale_about(self.right, focal.x, from_scale, to_scale);
    }

    /// Pull the anchors back so the background covers the viewport.
    ///
    /// At most one vertical and one horizontal correction is applied; top
    /// wins over bottom and left over right. The correction is folded into
    /// the anchors and returned so the caller can move everything else by the
    /// same amount. A second call with no intervening change returns zero.
    pub fn adjust(&mut self, viewport: Size) -> Adjustment {
        let mut adj = Adjustment::default();

        if self.top > 0.0 {
            adj.y = -self.top;
        } else if self.bottom < viewport.height {
            adj.y = viewport.height - self.bottom;
        }

        if self.left > 0.0 {
            adj.x = -self.left;
        } else if self.right < viewport.width {
            adj.x = viewport.width - self.right;
        }

        self.translate(adj.x, adj.y);
        adj
    }

    /// Widen the far anchors after a resize so the background can still
    /// cover the viewport down to `min_scale`. Never moves the near anchors.
    pub fn ensure_span(&mut self, viewport: Size, scale: f64, min_scale: f64) {
        let required_w = viewport.width * scale / min_scale;
        let required_h = viewport.height * scale / min_scale;
        if self.right - self.left < required_w {
            self.right = self.left + required_w;
        }
        if self.bottom - self.top < required_h {
            self.bottom = self.top + required_h;
        }
        self.right = self.right.max(viewport.width);
        self.bottom = self.bottom.max(viewport.height);
    }

    /// Whether the background covers the whole viewport.
    #[must_use]
    pub fn contains(&self, viewport: Size) -> bool {
        self.top <= 0.0 && self.left <= 0.0 && self.bottom >= viewport.height && self.right >= viewport.width
    }
}
