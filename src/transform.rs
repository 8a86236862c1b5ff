//! Transform state: the zoom factor, focal points, grid phase, and anchors of
//! one board view, plus the screen/world conversions derived from them.
//!
//! `ViewportTransform` is plain data owned by the controller. The only
//! behavior it carries is the validated scale setter and coordinate
//! conversion; every other mutation happens in the controller's zoom and pan
//! steps.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::boundary::Anchors;
use crate::consts::SCALE_QUANTUM;
use crate::grid::Borders;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// A width/height pair in screen or world units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self { width: self.width * factor, height: self.height * factor }
    }

    /// Whether both sides are finite and strictly positive.
    #[must_use]
    pub fn has_area(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Move `point` so its distance to `focal` is rescaled from `from_scale` to `to_scale`.
///
/// This is the anchor-relative zoom map: `focal` itself is a fixed point.
#[must_use]
pub fn rescale_about(point: f64, focal: f64, from_scale: f64, to_scale: f64) -> f64 {
    focal + (point - focal) / from_scale * to_scale
}

/// Quantize a scale to two decimal places.
#[must_use]
pub fn quantize_scale(scale: f64) -> f64 {
    (scale * SCALE_QUANTUM).round() / SCALE_QUANTUM
}

/// Pan/zoom state of a board view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportTransform {
    /// Current zoom factor, always within `[min_scale, max_scale]`.
    pub scale: f64,
    /// Zoom factor before the most recent zoom step.
    pub previous_scale: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Screen point held fixed by the most recent zoom step.
    pub focal_point: Point,
    /// Focal point before the most recent zoom step.
    pub previous_focal_point: Point,
    /// Distance from the focal point to the tile boundary above/left of it.
    pub local_offset: Point,
    /// Screen position of world `(0, 0)`.
    pub origin: Point,
    pub anchors: Anchors,
    /// Reference tile rectangle for the tile walk.
    pub borders: Borders,
    pub viewport_size: Size,
}

impl ViewportTransform {
    /// A transform at scale 1.0 with world and screen coincident.
    #[must_use]
    pub fn new(min_scale: f64, max_scale: f64, viewport_size: Size) -> Self {
        let scale = 1.0_f64.clamp(min_scale, max_scale);
        Self {
            scale,
            previous_scale: scale,
            min_scale,
            max_scale,
            focal_point: Point::default(),
            previous_focal_point: Point::default(),
            local_offset: Point::default(),
            origin: Point::default(),
            anchors: Anchors::default(),
            borders: Borders::default(),
            viewport_size,
        }
    }

    /// Set the scale, clamped to `[min_scale, max_scale]`.
    ///
    /// Returns `true` when the requested value was outside the bounds and had
    /// to be clamped. NaN leaves the scale untouched and counts as clamped.
    pub fn set_scale(&mut self, value: f64) -> bool {
        if value.is_nan() {
            return true;
        }
        let clamped = value.clamp(self.min_scale, self.max_scale);
        self.scale = clamped;
        clamped != value
    }

    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.origin.x) / self.scale,
            y: (screen.y - self.origin.y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.origin.x,
            y: world.y * self.scale + self.origin.y,
        }
    }

    /// Screen-space center of the viewport.
    #[must_use]
    pub fn viewport_center(&self) -> Point {
        Point::new(self.viewport_size.width * 0.5, self.viewport_size.height * 0.5)
    }
}
