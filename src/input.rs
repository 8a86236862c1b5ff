//! Input model: the gesture state machine and the pan debounce.
//!
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up. Zooming is not a state: a wheel event is one atomic step.
//! `PanThrottle` limits how often a pan commits a transform step while
//! accumulating every pointer delta in between, so fast drags repaint at most
//! once per interval without losing motion.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::ItemId;
use crate::transform::Point;

/// Gesture in progress on an open viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is dragging the board background.
    Panning {
        /// Screen position of the previous pointer event.
        last_screen: Point,
    },
    /// The user is dragging one item across the board.
    DraggingItem {
        id: ItemId,
        /// Screen position of the previous pointer event.
        last_screen: Point,
        /// Whether any move has been applied since the drag started.
        moved: bool,
        /// World position of the item when the drag started.
        origin: Point,
    },
}

/// Accumulated, not yet committed, pan movement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanDelta {
    pub dx: f64,
    pub dy: f64,
}

impl PanDelta {
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// Debounce for pan commits.
#[derive(Debug, Clone, PartialEq)]
pub struct PanThrottle {
    interval_ms: f64,
    last_commit_ms: f64,
    pending: PanDelta,
}

impl PanThrottle {
    #[must_use]
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, last_commit_ms: 0.0, pending: PanDelta::default() }
    }

    /// Begin a pan gesture at `now_ms`. The first commit waits a full interval.
    pub fn start(&mut self, now_ms: f64) {
        self.last_commit_ms = now_ms;
        self.pending = PanDelta::default();
    }

    /// Add a pointer delta. Returns the accumulated delta once more than the
    /// interval has passed since the last commit, otherwise `None`.
    pub fn push(&mut self, dx: f64, dy: f64, now_ms: f64) -> Option<PanDelta> {
        self.pending.dx += dx;
        self.pending.dy += dy;
        if now_ms - self.last_commit_ms > self.interval_ms {
            self.last_commit_ms = now_ms;
            return Some(std::mem::take(&mut self.pending));
        }
        None
    }

    /// Take whatever is still pending, e.g. on pointer-up.
    pub fn flush(&mut self) -> Option<PanDelta> {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_zero() { None } else { Some(pending) }
    }

    #[must_use]
    pub fn pending(&self) -> PanDelta {
        self.pending
    }
}
