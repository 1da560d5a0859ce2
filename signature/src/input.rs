//! Input model: pointer events and the drawing state machine.
//!
//! Pointer coordinates arrive already mapped into canvas-local pixel space by
//! whatever input layer the host has (mouse, touch, pen). `InputState` tracks
//! whether a stroke is being drawn between pointer-down and pointer-up/leave.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::stroke::Point;

/// A pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    /// Pen/button pressed.
    Down { x: f64, y: f64 },
    /// Pointer moved (pressed or not).
    Move { x: f64, y: f64 },
    /// Pen/button released.
    Up { x: f64, y: f64 },
    /// Pointer left the canvas.
    Leave { x: f64, y: f64 },
}

impl PointerEvent {
    /// The event position.
    #[must_use]
    pub fn point(self) -> Point {
        match self {
            Self::Down { x, y } | Self::Move { x, y } | Self::Up { x, y } | Self::Leave { x, y } => Point::new(x, y),
        }
    }

    /// Whether this event ends a stroke.
    #[must_use]
    pub fn is_release(self) -> bool {
        matches!(self, Self::Up { .. } | Self::Leave { .. })
    }
}

/// Drawing state between pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No stroke in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A stroke is being drawn.
    Drawing {
        /// Where the pointer went down; compared against the release point to
        /// detect a tap.
        start: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// The start point of the stroke being drawn.
    #[must_use]
    pub fn start(self) -> Option<Point> {
        match self {
            Self::Drawing { start } => Some(start),
            Self::Idle => None,
        }
    }
}
