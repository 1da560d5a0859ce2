//! Stroke model: points, strokes and the in-memory stroke collection.
//!
//! A [`Stroke`] is one continuous pen-down-to-pen-up motion. The
//! [`StrokeModel`] owns the ordered collection that makes up a signature in
//! progress. Only the last stroke may be open; every earlier stroke is closed
//! and is only ever replayed, never mutated. The renderer reads strokes from
//! here and nothing else holds drawing state that could not be rebuilt from it.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SignatureError;

/// A point in canvas-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Error returned when building a stroke from an empty point list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a stroke needs at least one point")]
pub struct EmptyStroke;

/// An ordered, non-empty sequence of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    /// Start a stroke seeded with its first point.
    #[must_use]
    pub fn new(start: Point) -> Self {
        Self { points: vec![start] }
    }

    /// Build a stroke from recorded points.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyStroke`] when `points` is empty.
    pub fn from_points(points: Vec<Point>) -> Result<Self, EmptyStroke> {
        if points.is_empty() {
            return Err(EmptyStroke);
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The point recorded on pointer-down.
    #[must_use]
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// The most recently recorded point.
    #[must_use]
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; strokes hold at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether every point coincides with the start, i.e. the pen never moved.
    #[must_use]
    pub fn is_dot(&self) -> bool {
        let start = self.start();
        self.points.iter().all(|p| *p == start)
    }

    /// The newest segment: the last two recorded points.
    #[must_use]
    pub fn latest_segment(&self) -> Option<(Point, Point)> {
        match self.points.as_slice() {
            [.., a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    fn push(&mut self, point: Point) {
        self.points.push(point);
    }
}

impl TryFrom<Vec<Point>> for Stroke {
    type Error = EmptyStroke;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

impl From<Stroke> for Vec<Point> {
    fn from(stroke: Stroke) -> Self {
        stroke.points
    }
}

/// The stroke collection for one signature, in drawing order.
#[derive(Debug, Clone, Default)]
pub struct StrokeModel {
    strokes: Vec<Stroke>,
    open: bool,
}

impl StrokeModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap previously recorded strokes. All of them are closed.
    #[must_use]
    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        Self { strokes, open: false }
    }

    /// Append a new stroke seeded with `point` and make it the active one.
    ///
    /// Any stroke still open is closed first so that only the last stroke can
    /// ever grow.
    pub fn begin_stroke(&mut self, point: Point) -> &Stroke {
        if self.open {
            debug!(count = self.strokes.len(), "closing dangling stroke before starting a new one");
        }
        self.strokes.push(Stroke::new(point));
        self.open = true;
        let index = self.strokes.len() - 1;
        &self.strokes[index]
    }

    /// Append `point` to the active stroke.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::NoActiveStroke`] when no stroke is open.
    pub fn append_point(&mut self, point: Point) -> Result<&Stroke, SignatureError> {
        if !self.open {
            return Err(SignatureError::NoActiveStroke);
        }
        let stroke = self.strokes.last_mut().ok_or(SignatureError::NoActiveStroke)?;
        stroke.push(point);
        Ok(stroke)
    }

    /// Close the active stroke. Returns it, or `None` if nothing was open.
    pub fn end_stroke(&mut self) -> Option<&Stroke> {
        if !self.open {
            return None;
        }
        self.open = false;
        self.strokes.last()
    }

    /// Drop every stroke.
    pub fn reset(&mut self) {
        self.strokes.clear();
        self.open = false;
    }

    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The open stroke, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Stroke> {
        if self.open { self.strokes.last() } else { None }
    }

    /// The most recent stroke, open or closed.
    #[must_use]
    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Total number of recorded points across all strokes.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }
}
