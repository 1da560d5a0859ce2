//! Stroke files and their replay through the widget's pointer handlers.
//!
//! A stroke file is JSON in one of two shapes:
//!
//! - strokes: `[[{"x":1,"y":2},...],...]`, each inner array one pen stroke
//! - events: `[{"type":"down","x":1,"y":2},{"type":"move",...},...]`

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use serde::Deserialize;

use signature::{PointerEvent, Stroke};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StrokeFile {
    Strokes(Vec<Stroke>),
    Events(Vec<PointerEvent>),
}

impl StrokeFile {
    /// Parse a stroke file.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, empty strokes or unknown event types.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pointer events that reproduce this file.
    #[must_use]
    pub fn into_events(self) -> Vec<PointerEvent> {
        match self {
            Self::Strokes(strokes) => pointer_events(&strokes),
            Self::Events(events) => events,
        }
    }
}

/// Down at the first point, a move per further point, up at the last.
#[must_use]
pub fn pointer_events(strokes: &[Stroke]) -> Vec<PointerEvent> {
    let mut events = Vec::with_capacity(strokes.iter().map(|s| s.len() + 1).sum());
    for stroke in strokes {
        let start = stroke.start();
        events.push(PointerEvent::Down { x: start.x, y: start.y });
        for p in stroke.points().iter().skip(1) {
            events.push(PointerEvent::Move { x: p.x, y: p.y });
        }
        let end = stroke.end();
        events.push(PointerEvent::Up { x: end.x, y: end.y });
    }
    events
}
