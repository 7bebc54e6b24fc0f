//! Scripted pointer input.
//!
//! A script is a JSON array of timed events replayed against the session by
//! elapsed time:
//!
//! ```json
//! [
//!   { "t_ms": 0,   "event": "down", "x": 150.0, "y": 150.0 },
//!   { "t_ms": 500, "event": "move", "x": 300.0, "y": 0.0 },
//!   { "t_ms": 900, "event": "capture" },
//!   { "t_ms": 1000, "event": "up" }
//! ]
//! ```

use std::path::Path;
use std::time::Duration;

use glint_core::{ControlRegion, FilterMode, PointerSample, Session};
use serde::{Deserialize, Serialize};

use crate::error::DemoError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Mode { mode: FilterMode },
    Resize { region: ControlRegion },
    Capture,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub t_ms: u64,
    #[serde(flatten)]
    pub event: ScriptEvent,
}

/// Event timeline with a replay cursor.
#[derive(Debug, Clone, Default)]
pub struct PointerScript {
    events: Vec<TimedEvent>,
    cursor: usize,
}

impl PointerScript {
    /// Build a script; events are ordered by time, ties keep file order.
    pub fn new(mut events: Vec<TimedEvent>) -> Self {
        events.sort_by_key(|e| e.t_ms);
        Self { events, cursor: 0 }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self::new)
    }

    pub fn load(path: &Path) -> Result<Self, DemoError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text).map_err(|source| DemoError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Events whose time has come since the last call.
    pub fn due(&mut self, elapsed: Duration) -> &[TimedEvent] {
        let now = elapsed.as_millis();
        let start = self.cursor;
        while self
            .events
            .get(self.cursor)
            .is_some_and(|e| u128::from(e.t_ms) <= now)
        {
            self.cursor += 1;
        }
        &self.events[start..self.cursor]
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.events.len()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// Feed one scripted event into the session.
pub fn apply_event(session: &mut Session, event: &ScriptEvent) {
    match *event {
        ScriptEvent::Down { x, y } | ScriptEvent::Move { x, y } => {
            session.pointer_moved(PointerSample::touching(x, y));
        }
        ScriptEvent::Up => session.pointer_released(),
        ScriptEvent::Mode { mode } => session.set_mode(mode),
        ScriptEvent::Resize { region } => session.resize(region),
        ScriptEvent::Capture => session.request_export(),
    }
}
