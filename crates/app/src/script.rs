//! Replay scripts: the headless stand-in for live input
//!
//! A script is a JSON array where each entry is one tick:
//!
//! ```text
//! [
//!   { "MoveSurface": { "offset": [0.0, 0.2], "scale": 2.5 } },
//!   { "PointerDown": { "x": 0.0, "y": 0.2 } },
//!   "Reset"
//! ]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec2;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum ReplayEvent {
    /// Pointer pressed at a world-space position
    PointerDown { x: f32, y: f32 },
    /// Move or rescale the surface; omitted fields keep their value
    MoveSurface {
        #[serde(default)]
        offset: Option<[f32; 2]>,
        #[serde(default)]
        scale: Option<f32>,
    },
    /// Wipe all paint back to the bare disc
    Reset,
}

impl ReplayEvent {
    pub fn pointer(x: f32, y: f32) -> Self {
        ReplayEvent::PointerDown { x, y }
    }

    pub fn world_point(&self) -> Option<Vec2> {
        match *self {
            ReplayEvent::PointerDown { x, y } => Some(Vec2::new(x, y)),
            _ => None,
        }
    }
}

pub fn parse(text: &str) -> Result<Vec<ReplayEvent>> {
    serde_json::from_str(text).context("parsing replay script")
}

pub fn load(path: &Path) -> Result<Vec<ReplayEvent>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading replay script {}", path.display()))?;
    parse(&text).with_context(|| format!("in {}", path.display()))
}

/// A small heart-ish pattern around the default surface center, plus one
/// click in the cup rim and one far outside
pub fn demo(center: Vec2) -> Vec<ReplayEvent> {
    let offsets = [
        (0.0, 0.0),
        (-0.4, 0.3),
        (0.4, 0.3),
        (-0.6, 0.7),
        (0.6, 0.7),
        (-0.2, 0.8),
        (0.2, 0.8),
        (0.0, -0.5),
        (0.0, -1.0),
        // Inside the collider, outside the visible disc
        (2.6, 2.6),
        (10.0, 10.0),
    ];
    offsets
        .into_iter()
        .map(|(dx, dy)| ReplayEvent::pointer(center.x + dx, center.y + dy))
        .collect()
}
