//! Debug geometry for hosts that draw gizmos

use glam::Vec2;
use tracing::info;

use crate::constants::OVERLAY_CENTER_MARKER_RADIUS;
use crate::projection::CoordinateReport;
use crate::types::WorldBounds;

use super::{EngineError, PaintEngine};

/// World-space shapes describing the current surface placement
///
/// A host draws the collider as a wire circle, the sprite as a wire box and
/// the center as a small filled marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugOverlay {
    pub collider_center: Vec2,
    pub collider_radius: f32,
    pub sprite_bounds: WorldBounds,
    pub center_marker: Vec2,
    pub center_marker_radius: f32,
}

impl PaintEngine {
    /// Overlay for the current transform, None before the first pull
    pub fn debug_overlay(&self) -> Option<DebugOverlay> {
        let transform = self.transform?;
        let region = transform.interactive_region(self.collider_radius);
        Some(DebugOverlay {
            collider_center: region.center,
            collider_radius: region.radius,
            sprite_bounds: transform.bounds,
            center_marker: transform.bounds.center(),
            center_marker_radius: OVERLAY_CENTER_MARKER_RADIUS,
        })
    }

    /// Map the surface's center and corners as a sanity check
    pub fn coordinate_report(&self) -> Result<CoordinateReport, EngineError> {
        let transform = self.transform.ok_or(EngineError::NoTransform)?;
        let report = CoordinateReport::compute(&transform.bounds, self.canvas.canvas_size)?;

        let size = transform.bounds.size();
        info!(
            "coordinate check: surface {:.3}x{:.3} at ({:.3}, {:.3}); center -> ({:.1}, {:.1}), bottom-left -> ({:.1}, {:.1}), top-right -> ({:.1}, {:.1})",
            size.x,
            size.y,
            transform.bounds.center().x,
            transform.bounds.center().y,
            report.center.x,
            report.center.y,
            report.bottom_left.x,
            report.bottom_left.y,
            report.top_right.x,
            report.top_right.y
        );
        Ok(report)
    }
}
