//! Diagnostic hook for paint decisions.
//!
//! None of the functional behavior depends on an observer; hosts that do not
//! care install [`NoopObserver`].

use glam::Vec2;
use tracing::{debug, warn};

use crate::hit_test::HitReport;
use crate::projection::{MappingError, texture_to_pixel};
use crate::types::PixelRect;

/// Receives one callback per decision the paint engine makes
///
/// All methods default to doing nothing.
pub trait PaintObserver {
    /// `report` is None when the engine has no transform yet
    fn hit_tested(&mut self, _point: Vec2, _report: Option<&HitReport>) {}

    fn mapped(&mut self, _point: Vec2, _texture_pos: Vec2) {}

    fn mapping_failed(&mut self, _point: Vec2, _error: &MappingError) {}

    fn outside_disc(&mut self, _texture_pos: Vec2, _distance: f32, _disc_radius: f32) {}

    fn painted(&mut self, _texture_pos: Vec2, _region: PixelRect) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PaintObserver for NoopObserver {}

/// Observer that logs every decision through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PaintObserver for TracingObserver {
    fn hit_tested(&mut self, point: Vec2, report: Option<&HitReport>) {
        match report {
            Some(report) => debug!(
                "hit test at ({:.3}, {:.3}): distance={:.3} in_bounds={} in_circle={}",
                point.x, point.y, report.distance, report.in_bounds, report.in_circle
            ),
            None => debug!(
                "hit test at ({:.3}, {:.3}): no surface transform yet",
                point.x, point.y
            ),
        }
    }

    fn mapped(&mut self, point: Vec2, texture_pos: Vec2) {
        let (px, py) = texture_to_pixel(texture_pos);
        debug!(
            "world ({:.3}, {:.3}) -> texture ({:.1}, {:.1}), pixel ({}, {})",
            point.x, point.y, texture_pos.x, texture_pos.y, px, py
        );
    }

    fn mapping_failed(&mut self, point: Vec2, error: &MappingError) {
        warn!("cannot map ({:.3}, {:.3}): {}", point.x, point.y, error);
    }

    fn outside_disc(&mut self, texture_pos: Vec2, distance: f32, disc_radius: f32) {
        debug!(
            "texture ({:.1}, {:.1}) is outside the disc: {:.1} > {:.1}",
            texture_pos.x, texture_pos.y, distance, disc_radius
        );
    }

    fn painted(&mut self, texture_pos: Vec2, region: PixelRect) {
        debug!(
            "dot painted at ({:.1}, {:.1}) -> region ({}, {}) {}x{}",
            texture_pos.x, texture_pos.y, region.x, region.y, region.width, region.height
        );
    }
}
