//! Pointer handling: hit test, map, disc gate, stamp

use glam::Vec2;
use tracing::trace;

use crate::hit_test::HitReport;
use crate::projection::{MappingError, world_to_texture};
use crate::types::PixelRect;

use super::PaintEngine;

/// Stage of the one-shot paint state machine
///
/// Every event walks `Idle -> HitTesting -> Mapping -> InDiscCheck ->
/// Stamping -> Idle`, leaving early on any rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintState {
    #[default]
    Idle,
    HitTesting,
    Mapping,
    InDiscCheck,
    Stamping,
}

/// What a single pointer-down did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintOutcome {
    /// No transform yet, or the collider rejected the point
    Missed,
    /// Surface bounds could not be mapped
    MappingFailed(MappingError),
    /// Mapped point lies outside the visible disc
    OutsideDisc { texture_pos: Vec2 },
    /// Inside the disc but the dot landed entirely off the buffer
    Clipped { texture_pos: Vec2 },
    /// A dot was stamped
    Painted { texture_pos: Vec2, region: PixelRect },
}

impl PaintEngine {
    /// Handle a pointer-down at a world-space position
    ///
    /// At most one stamp is written; every rejection leaves the buffer
    /// untouched.
    pub fn on_pointer_down(&mut self, world: Vec2) -> PaintOutcome {
        self.enter(PaintState::HitTesting);

        let region = self.region();
        let report = region.as_ref().map(|region| HitReport::compute(world, region));
        self.observer.hit_tested(world, report.as_ref());

        let (Some(transform), Some(report)) = (self.transform, report) else {
            return self.finish(PaintOutcome::Missed);
        };
        if !report.hit() {
            return self.finish(PaintOutcome::Missed);
        }

        self.enter(PaintState::Mapping);
        let mapped = world_to_texture(world, &transform.bounds, self.canvas.canvas_size);
        let texture_pos = match mapped {
            Ok(pos) => pos,
            Err(error) => {
                self.observer.mapping_failed(world, &error);
                return self.finish(PaintOutcome::MappingFailed(error));
            }
        };
        self.observer.mapped(world, texture_pos);

        self.paint_at_texture(texture_pos)
    }

    /// Stamp a dot at a texture-space position if it lies on the disc
    ///
    /// This is the second half of `on_pointer_down`, usable directly by hosts
    /// that already resolved texture coordinates.
    pub fn paint_at_texture(&mut self, texture_pos: Vec2) -> PaintOutcome {
        self.enter(PaintState::InDiscCheck);

        let center = Vec2::from(self.canvas.disc_center());
        let disc_radius = self.canvas.disc_radius_px();
        let distance = texture_pos.distance(center);
        // Written so that NaN fails the gate
        if !(distance <= disc_radius) {
            self.observer.outside_disc(texture_pos, distance, disc_radius);
            return self.finish(PaintOutcome::OutsideDisc { texture_pos });
        }

        self.enter(PaintState::Stamping);
        let stamped = self.buffer.stamp_quad(
            texture_pos,
            self.canvas.paint_dot_half_size,
            self.canvas.paint_color,
        );

        match stamped {
            Some(region) => {
                self.mark_dirty(region);
                self.observer.painted(texture_pos, region);
                self.finish(PaintOutcome::Painted { texture_pos, region })
            }
            None => self.finish(PaintOutcome::Clipped { texture_pos }),
        }
    }

    #[inline]
    fn enter(&mut self, state: PaintState) {
        trace!("PaintEngine: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    #[inline]
    fn finish(&mut self, outcome: PaintOutcome) -> PaintOutcome {
        self.enter(PaintState::Idle);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::PaintObserver;
    use crate::transform::SurfaceTransform;
    use crate::types::WorldBounds;
    use latte_config::{LatteConfig, MILK_COLOR};
    use std::sync::{Arc, Mutex};

    fn engine() -> PaintEngine {
        let config = LatteConfig {
            show_debug_logs: false,
            ..Default::default()
        };
        let mut engine = PaintEngine::new(&config).unwrap();
        // 2x2 world units centered on the origin; collider radius 1.6 * 0.5 = 0.8
        engine.set_transform(SurfaceTransform {
            bounds: WorldBounds::new(Vec2::splat(-1.0), Vec2::splat(1.0)),
            scale: 0.5,
        });
        engine
    }

    #[test]
    fn test_center_click_paints() {
        let mut engine = engine();
        let outcome = engine.on_pointer_down(Vec2::ZERO);

        let PaintOutcome::Painted { texture_pos, region } = outcome else {
            panic!("expected paint, got {outcome:?}");
        };
        assert_eq!(texture_pos, Vec2::new(127.5, 127.5));
        // Pixel centers 117.5 through 137.5 inclusive
        assert_eq!(region, PixelRect::new(117, 117, 21, 21));
        assert_eq!(engine.buffer().get_pixel(127, 127), Some(MILK_COLOR));
        assert_eq!(engine.state(), PaintState::Idle);
    }

    #[test]
    fn test_vertical_flip_on_paint() {
        let mut engine = engine();
        // Upper half of the world lands in the upper rows of the texture
        let outcome = engine.on_pointer_down(Vec2::new(0.0, 0.5));
        let PaintOutcome::Painted { texture_pos, .. } = outcome else {
            panic!("expected paint, got {outcome:?}");
        };
        assert!(texture_pos.y < 127.5);
        assert_eq!(engine.buffer().get_pixel(127, texture_pos.y as u32), Some(MILK_COLOR));
    }

    #[test]
    fn test_miss_before_transform() {
        let config = LatteConfig {
            show_debug_logs: false,
            ..Default::default()
        };
        let mut engine = PaintEngine::new(&config).unwrap();
        let before = engine.buffer().clone();

        assert_eq!(engine.on_pointer_down(Vec2::ZERO), PaintOutcome::Missed);
        assert_eq!(engine.buffer(), &before);
        assert_eq!(engine.state(), PaintState::Idle);
    }

    #[test]
    fn test_collider_miss_has_no_side_effects() {
        let mut engine = engine();
        engine.take_dirty();
        let before = engine.buffer().clone();

        // Inside the sprite bounds but outside the 0.8 collider
        assert_eq!(engine.on_pointer_down(Vec2::new(0.7, 0.7)), PaintOutcome::Missed);
        assert_eq!(engine.buffer(), &before);
        assert!(!engine.has_dirty());
    }

    #[test]
    fn test_disc_gate_leaves_buffer_unchanged() {
        let mut engine = engine();
        // Collider wide enough to accept the whole sprite
        engine.collider_radius = 10.0;
        engine.take_dirty();
        let before = engine.buffer().snapshot();

        // Maps to roughly (242, 13): on the collider, far outside the 102.4px disc
        let outcome = engine.on_pointer_down(Vec2::new(0.9, 0.9));
        assert!(matches!(outcome, PaintOutcome::OutsideDisc { .. }));
        assert_eq!(engine.buffer().snapshot(), before);
        assert!(!engine.has_dirty());
    }

    #[test]
    fn test_paint_at_texture_gate() {
        let mut engine = engine();
        let before = engine.buffer().snapshot();

        let outcome = engine.paint_at_texture(Vec2::new(10.0, 10.0));
        assert_eq!(
            outcome,
            PaintOutcome::OutsideDisc {
                texture_pos: Vec2::new(10.0, 10.0)
            }
        );
        assert!(matches!(
            engine.paint_at_texture(Vec2::NAN),
            PaintOutcome::OutsideDisc { .. }
        ));
        assert_eq!(engine.buffer().snapshot(), before);
    }

    #[test]
    fn test_degenerate_bounds_reports_and_skips() {
        let mut engine = engine();
        engine.set_transform(SurfaceTransform {
            bounds: WorldBounds::new(Vec2::new(0.0, -1.0), Vec2::new(0.0, 1.0)),
            scale: 1.0,
        });
        let before = engine.buffer().snapshot();

        let outcome = engine.on_pointer_down(Vec2::ZERO);
        assert!(matches!(
            outcome,
            PaintOutcome::MappingFailed(MappingError::DegenerateBounds { .. })
        ));
        assert_eq!(engine.buffer().snapshot(), before);
    }

    #[test]
    fn test_repeat_click_is_idempotent() {
        let mut once = engine();
        once.on_pointer_down(Vec2::new(0.2, -0.1));

        let mut twice = engine();
        twice.on_pointer_down(Vec2::new(0.2, -0.1));
        twice.on_pointer_down(Vec2::new(0.2, -0.1));

        assert_eq!(once.buffer().as_bytes(), twice.buffer().as_bytes());
    }

    #[derive(Default, Clone)]
    struct Recorder(Arc<Mutex<Vec<&'static str>>>);

    impl PaintObserver for Recorder {
        fn hit_tested(&mut self, _point: Vec2, _report: Option<&HitReport>) {
            self.0.lock().unwrap().push("hit");
        }
        fn mapped(&mut self, _point: Vec2, _texture_pos: Vec2) {
            self.0.lock().unwrap().push("mapped");
        }
        fn outside_disc(&mut self, _texture_pos: Vec2, _distance: f32, _disc_radius: f32) {
            self.0.lock().unwrap().push("outside");
        }
        fn painted(&mut self, _texture_pos: Vec2, _region: PixelRect) {
            self.0.lock().unwrap().push("painted");
        }
    }

    #[test]
    fn test_observer_sees_each_decision() {
        let recorder = Recorder::default();
        let mut engine = engine().with_observer(recorder.clone());

        engine.on_pointer_down(Vec2::ZERO);
        engine.on_pointer_down(Vec2::new(5.0, 5.0));

        let events = recorder.0.lock().unwrap().clone();
        assert_eq!(events, vec!["hit", "mapped", "painted", "hit"]);
    }
}
