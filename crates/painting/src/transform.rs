//! Surface transform: where the painted sprite sits in world space.
//!
//! The core never owns the live transform. A host implements
//! [`TransformProvider`] and the engine pulls a fresh [`SurfaceTransform`]
//! from it once per tick.

use glam::Vec2;
use latte_config::SurfacePlacement;

use crate::hit_test::InteractiveRegion;
use crate::types::WorldBounds;

/// Source of the surface's live world-space placement
pub trait TransformProvider {
    /// World-space bounding box of the rendered surface
    fn surface_bounds(&self) -> WorldBounds;
    /// Current uniform scale of the surface
    fn surface_scale(&self) -> f32;
}

/// Snapshot of the surface placement for a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTransform {
    pub bounds: WorldBounds,
    pub scale: f32,
}

impl SurfaceTransform {
    pub fn pull<P: TransformProvider + ?Sized>(provider: &P) -> Self {
        Self {
            bounds: provider.surface_bounds(),
            scale: provider.surface_scale(),
        }
    }

    /// Collider circle centered on the surface, radius scaled with it
    pub fn interactive_region(&self, collider_radius: f32) -> InteractiveRegion {
        InteractiveRegion::from_circle(self.bounds.center(), collider_radius * self.scale)
    }
}

/// Provider computing bounds from a [`SurfacePlacement`] relative to a parent
/// position
///
/// The sprite is `canvas_size / pixels_per_unit` world units wide at scale
/// 1.0, centered on `parent + offset`.
#[derive(Debug, Clone)]
pub struct PlacementTransform {
    parent: Vec2,
    placement: SurfacePlacement,
    canvas_size: u32,
}

impl PlacementTransform {
    pub fn new(parent: Vec2, placement: SurfacePlacement, canvas_size: u32) -> Self {
        Self {
            parent,
            placement,
            canvas_size,
        }
    }

    pub fn set_parent(&mut self, parent: Vec2) {
        self.parent = parent;
    }

    pub fn set_offset(&mut self, offset: [f32; 2]) {
        self.placement.offset = offset;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.placement.scale = scale;
    }

    /// World-space center of the surface
    pub fn center(&self) -> Vec2 {
        self.parent + Vec2::from(self.placement.offset)
    }
}

impl TransformProvider for PlacementTransform {
    fn surface_bounds(&self) -> WorldBounds {
        let half = self.placement.world_size(self.canvas_size) * 0.5;
        WorldBounds::from_center_half_extent(self.center(), Vec2::splat(half))
    }

    fn surface_scale(&self) -> f32 {
        self.placement.scale
    }
}
