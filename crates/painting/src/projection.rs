//! World-to-texture coordinate mapping.
//!
//! The rendered surface occupies an axis-aligned box in world space with Y
//! pointing up. Texture storage is row-major from the top, so the vertical
//! axis is flipped on the way in.

use glam::Vec2;
use thiserror::Error;

use crate::constants::MIN_BOUNDS_EXTENT;
use crate::types::WorldBounds;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MappingError {
    #[error("Degenerate surface bounds: {width}x{height}")]
    DegenerateBounds { width: f32, height: f32 },
    #[error("Canvas has zero size")]
    EmptyCanvas,
}

/// Map a world-space point into texture pixel coordinates.
///
/// The point is expressed relative to `bounds`, clamped to the unit square,
/// flipped vertically and scaled to `[0, canvas_size - 1]`. The result lies in
/// that range for every input, including NaN components which clamp to 0.
///
/// # Errors
/// `DegenerateBounds` when the bounds have zero (or non-finite) width or
/// height, `EmptyCanvas` when `canvas_size` is 0.
pub fn world_to_texture(
    world: Vec2,
    bounds: &WorldBounds,
    canvas_size: u32,
) -> Result<Vec2, MappingError> {
    if canvas_size == 0 {
        return Err(MappingError::EmptyCanvas);
    }

    let size = bounds.size();
    if !is_usable_extent(size.x) || !is_usable_extent(size.y) {
        return Err(MappingError::DegenerateBounds {
            width: size.x,
            height: size.y,
        });
    }

    let relative = (world - bounds.min) / size;
    let u = clamp_unit(relative.x);
    let v = 1.0 - clamp_unit(relative.y);

    let max_index = (canvas_size - 1) as f32;
    Ok(Vec2::new(u * max_index, v * max_index))
}

/// Round a texture-space position to the nearest pixel
pub fn texture_to_pixel(texture_pos: Vec2) -> (u32, u32) {
    let round = |v: f32| if v.is_finite() { v.round().max(0.0) as u32 } else { 0 };
    (round(texture_pos.x), round(texture_pos.y))
}

#[inline]
fn is_usable_extent(extent: f32) -> bool {
    extent.is_finite() && extent.abs() >= MIN_BOUNDS_EXTENT
}

#[inline]
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Where the surface's reference points land in texture space
///
/// Used as a self-check after setup: the center should map near the middle
/// of the canvas, bottom-left to `(0, size - 1)` and top-right to
/// `(size - 1, 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateReport {
    pub center: Vec2,
    pub bottom_left: Vec2,
    pub top_right: Vec2,
}

impl CoordinateReport {
    pub fn compute(bounds: &WorldBounds, canvas_size: u32) -> Result<Self, MappingError> {
        Ok(Self {
            center: world_to_texture(bounds.center(), bounds, canvas_size)?,
            bottom_left: world_to_texture(bounds.min, bounds, canvas_size)?,
            top_right: world_to_texture(bounds.max, bounds, canvas_size)?,
        })
    }
}
