//! Shared configuration for the latte canvas
//!
//! This crate is the single source of truth for canvas geometry, colors and
//! the placement of the painted surface in world space. Everything here is
//! plain data: it is read once when a paint engine is constructed and never
//! reconfigured at runtime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// An RGBA8 color, straight (non-premultiplied) alpha.
pub type Rgba = [u8; 4];

/// Default canvas resolution (square) in pixels
pub const DEFAULT_CANVAS_SIZE: u32 = 256;

/// Largest accepted canvas edge. A 2048x2048 RGBA8 buffer is 16 MiB, and
/// disc synthesis touches every pixel once at construction.
pub const MAX_CANVAS_SIZE: u32 = 2048;

/// Default disc radius as a fraction of the canvas size
pub const DEFAULT_DISC_RADIUS_FRACTION: f32 = 0.4;

/// Default half-size of the painted dot, in pixels
pub const DEFAULT_DOT_HALF_SIZE: f32 = 10.0;

/// Coffee brown (0.4, 0.2, 0.1) in 8-bit
pub const COFFEE_COLOR: Rgba = [102, 51, 26, 255];

/// Milk white
pub const MILK_COLOR: Rgba = [255, 255, 255, 255];

/// Fully transparent black, used outside the disc
pub const CLEAR_COLOR: Rgba = [0, 0, 0, 0];

/// World units covered by one canvas pixel at scale 1.0 is `1 / PIXELS_PER_UNIT`
pub const DEFAULT_PIXELS_PER_UNIT: f32 = 100.0;

/// Default uniform scale of the surface
pub const DEFAULT_SURFACE_SCALE: f32 = 2.5;

/// Default surface offset from its parent, in world units
pub const DEFAULT_SURFACE_OFFSET: [f32; 2] = [0.0, 0.2];

/// Default collider radius before scaling, in world units
pub const DEFAULT_COLLIDER_RADIUS: f32 = 1.6;

/// Editor ranges the values are snapped into by [`LatteConfig::clamped`]
pub const DISC_RADIUS_FRACTION_RANGE: (f32, f32) = (0.1, 0.9);
pub const SURFACE_SCALE_RANGE: (f32, f32) = (0.1, 3.0);
pub const SURFACE_OFFSET_RANGE: (f32, f32) = (-1.0, 1.0);
pub const COLLIDER_RADIUS_RANGE: (f32, f32) = (0.1, 2.0);

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid canvas size: {0} (must be 1..={max})", max = MAX_CANVAS_SIZE)]
    InvalidCanvasSize(u32),
    #[error("Disc radius fraction {0} must lie strictly between 0 and 1")]
    InvalidDiscFraction(f32),
    #[error("Dot half-size {0} must be finite and non-negative")]
    InvalidDotSize(f32),
    #[error("Surface scale {0} must be finite and positive")]
    InvalidScale(f32),
    #[error("Collider radius {0} must be finite and positive")]
    InvalidColliderRadius(f32),
    #[error("Pixels per unit {0} must be finite and positive")]
    InvalidPixelsPerUnit(f32),
    #[error("Surface offset ({0}, {1}) must be finite")]
    InvalidOffset(f32, f32),
}

/// Canvas geometry and colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width and height of the square pixel buffer
    pub canvas_size: u32,
    /// Radius of the paintable disc as a fraction of `canvas_size`
    pub disc_radius_fraction: f32,
    /// Color of the disc
    pub surface_color: Rgba,
    /// Color stamped on each accepted pointer-down
    pub paint_color: Rgba,
    /// Half the edge length of the stamped square, in pixels
    pub paint_dot_half_size: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas_size: DEFAULT_CANVAS_SIZE,
            disc_radius_fraction: DEFAULT_DISC_RADIUS_FRACTION,
            surface_color: COFFEE_COLOR,
            paint_color: MILK_COLOR,
            paint_dot_half_size: DEFAULT_DOT_HALF_SIZE,
        }
    }
}

impl CanvasConfig {
    /// Disc radius in pixels
    pub fn disc_radius_px(&self) -> f32 {
        self.canvas_size as f32 * self.disc_radius_fraction
    }

    /// Disc center in pixel space
    pub fn disc_center(&self) -> [f32; 2] {
        let half = self.canvas_size as f32 * 0.5;
        [half, half]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_size == 0 || self.canvas_size > MAX_CANVAS_SIZE {
            return Err(ConfigError::InvalidCanvasSize(self.canvas_size));
        }
        let fraction = self.disc_radius_fraction;
        if !fraction.is_finite() || fraction <= 0.0 || fraction >= 1.0 {
            return Err(ConfigError::InvalidDiscFraction(fraction));
        }
        let half = self.paint_dot_half_size;
        if !half.is_finite() || half < 0.0 {
            return Err(ConfigError::InvalidDotSize(half));
        }
        Ok(())
    }
}

/// Where the painted surface sits in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfacePlacement {
    /// Surface center offset, in world units
    pub offset: [f32; 2],
    /// Uniform scale applied to both the sprite and its collider
    pub scale: f32,
    /// Collider radius before scaling
    pub collider_radius: f32,
    /// Canvas pixels per world unit at scale 1.0
    pub pixels_per_unit: f32,
}

impl Default for SurfacePlacement {
    fn default() -> Self {
        Self {
            offset: DEFAULT_SURFACE_OFFSET,
            scale: DEFAULT_SURFACE_SCALE,
            collider_radius: DEFAULT_COLLIDER_RADIUS,
            pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
        }
    }
}

impl SurfacePlacement {
    /// Edge length of the rendered sprite in world units
    pub fn world_size(&self, canvas_size: u32) -> f32 {
        canvas_size as f32 / self.pixels_per_unit * self.scale
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let [x, y] = self.offset;
        if !x.is_finite() || !y.is_finite() {
            return Err(ConfigError::InvalidOffset(x, y));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        if !self.collider_radius.is_finite() || self.collider_radius <= 0.0 {
            return Err(ConfigError::InvalidColliderRadius(self.collider_radius));
        }
        if !self.pixels_per_unit.is_finite() || self.pixels_per_unit <= 0.0 {
            return Err(ConfigError::InvalidPixelsPerUnit(self.pixels_per_unit));
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct LatteConfig {
    pub canvas: CanvasConfig,
    pub placement: SurfacePlacement,
    /// Emit a log line for every paint decision
    pub show_debug_logs: bool,
}

impl Default for LatteConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            placement: SurfacePlacement::default(),
            show_debug_logs: true,
        }
    }
}

impl LatteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.canvas.validate()?;
        self.placement.validate()
    }

    /// Snap tunable values into their editor ranges
    ///
    /// NaN passes through unchanged and is left for [`LatteConfig::validate`]
    /// to reject.
    pub fn clamped(mut self) -> Self {
        let clamp = |v: f32, (lo, hi): (f32, f32)| v.clamp(lo, hi);

        self.canvas.disc_radius_fraction =
            clamp(self.canvas.disc_radius_fraction, DISC_RADIUS_FRACTION_RANGE);

        self.placement.scale = clamp(self.placement.scale, SURFACE_SCALE_RANGE);
        self.placement.offset = [
            clamp(self.placement.offset[0], SURFACE_OFFSET_RANGE),
            clamp(self.placement.offset[1], SURFACE_OFFSET_RANGE),
        ];
        self.placement.collider_radius =
            clamp(self.placement.collider_radius, COLLIDER_RADIUS_RANGE);
        self
    }
}
