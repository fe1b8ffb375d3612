/// Bytes per RGBA8 pixel in snapshots and uploads.
pub const BYTES_PER_PIXEL: usize = 4;

/// Smallest world-space extent a surface may have before mapping is refused.
pub const MIN_BOUNDS_EXTENT: f32 = 1e-6;

/// Radius of the center marker in the debug overlay, in world units.
pub const OVERLAY_CENTER_MARKER_RADIUS: f32 = 0.05;
