//! CPU pixel buffer for painting - 8-bit RGBA storage
//!
//! Pixel (x, y) covers the unit square starting at (x, y); its center is
//! (x + 0.5, y + 0.5). Every geometric test in this module, disc synthesis
//! included, measures against pixel centers.

use std::ops::Range;

use glam::Vec2;
use latte_config::CLEAR_COLOR;
use tracing::debug;

use crate::types::{PixelRect, Rgba};

/// A square-or-rectangular RGBA8 surface, row-major with the origin top-left
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    /// Surface dimensions
    pub width: u32,
    pub height: u32,
    /// Always exactly `width * height` entries
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Create a new buffer initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![CLEAR_COLOR; pixel_count],
        }
    }

    /// Synthesize a square canvas holding a filled disc
    ///
    /// The disc is centered on the canvas with radius
    /// `size * radius_fraction`; every other pixel is `background`.
    pub fn with_disc(size: u32, radius_fraction: f32, color: Rgba, background: Rgba) -> Self {
        let mut buffer = Self::new(size, size);
        buffer.clear(background);

        let half = size as f32 * 0.5;
        let radius = size as f32 * radius_fraction;
        buffer.stamp_disc(Vec2::splat(half), radius, color);

        debug!(
            "PixelBuffer::with_disc: {}x{} radius={:.1}px color={:?}",
            size, size, radius, color
        );
        buffer
    }

    /// Clear the buffer to a solid color
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get a pixel; None if out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    /// Set a pixel; out-of-bounds writes are dropped
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color;
        }
    }

    /// Set every pixel whose center lies within `radius` of `center`
    ///
    /// Returns the bounding box of the touched rows and columns, or None when
    /// nothing on the canvas was written.
    pub fn stamp_disc(&mut self, center: Vec2, radius: f32, color: Rgba) -> Option<PixelRect> {
        if !radius.is_finite() || radius < 0.0 {
            return None;
        }
        let xs = pixel_span(center.x - radius, center.x + radius, self.width)?;
        let ys = pixel_span(center.y - radius, center.y + radius, self.height)?;

        let radius_sq = radius * radius;
        let mut wrote = false;
        for py in ys.clone() {
            let dy = (py as f32 + 0.5) - center.y;
            for px in xs.clone() {
                let dx = (px as f32 + 0.5) - center.x;
                if dx * dx + dy * dy <= radius_sq {
                    self.set_pixel(px, py, color);
                    wrote = true;
                }
            }
        }

        wrote.then(|| span_rect(&xs, &ys))
    }

    /// Set every pixel whose center lies in the axis-aligned square
    /// `[center - half_size, center + half_size]`
    ///
    /// The square is clipped to the buffer before iterating, so a stamp
    /// hanging off any edge only writes the visible part.
    pub fn stamp_quad(&mut self, center: Vec2, half_size: f32, color: Rgba) -> Option<PixelRect> {
        if !half_size.is_finite() || half_size < 0.0 {
            return None;
        }
        let xs = pixel_span(center.x - half_size, center.x + half_size, self.width)?;
        let ys = pixel_span(center.y - half_size, center.y + half_size, self.height)?;

        let width = self.width as usize;
        for py in ys.clone() {
            let row = py as usize * width;
            self.pixels[row + xs.start as usize..row + xs.end as usize].fill(color);
        }

        Some(span_rect(&xs, &ys))
    }

    /// Raw pixel data for texture upload (`width * height * 4` bytes)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Owned copy of the pixel data for a display sink
    pub fn snapshot(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Get direct access to pixel data
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// The full buffer as a rectangle
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }
}

/// Indices of the pixels whose centers fall in `[min, max]`, clipped to `0..limit`
fn pixel_span(min: f32, max: f32, limit: u32) -> Option<Range<u32>> {
    if limit == 0 || !min.is_finite() || !max.is_finite() {
        return None;
    }
    let first = (min - 0.5).ceil().max(0.0);
    let last = (max - 0.5).floor().min(limit as f32 - 1.0);
    if first > last {
        return None;
    }
    Some(first as u32..last as u32 + 1)
}

fn span_rect(xs: &Range<u32>, ys: &Range<u32>) -> PixelRect {
    PixelRect::new(xs.start, ys.start, xs.end - xs.start, ys.end - ys.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [255, 0, 0, 255];
    const WHITE: Rgba = [255, 255, 255, 255];
    const BROWN: Rgba = [102, 51, 26, 255];

    #[test]
    fn test_new_buffer() {
        let buffer = PixelBuffer::new(100, 100);
        assert_eq!(buffer.width, 100);
        assert_eq!(buffer.height, 100);
        assert_eq!(buffer.pixel_count(), 10000);
        assert_eq!(buffer.get_pixel(0, 0), Some(CLEAR_COLOR));
    }

    #[test]
    fn test_get_set_pixel() {
        let mut buffer = PixelBuffer::new(10, 10);
        buffer.set_pixel(5, 5, RED);
        assert_eq!(buffer.get_pixel(5, 5), Some(RED));

        // Out of bounds reads and writes are ignored
        buffer.set_pixel(10, 0, RED);
        assert_eq!(buffer.get_pixel(10, 0), None);
        assert_eq!(buffer.pixel_count(), 100);
    }

    #[test]
    fn test_clear() {
        let mut buffer = PixelBuffer::new(10, 10);
        buffer.clear(WHITE);
        assert!(buffer.pixels().iter().all(|p| *p == WHITE));
    }

    #[test]
    fn test_stamp_disc_only_touches_inside() {
        let mut buffer = PixelBuffer::new(64, 64);
        let region = buffer.stamp_disc(Vec2::new(32.0, 32.0), 10.0, RED).unwrap();

        for y in 0..64 {
            for x in 0..64 {
                let dx = x as f32 + 0.5 - 32.0;
                let dy = y as f32 + 0.5 - 32.0;
                let inside = dx * dx + dy * dy <= 100.0;
                let expected = if inside { RED } else { CLEAR_COLOR };
                assert_eq!(buffer.get_pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
        assert_eq!(region, PixelRect::new(22, 22, 20, 20));
    }

    #[test]
    fn test_stamp_disc_off_canvas() {
        let mut buffer = PixelBuffer::new(16, 16);
        assert_eq!(buffer.stamp_disc(Vec2::new(-50.0, -50.0), 5.0, RED), None);
        assert_eq!(buffer.stamp_disc(Vec2::new(8.0, 8.0), -1.0, RED), None);
        assert!(buffer.pixels().iter().all(|p| *p == CLEAR_COLOR));

        // Partially visible disc is clipped
        let region = buffer.stamp_disc(Vec2::new(0.0, 0.0), 4.0, RED).unwrap();
        assert_eq!(region.x, 0);
        assert_eq!(region.y, 0);
        assert_eq!(buffer.get_pixel(0, 0), Some(RED));
    }

    #[test]
    fn test_with_disc_synthesis() {
        let buffer = PixelBuffer::with_disc(256, 0.4, BROWN, CLEAR_COLOR);
        assert_eq!(buffer.pixel_count(), 256 * 256);
        // Center is painted, corners are clear
        assert_eq!(buffer.get_pixel(128, 128), Some(BROWN));
        assert_eq!(buffer.get_pixel(0, 0), Some(CLEAR_COLOR));
        assert_eq!(buffer.get_pixel(255, 255), Some(CLEAR_COLOR));
        // Radius is 102.4: column 128 + 101 is inside, 128 + 103 is not
        assert_eq!(buffer.get_pixel(229, 128), Some(BROWN));
        assert_eq!(buffer.get_pixel(231, 128), Some(CLEAR_COLOR));
    }

    #[test]
    fn test_stamp_quad_extent() {
        let mut buffer = PixelBuffer::new(256, 256);
        let region = buffer.stamp_quad(Vec2::new(128.0, 128.0), 10.0, WHITE).unwrap();
        assert_eq!(region, PixelRect::new(118, 118, 20, 20));
        assert_eq!(buffer.get_pixel(118, 118), Some(WHITE));
        assert_eq!(buffer.get_pixel(137, 137), Some(WHITE));
        assert_eq!(buffer.get_pixel(117, 128), Some(CLEAR_COLOR));
        assert_eq!(buffer.get_pixel(138, 128), Some(CLEAR_COLOR));
    }

    #[test]
    fn test_stamp_quad_is_idempotent() {
        let mut once = PixelBuffer::with_disc(64, 0.4, BROWN, CLEAR_COLOR);
        once.stamp_quad(Vec2::new(30.3, 33.7), 4.5, WHITE);

        let mut twice = PixelBuffer::with_disc(64, 0.4, BROWN, CLEAR_COLOR);
        twice.stamp_quad(Vec2::new(30.3, 33.7), 4.5, WHITE);
        twice.stamp_quad(Vec2::new(30.3, 33.7), 4.5, WHITE);

        assert_eq!(once.as_bytes(), twice.as_bytes());
    }

    #[test]
    fn test_stamp_quad_bounds_safety() {
        let mut buffer = PixelBuffer::new(16, 16);

        // Centered on each corner with a half-size larger than the canvas
        for center in [
            Vec2::new(0.0, 0.0),
            Vec2::new(15.0, 15.0),
            Vec2::new(16.0, 0.0),
            Vec2::new(0.0, 16.0),
        ] {
            buffer.stamp_quad(center, 40.0, RED);
        }
        assert_eq!(buffer.pixel_count(), 256);
        assert!(buffer.pixels().iter().all(|p| *p == RED));

        // Entirely off canvas and degenerate inputs write nothing
        let mut buffer = PixelBuffer::new(16, 16);
        assert_eq!(buffer.stamp_quad(Vec2::new(100.0, 100.0), 5.0, RED), None);
        assert_eq!(buffer.stamp_quad(Vec2::new(-20.0, 8.0), 5.0, RED), None);
        assert_eq!(buffer.stamp_quad(Vec2::new(f32::NAN, 8.0), 5.0, RED), None);
        assert_eq!(buffer.stamp_quad(Vec2::new(8.0, 8.0), f32::INFINITY, RED), None);
        assert!(buffer.pixels().iter().all(|p| *p == CLEAR_COLOR));
    }

    #[test]
    fn test_stamp_quad_on_far_edge() {
        let mut buffer = PixelBuffer::new(256, 256);
        let region = buffer.stamp_quad(Vec2::new(255.0, 255.0), 10.0, WHITE).unwrap();
        assert_eq!(region, PixelRect::new(245, 245, 11, 11));
        assert_eq!(buffer.get_pixel(255, 255), Some(WHITE));
    }

    #[test]
    fn test_snapshot_layout() {
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.set_pixel(1, 0, [1, 2, 3, 4]);
        let bytes = buffer.snapshot();
        assert_eq!(bytes.len(), 2 * 2 * 4);
        assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);
    }
}
