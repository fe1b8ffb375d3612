//! Dirty tracking and hand-off to the display

use thiserror::Error;
use tracing::debug;

use crate::types::PixelRect;

use super::PaintEngine;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Frame is {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("Display backend failed: {0}")]
    Backend(String),
}

/// Read-only view of the buffer handed to a display sink
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub width: u32,
    pub height: u32,
    /// Full buffer, `width * height * 4` RGBA bytes
    pub bytes: &'a [u8],
    /// Region changed since the previous flush
    pub dirty: PixelRect,
}

/// Something that presents the canvas (texture upload, image file, window)
pub trait DisplaySink {
    fn present(&mut self, frame: Frame<'_>) -> Result<(), SinkError>;
}

impl PaintEngine {
    /// Mark a region as modified
    pub(crate) fn mark_dirty(&mut self, region: PixelRect) {
        let merged = match self.dirty {
            Some(dirty) => dirty.union(&region),
            None => region,
        };
        self.dirty = Some(merged);
    }

    /// Check if anything changed since the last flush
    #[inline]
    pub fn has_dirty(&self) -> bool {
        self.dirty.is_some()
    }

    /// Get the changed region and clear it
    pub fn take_dirty(&mut self) -> Option<PixelRect> {
        self.dirty.take()
    }

    /// Present the buffer if anything changed
    ///
    /// Returns whether a frame was presented. The dirty region is only
    /// cleared once the sink accepts the frame.
    pub fn flush<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) -> Result<bool, SinkError> {
        let Some(dirty) = self.dirty else {
            return Ok(false);
        };

        let frame = Frame {
            width: self.buffer.width,
            height: self.buffer.height,
            bytes: self.buffer.as_bytes(),
            dirty,
        };
        sink.present(frame)?;

        debug!(
            "flush: presented dirty region ({}, {}) {}x{}",
            dirty.x, dirty.y, dirty.width, dirty.height
        );
        self.dirty = None;
        Ok(true)
    }

    /// Owned copy of the buffer (`width * height * 4` RGBA bytes)
    pub fn snapshot(&self) -> Vec<u8> {
        self.buffer.snapshot()
    }
}
