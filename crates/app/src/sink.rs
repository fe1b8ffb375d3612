//! PNG display sink
//!
//! Keeps a CPU copy of the presented frame, patched with each dirty region,
//! and writes it out on request.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbaImage;
use latte_painting::{BYTES_PER_PIXEL, DisplaySink, Frame, SinkError};
use tracing::debug;

pub struct PngSink {
    path: PathBuf,
    width: u32,
    height: u32,
    bytes: Vec<u8>,
    frames: usize,
}

impl PngSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            width: 0,
            height: 0,
            bytes: Vec::new(),
            frames: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of frames presented so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// The last presented image
    pub fn image(&self) -> Option<RgbaImage> {
        if self.bytes.is_empty() {
            return None;
        }
        RgbaImage::from_raw(self.width, self.height, self.bytes.clone())
    }

    /// Write the last presented frame to disk
    pub fn save(&self) -> Result<()> {
        let image = self
            .image()
            .context("nothing has been presented to the PNG sink")?;
        image
            .save(&self.path)
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

impl DisplaySink for PngSink {
    fn present(&mut self, frame: Frame<'_>) -> Result<(), SinkError> {
        let expected = frame.width as usize * frame.height as usize * BYTES_PER_PIXEL;
        if frame.bytes.len() != expected {
            return Err(SinkError::SizeMismatch {
                expected,
                actual: frame.bytes.len(),
            });
        }

        // First frame or resize: take everything
        if frame.width != self.width || frame.height != self.height {
            self.width = frame.width;
            self.height = frame.height;
            self.bytes = frame.bytes.to_vec();
        } else {
            let dirty = frame.dirty;
            let x_end = dirty.x_end().min(frame.width) as usize;
            let y_end = dirty.y_end().min(frame.height) as usize;
            let row_bytes = frame.width as usize * BYTES_PER_PIXEL;
            for y in dirty.y as usize..y_end {
                let start = y * row_bytes + dirty.x as usize * BYTES_PER_PIXEL;
                let end = y * row_bytes + x_end * BYTES_PER_PIXEL;
                if start < end {
                    self.bytes[start..end].copy_from_slice(&frame.bytes[start..end]);
                }
            }
        }

        self.frames += 1;
        debug!(
            "PngSink: frame {} dirty ({}, {}) {}x{}",
            self.frames, frame.dirty.x, frame.dirty.y, frame.dirty.width, frame.dirty.height
        );
        Ok(())
    }
}
