//! Paint engine
//!
//! This module connects the pieces of the paint core:
//! - Surface transform (pulled from the host each tick)
//! - Hit tester (world-space collider circle)
//! - Coordinate mapper (world to texture space)
//! - Pixel buffer (disc synthesis and dot stamps)
//! - Dirty tracking and display flush
//!
//! The engine is designed to be driven from a host's update loop but does
//! not depend on any host engine itself.

mod display;
mod overlay;
mod pointer;

use latte_config::{CLEAR_COLOR, CanvasConfig, ConfigError, LatteConfig};
use thiserror::Error;
use tracing::info;

use crate::hit_test::InteractiveRegion;
use crate::observer::{NoopObserver, PaintObserver, TracingObserver};
use crate::projection::MappingError;
use crate::surface::PixelBuffer;
use crate::transform::{SurfaceTransform, TransformProvider};
use crate::types::PixelRect;

pub use display::{DisplaySink, Frame, SinkError};
pub use overlay::DebugOverlay;
pub use pointer::{PaintOutcome, PaintState};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Surface transform has not been pulled yet")]
    NoTransform,
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Paint engine for a single disc-shaped canvas
///
/// Owns the pixel buffer for its whole lifetime:
/// 1. `new` synthesizes the disc
/// 2. The host calls `update_transform` once per tick
/// 3. Pointer-downs come in via `on_pointer_down` and may stamp a dot
/// 4. `flush` hands changed pixels to a display sink after painting
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct PaintEngine {
    /// Immutable canvas parameters
    pub(crate) canvas: CanvasConfig,
    /// Collider radius before scaling
    pub(crate) collider_radius: f32,
    /// The paintable texture
    pub(crate) buffer: PixelBuffer,
    /// Placement pulled this tick (None until the first pull)
    pub(crate) transform: Option<SurfaceTransform>,
    /// Where the last event left the state machine
    pub(crate) state: PaintState,
    /// Union of regions changed since the last flush
    pub(crate) dirty: Option<PixelRect>,
    /// Diagnostic hook
    pub(crate) observer: Box<dyn PaintObserver + Send + Sync>,
}

impl PaintEngine {
    /// Create an engine and synthesize its initial disc
    pub fn new(config: &LatteConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let canvas = config.canvas.clone();
        let buffer = Self::synthesize(&canvas);
        let observer: Box<dyn PaintObserver + Send + Sync> = if config.show_debug_logs {
            Box::new(TracingObserver)
        } else {
            Box::new(NoopObserver)
        };

        info!(
            "PaintEngine: {}x{} canvas, disc radius {:.1}px, collider radius {:.2}",
            canvas.canvas_size,
            canvas.canvas_size,
            canvas.disc_radius_px(),
            config.placement.collider_radius
        );

        let dirty = Some(buffer.bounds());
        Ok(Self {
            canvas,
            collider_radius: config.placement.collider_radius,
            buffer,
            transform: None,
            state: PaintState::Idle,
            dirty,
            observer,
        })
    }

    /// Replace the diagnostic hook
    pub fn with_observer(mut self, observer: impl PaintObserver + Send + Sync + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    fn synthesize(canvas: &CanvasConfig) -> PixelBuffer {
        PixelBuffer::with_disc(
            canvas.canvas_size,
            canvas.disc_radius_fraction,
            canvas.surface_color,
            CLEAR_COLOR,
        )
    }

    /// Pull this tick's placement from the host
    pub fn update_transform<P: TransformProvider + ?Sized>(
        &mut self,
        provider: &P,
    ) -> SurfaceTransform {
        let transform = SurfaceTransform::pull(provider);
        self.transform = Some(transform);
        transform
    }

    /// Install a placement computed elsewhere
    pub fn set_transform(&mut self, transform: SurfaceTransform) {
        self.transform = Some(transform);
    }

    pub fn transform(&self) -> Option<&SurfaceTransform> {
        self.transform.as_ref()
    }

    /// Collider circle for the current transform
    pub fn region(&self) -> Option<InteractiveRegion> {
        self.transform
            .map(|transform| transform.interactive_region(self.collider_radius))
    }

    /// Discard all paint and re-synthesize the disc
    pub fn reset(&mut self) {
        self.buffer = Self::synthesize(&self.canvas);
        self.mark_dirty(self.buffer.bounds());
    }

    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn state(&self) -> PaintState {
        self.state
    }
}
