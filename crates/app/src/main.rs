//! Latte - headless host for the latte canvas paint core
//!
//! Builds the paint engine from configuration, replays a pointer-event
//! script one tick per event, and writes the painted surface to a PNG.

mod config;
mod script;
mod sink;

use anyhow::{Context, Result};
use glam::Vec2;
use latte_painting::{DisplaySink, PaintEngine, PaintOutcome, PlacementTransform};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use script::ReplayEvent;
use sink::PngSink;

/// Tallies of what the replay did
#[derive(Debug, Default, PartialEq)]
struct ReplaySummary {
    painted: usize,
    missed: usize,
    outside_disc: usize,
    clipped: usize,
    failed: usize,
}

impl ReplaySummary {
    fn record(&mut self, outcome: &PaintOutcome) {
        match outcome {
            PaintOutcome::Painted { .. } => self.painted += 1,
            PaintOutcome::Missed => self.missed += 1,
            PaintOutcome::OutsideDisc { .. } => self.outside_disc += 1,
            PaintOutcome::Clipped { .. } => self.clipped += 1,
            PaintOutcome::MappingFailed(_) => self.failed += 1,
        }
    }
}

/// Run every event as one tick: apply host-side changes, pull the transform,
/// handle input, flush
fn replay<S: DisplaySink + ?Sized>(
    engine: &mut PaintEngine,
    provider: &mut PlacementTransform,
    events: &[ReplayEvent],
    sink: &mut S,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for event in events {
        match event {
            ReplayEvent::MoveSurface { offset, scale } => {
                if let Some(offset) = offset {
                    provider.set_offset(*offset);
                }
                if let Some(scale) = scale {
                    provider.set_scale(*scale);
                }
            }
            ReplayEvent::Reset => engine.reset(),
            ReplayEvent::PointerDown { .. } => {}
        }

        engine.update_transform(&*provider);

        if let Some(point) = event.world_point() {
            summary.record(&engine.on_pointer_down(point));
        }

        engine.flush(sink).context("presenting frame")?;
    }

    // Present the bare disc even for an empty script
    engine.flush(sink).context("presenting frame")?;
    Ok(summary)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let app = AppConfig::from_env();
    let config = app.load_latte_config()?;
    info!(
        "Starting latte canvas: {}px canvas, scale {:.2}, output {}",
        config.canvas.canvas_size,
        config.placement.scale,
        app.output.display()
    );

    let mut engine = PaintEngine::new(&config).context("creating paint engine")?;

    // The cup sits at the world origin; the surface hangs off it by its offset
    let mut provider = PlacementTransform::new(
        Vec2::ZERO,
        config.placement.clone(),
        config.canvas.canvas_size,
    );
    engine.update_transform(&provider);
    if config.show_debug_logs
        && let Err(err) = engine.coordinate_report()
    {
        warn!("coordinate check failed: {err}");
    }

    let events = match &app.script_path {
        Some(path) => script::load(path)?,
        None => script::demo(provider.center()),
    };

    let mut sink = PngSink::new(app.output.clone());
    let summary = replay(&mut engine, &mut provider, &events, &mut sink)?;
    sink.save()?;

    info!(
        "Replayed {} events: {} painted, {} missed, {} outside disc, {} clipped, {} failed; {} frames -> {}",
        events.len(),
        summary.painted,
        summary.missed,
        summary.outside_disc,
        summary.clipped,
        summary.failed,
        sink.frames(),
        sink.path().display()
    );
    Ok(())
}
