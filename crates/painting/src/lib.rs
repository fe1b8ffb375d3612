//! Latte canvas paint core
//!
//! This crate provides a host-independent painting surface:
//! - [`surface`] - RGBA8 pixel buffer with disc synthesis and clipped stamps
//! - [`projection`] - World-to-texture coordinate mapping
//! - [`hit_test`] - Circular hit testing against the collider region
//! - [`transform`] - Surface placement pulled from the host each tick
//! - [`observer`] - Diagnostic hook for paint decisions
//! - [`pipeline`] - The paint engine tying it all together

pub mod constants;
pub mod observer;
pub mod pipeline;
pub mod projection;
pub mod surface;
pub mod transform;
pub mod types;

pub use constants::*;
pub use hit_test::*;
pub use observer::*;
pub use pipeline::*;
pub use projection::*;
pub use surface::*;
pub use transform::*;
pub use types::*;
