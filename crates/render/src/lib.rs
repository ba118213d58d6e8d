//! gauges-render: Drawing surface backends for the gauges dashboard toolkit.
//!
//! `CairoSurface` rasterizes into an off-screen image (optionally writing PNG
//! snapshots); `RecordingSurface` records every draw call for headless runs
//! and tests.

mod cairo_surface;
mod recording;

pub use cairo_surface::{CairoBackend, CairoSurface};
pub use gauges_core::DrawOp;
pub use recording::{Frame, Recording, RecordingBackend, RecordingSurface};
