//! gauges-core: Core traits and frame engine primitives for the gauges
//! dashboard toolkit.
//!
//! This crate contains the data source capability contract, the bounded
//! queues and history buffers sources hand samples through, the drawing
//! surface abstraction, theme resolution and the layered `Display` model.

pub mod capability;
pub mod constants;
mod data_source;
pub mod display;
mod error;
mod history;
pub mod layer;
mod queue;
pub mod surface;
mod theme;
pub mod time;

pub use capability::{Capability, CapabilitySet, Requirement};
pub use constants::{
    ANIMATION_SNAP_THRESHOLD, DEFAULT_FRAME_RATE, DEFAULT_POLL_INTERVAL, FPS_GOOD_THRESHOLD,
    FPS_WARN_THRESHOLD,
};
pub use data_source::{BoxedDataSource, DataSource, SourceMetadata};
pub use display::{Display, DisplayId, Readings, RoleSpec, Simulator};
pub use error::{GaugeError, Result};
pub use history::HistoryBuffer;
pub use layer::{Backdrop, BackdropShape, EventResponse, Layer, LayerContext};
pub use queue::SampleQueue;
pub use surface::{
    Canvas, DrawList, DrawOp, Shape, Stroke, Surface, SurfaceBackend, WindowSpec,
};
pub use theme::{Palette, ThemeResolver, DEFAULT_THEME};
pub use time::{Clock, ManualClock, SharedClock, SystemClock};

// Re-export types used in trait signatures for convenience
pub use gauges_types::{Color, InputEvent, Point, Rect, Sample, SampleValue, Size, Theme};
