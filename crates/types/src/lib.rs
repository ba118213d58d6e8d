//! gauges-types: Shared data types for the gauges dashboard toolkit.
//!
//! This crate contains pure data types (colors, samples, geometry, themes,
//! input events and serde configuration types) that are shared across all
//! gauges crates. Nothing here draws or schedules anything.

pub mod color;
pub mod display_configs;
pub mod event;
pub mod geometry;
pub mod sample;
pub mod source_configs;
pub mod theme;

// Re-export commonly used types at the crate root for convenience
pub use color::Color;
pub use display_configs::{ClockConfig, DisplayConfig, DisplayKind, HorizonConfig, LineChartConfig};
pub use event::{EventKind, InputEvent, Key, PointerButton};
pub use geometry::{Point, Rect, Size};
pub use sample::{Sample, SampleValue};
pub use source_configs::{
    AttitudeSourceConfig, SourceConfig, SyntheticSourceConfig, WallClockSourceConfig, Waveform,
};
pub use theme::{roles, Theme};
