//! gauges: A real-time dashboard toolkit
//!
//! This library ties the workspace crates into a runnable dashboard:
//! - The application loop with frame pacing, input routing and statistics
//! - Configuration loading and the default dashboard layout
//! - Construction of configured displays and the sources bound to them

pub mod config;
pub mod core;
pub mod displayers;
pub mod sources;

// Re-export commonly used types
pub use crate::core::{AppHandle, AppOptions, AppState, Application};
pub use config::AppConfig;
pub use gauges_core::{Display, DisplayId, GaugeError, Theme, ThemeResolver};
