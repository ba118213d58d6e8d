//! Shared constants for the gauges crates

use std::time::Duration;

/// Target frame rate used when the configuration does not set one
pub const DEFAULT_FRAME_RATE: u32 = 50;

/// Interval at which background pollers sample a probe by default
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Threshold for snapping animated values to their target.
/// When the difference between animated and target values is less than this,
/// the animation is considered complete and snaps to the target.
pub const ANIMATION_SNAP_THRESHOLD: f64 = 0.001;

/// Measured frame rate at or above which the FPS overlay is drawn as healthy
pub const FPS_GOOD_THRESHOLD: f64 = 40.0;

/// Measured frame rate at or above which the FPS overlay is drawn as a warning
pub const FPS_WARN_THRESHOLD: f64 = 25.0;
