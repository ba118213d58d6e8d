//! Analog clock display configuration types

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_border_width() -> f64 {
    3.0
}

fn default_tick_inset() -> f64 {
    20.0
}

fn default_hour_hand_length() -> f64 {
    0.8
}

/// Analog clock display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "default_border_width")]
    pub border_width: f64,
    /// Distance of the tick dots from the rim, in pixels
    #[serde(default = "default_tick_inset")]
    pub tick_inset: f64,
    /// Hour hand length as a fraction of the radius
    #[serde(default = "default_hour_hand_length")]
    pub hour_hand_length: f64,
    #[serde(default = "default_true")]
    pub show_second_hand: bool,
    /// Starting time of day (seconds since midnight) for the simulated
    /// clock used when no time source is bound. `None` starts at local now.
    #[serde(default)]
    pub simulated_start: Option<f64>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            border_width: default_border_width(),
            tick_inset: default_tick_inset(),
            hour_hand_length: default_hour_hand_length(),
            show_second_hand: true,
            simulated_start: None,
        }
    }
}
