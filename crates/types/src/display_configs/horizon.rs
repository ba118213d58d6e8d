//! Virtual horizon display configuration types

use serde::{Deserialize, Serialize};

fn default_border_width() -> f64 {
    1.0
}

fn default_needle_width() -> f64 {
    1.0
}

fn default_smoothing_rate() -> f64 {
    8.0
}

/// Virtual horizon display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonConfig {
    #[serde(default = "default_border_width")]
    pub border_width: f64,
    #[serde(default = "default_needle_width")]
    pub needle_width: f64,
    /// Exponential approach rate (1/s) of the needles toward the latest
    /// attitude sample. Zero disables smoothing.
    #[serde(default = "default_smoothing_rate")]
    pub smoothing_rate: f64,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            border_width: default_border_width(),
            needle_width: default_needle_width(),
            smoothing_rate: default_smoothing_rate(),
        }
    }
}
