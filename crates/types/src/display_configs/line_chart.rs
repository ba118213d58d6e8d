//! Line chart display configuration types

use serde::{Deserialize, Serialize};

fn default_series() -> usize {
    8
}

fn default_max_samples() -> usize {
    300
}

fn default_y_min() -> f64 {
    -20.0
}

fn default_y_max() -> f64 {
    20.0
}

fn default_border_width() -> f64 {
    1.0
}

/// Line chart display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartConfig {
    /// Number of series (roles `series0`, `series1`, ...)
    #[serde(default = "default_series")]
    pub series: usize,
    /// Visible history window per series
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
    #[serde(default = "default_y_min")]
    pub y_min: f64,
    #[serde(default = "default_y_max")]
    pub y_max: f64,
    #[serde(default = "default_border_width")]
    pub border_width: f64,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            series: default_series(),
            max_samples: default_max_samples(),
            y_min: default_y_min(),
            y_max: default_y_max(),
            border_width: default_border_width(),
        }
    }
}
