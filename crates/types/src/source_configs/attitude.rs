//! Attitude simulator configuration types.

use serde::{Deserialize, Serialize};

fn default_time_scale() -> f64 {
    1.0
}

/// Attitude simulator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttitudeSourceConfig {
    /// Playback speed of the 60 second pitch/roll profile
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
}

impl Default for AttitudeSourceConfig {
    fn default() -> Self {
        Self {
            time_scale: default_time_scale(),
        }
    }
}
