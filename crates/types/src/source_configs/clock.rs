//! Wall-clock source configuration types.

use serde::{Deserialize, Serialize};

fn default_timezone() -> String {
    "Local".to_string()
}

/// Wall-clock source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallClockSourceConfig {
    /// Timezone ID (e.g., "America/New_York", "Europe/London", "Local")
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for WallClockSourceConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}
