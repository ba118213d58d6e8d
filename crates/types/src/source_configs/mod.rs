//! Source configuration types for all data sources.

pub mod attitude;
pub mod clock;
pub mod synthetic;

use serde::{Deserialize, Serialize};

pub use attitude::AttitudeSourceConfig;
pub use clock::WallClockSourceConfig;
pub use synthetic::{SyntheticSourceConfig, Waveform};

/// Typed configuration for any built-in source, tagged by `source_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source_type", rename_all = "snake_case")]
pub enum SourceConfig {
    WallClock(WallClockSourceConfig),
    Synthetic(SyntheticSourceConfig),
    Attitude(AttitudeSourceConfig),
}

impl SourceConfig {
    /// Source type identifier, matching the serde tag
    pub fn source_type(&self) -> &'static str {
        match self {
            SourceConfig::WallClock(_) => "wall_clock",
            SourceConfig::Synthetic(_) => "synthetic",
            SourceConfig::Attitude(_) => "attitude",
        }
    }
}
