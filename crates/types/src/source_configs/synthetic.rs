//! Synthetic source configuration types.

use serde::{Deserialize, Serialize};

/// Shape of a synthetic signal over one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Constant,
    #[default]
    Sine,
    /// Rises from min to max, then drops back
    Sawtooth,
    Triangle,
    /// Max for the first half period, min for the second
    Square,
}

fn default_constant_value() -> f64 {
    50.0
}

fn default_max_value() -> f64 {
    100.0
}

fn default_period() -> f64 {
    5.0
}

/// Synthetic source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSourceConfig {
    #[serde(default)]
    pub waveform: Waveform,
    /// Value used in Constant mode
    #[serde(default = "default_constant_value")]
    pub constant_value: f64,
    #[serde(default)]
    pub min_value: f64,
    #[serde(default = "default_max_value")]
    pub max_value: f64,
    /// Wave period in seconds
    #[serde(default = "default_period")]
    pub period: f64,
    /// Phase offset as a fraction of the period
    #[serde(default)]
    pub phase: f64,
    /// Keep this many polled samples for history queries
    #[serde(default)]
    pub history: Option<usize>,
}

impl Default for SyntheticSourceConfig {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            constant_value: default_constant_value(),
            min_value: 0.0,
            max_value: default_max_value(),
            period: default_period(),
            phase: 0.0,
            history: None,
        }
    }
}
