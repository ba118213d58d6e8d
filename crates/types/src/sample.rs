//! Samples produced by data sources

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Value carried by a sample: a scalar or a small tuple (e.g. pitch and roll)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SampleValue {
    Scalar(f64),
    Pair(f64, f64),
}

impl SampleValue {
    /// The scalar, or the first component of a pair
    pub fn scalar(&self) -> f64 {
        match *self {
            SampleValue::Scalar(v) => v,
            SampleValue::Pair(a, _) => a,
        }
    }

    /// Both components; a scalar is widened to `(v, 0.0)`
    pub fn pair(&self) -> (f64, f64) {
        match *self {
            SampleValue::Scalar(v) => (v, 0.0),
            SampleValue::Pair(a, b) => (a, b),
        }
    }
}

impl From<f64> for SampleValue {
    fn from(v: f64) -> Self {
        SampleValue::Scalar(v)
    }
}

impl From<(f64, f64)> for SampleValue {
    fn from((a, b): (f64, f64)) -> Self {
        SampleValue::Pair(a, b)
    }
}

/// One timestamped value. Immutable once produced.
///
/// `at` is monotonic time since the origin of the clock that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub at: Duration,
    pub value: SampleValue,
}

impl Sample {
    pub fn new(at: Duration, value: impl Into<SampleValue>) -> Self {
        Self {
            at,
            value: value.into(),
        }
    }

    pub fn scalar(&self) -> f64 {
        self.value.scalar()
    }

    pub fn pair(&self) -> (f64, f64) {
        self.value.pair()
    }
}
