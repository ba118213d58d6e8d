//! Synthetic waveform source for demonstration and testing
//!
//! Values are a pure function of the injected clock's elapsed time, so a
//! dashboard driven by a `ManualClock` is fully reproducible.

use std::time::Duration;

use gauges_core::{CapabilitySet, DataSource, Result, SharedClock, SourceMetadata};
use gauges_types::{Sample, SyntheticSourceConfig, Waveform};

/// Synthetic data source
pub struct SyntheticSource {
    metadata: SourceMetadata,
    config: SyntheticSourceConfig,
    clock: SharedClock,
}

impl SyntheticSource {
    pub fn new(config: SyntheticSourceConfig, clock: SharedClock) -> Self {
        Self {
            metadata: SourceMetadata::new(
                "synthetic",
                "Synthetic",
                "Configurable waveform for debugging and demonstration",
            ),
            config,
            clock,
        }
    }

    /// Override the id reported in metadata (useful when several run at once)
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.id = id.into();
        self
    }

    pub fn config(&self) -> &SyntheticSourceConfig {
        &self.config
    }

    /// Calculate the value at `elapsed` based on the configured waveform
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let config = &self.config;
        let range = config.max_value - config.min_value;
        let period = if config.period > 0.0 { config.period } else { 1.0 };
        let cycles = elapsed.as_secs_f64() / period + config.phase;

        match config.waveform {
            Waveform::Constant => config.constant_value,
            Waveform::Sine => {
                let normalized = ((cycles * std::f64::consts::TAU).sin() + 1.0) / 2.0; // 0.0 to 1.0
                config.min_value + normalized * range
            }
            Waveform::Sawtooth => config.min_value + cycles.rem_euclid(1.0) * range,
            Waveform::Triangle => {
                let phase = cycles.rem_euclid(1.0) * 2.0; // 0.0 to 2.0
                let normalized = if phase <= 1.0 { phase } else { 2.0 - phase };
                config.min_value + normalized * range
            }
            Waveform::Square => {
                if cycles.rem_euclid(1.0) < 0.5 {
                    config.min_value
                } else {
                    config.max_value
                }
            }
        }
    }
}

impl DataSource for SyntheticSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::PULL
    }

    fn poll(&mut self) -> Result<Sample> {
        let now = self.clock.now();
        Ok(Sample::new(now, self.value_at(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauges_core::ManualClock;
    use std::sync::Arc;

    fn source(waveform: Waveform) -> (SyntheticSource, Arc<ManualClock>) {
        let clock = ManualClock::shared();
        let config = SyntheticSourceConfig {
            waveform,
            period: 4.0,
            ..Default::default()
        };
        (SyntheticSource::new(config, clock.clone()), clock)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_sine_wave() {
        let (mut source, clock) = source(Waveform::Sine);
        assert!(approx(source.poll().unwrap().scalar(), 50.0));

        clock.advance(Duration::from_secs(1));
        let sample = source.poll().unwrap();
        assert_eq!(sample.at, Duration::from_secs(1));
        assert!(approx(sample.scalar(), 100.0));

        clock.advance(Duration::from_secs(2));
        assert!(approx(source.poll().unwrap().scalar(), 0.0));
    }

    #[test]
    fn test_other_waveforms() {
        let (sawtooth, _) = source(Waveform::Sawtooth);
        assert!(approx(sawtooth.value_at(Duration::from_secs(1)), 25.0));
        assert!(approx(sawtooth.value_at(Duration::from_secs(5)), 25.0));

        let (triangle, _) = source(Waveform::Triangle);
        assert!(approx(triangle.value_at(Duration::from_secs(2)), 100.0));
        assert!(approx(triangle.value_at(Duration::from_secs(3)), 50.0));

        let (square, _) = source(Waveform::Square);
        assert_eq!(square.value_at(Duration::from_secs(1)), 0.0);
        assert_eq!(square.value_at(Duration::from_secs(3)), 100.0);

        let (constant, _) = source(Waveform::Constant);
        assert_eq!(constant.value_at(Duration::from_secs(7)), 50.0);
    }

    #[test]
    fn test_pull_only() {
        let (source, _) = source(Waveform::Sine);
        assert_eq!(source.capabilities(), CapabilitySet::PULL);
        assert!(source.history(std::num::NonZeroUsize::new(3).unwrap()).is_err());
    }
}
