//! Data sources built from configuration

use std::num::NonZeroUsize;

use gauges_core::{BoxedDataSource, DataSource, GaugeError, Result, SharedClock};
use gauges_sources::{AttitudeSimulator, Recorded, SyntheticSource, WallClockSource};
use gauges_types::SourceConfig;

/// Create the source described by `config`, reading time from `clock`
pub fn build_source(config: &SourceConfig, clock: SharedClock) -> Result<BoxedDataSource> {
    let source: BoxedDataSource = match config {
        SourceConfig::WallClock(config) => Box::new(WallClockSource::new(config, clock)),
        SourceConfig::Attitude(config) => Box::new(AttitudeSimulator::new(config, clock)),
        SourceConfig::Synthetic(config) => {
            let synthetic = SyntheticSource::new(config.clone(), clock);
            match config.history {
                None => Box::new(synthetic),
                Some(capacity) => {
                    let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
                        GaugeError::invalid_config("synthetic history must hold at least 1 sample")
                    })?;
                    Box::new(Recorded::new(synthetic, capacity))
                }
            }
        }
    };
    log::debug!(
        "Built {} source '{}' ({})",
        config.source_type(),
        source.metadata().id,
        source.capabilities()
    );
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauges_core::{Capability, ManualClock};
    use gauges_types::{AttitudeSourceConfig, SyntheticSourceConfig, WallClockSourceConfig};

    #[test]
    fn test_capabilities_per_config() {
        let clock = ManualClock::shared();
        let wall = build_source(
            &SourceConfig::WallClock(WallClockSourceConfig::default()),
            clock.clone(),
        )
        .unwrap();
        assert!(wall.capabilities().contains(Capability::Pull));
        assert!(!wall.capabilities().contains(Capability::Historical));

        let attitude = build_source(
            &SourceConfig::Attitude(AttitudeSourceConfig::default()),
            clock.clone(),
        )
        .unwrap();
        assert!(attitude.capabilities().is_live());

        let recorded = build_source(
            &SourceConfig::Synthetic(SyntheticSourceConfig {
                history: Some(10),
                ..Default::default()
            }),
            clock,
        )
        .unwrap();
        assert!(recorded.capabilities().contains(Capability::Historical));
        assert!(recorded.capabilities().contains(Capability::Pull));
    }

    #[test]
    fn test_zero_history_is_invalid() {
        let result = build_source(
            &SourceConfig::Synthetic(SyntheticSourceConfig {
                history: Some(0),
                ..Default::default()
            }),
            ManualClock::shared(),
        );
        assert!(matches!(result, Err(GaugeError::InvalidConfig { .. })));
    }
}
