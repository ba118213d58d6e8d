//! Simulated aircraft attitude (pitch and roll) for the virtual horizon

use std::time::Duration;

use gauges_core::{CapabilitySet, DataSource, Result, SharedClock, SourceMetadata};
use gauges_types::source_configs::AttitudeSourceConfig;
use gauges_types::Sample;

/// Length of the repeating attitude profile in seconds
pub const PROFILE_SECONDS: f64 = 60.0;

/// (start s, end s, start value, end value), degrees
type Segment = (f64, f64, f64, f64);

const PITCH_PROFILE: [Segment; 4] = [
    (0.0, 20.0, 0.0, -60.0),
    (20.0, 30.0, -60.0, -60.0),
    (30.0, 40.0, -60.0, -30.0),
    (40.0, 60.0, -30.0, 0.0),
];

const ROLL_PROFILE: [Segment; 4] = [
    (0.0, 10.0, 0.0, 0.0),
    (10.0, 30.0, 0.0, 60.0),
    (30.0, 50.0, 60.0, -60.0),
    (50.0, 60.0, -60.0, 0.0),
];

fn interpolate(profile: &[Segment], t: f64) -> f64 {
    profile
        .iter()
        .find(|(start, end, _, _)| *start <= t && t < *end)
        .map(|(start, end, from, to)| from + (t - start) / (end - start) * (to - from))
        .unwrap_or(0.0)
}

/// `(pitch, roll)` in degrees at `elapsed` into the looping profile
pub fn attitude_at(elapsed: Duration) -> (f64, f64) {
    let t = elapsed.as_secs_f64().rem_euclid(PROFILE_SECONDS);
    (interpolate(&PITCH_PROFILE, t), interpolate(&ROLL_PROFILE, t))
}

/// PULL source replaying the attitude profile against a clock
pub struct AttitudeSimulator {
    metadata: SourceMetadata,
    time_scale: f64,
    clock: SharedClock,
}

impl AttitudeSimulator {
    pub fn new(config: &AttitudeSourceConfig, clock: SharedClock) -> Self {
        let time_scale = if config.time_scale.is_finite() && config.time_scale > 0.0 {
            config.time_scale
        } else {
            log::warn!(
                "Invalid attitude time scale {}, using 1.0",
                config.time_scale
            );
            1.0
        };
        Self {
            metadata: SourceMetadata::new(
                "attitude",
                "Attitude",
                "Simulated pitch and roll in degrees",
            ),
            time_scale,
            clock,
        }
    }
}

impl DataSource for AttitudeSimulator {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::PULL
    }

    fn poll(&mut self) -> Result<Sample> {
        let now = self.clock.now();
        let profile_time = now.mul_f64(self.time_scale);
        Ok(Sample::new(now, attitude_at(profile_time)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauges_core::ManualClock;

    #[test]
    fn test_keyframes() {
        let at = |s: f64| attitude_at(Duration::from_secs_f64(s));
        assert_eq!(at(0.0), (0.0, 0.0));
        assert_eq!(at(10.0), (-30.0, 0.0));
        assert_eq!(at(20.0), (-60.0, 30.0));
        assert_eq!(at(30.0), (-60.0, 60.0));
        assert_eq!(at(40.0), (-30.0, 0.0));
        assert_eq!(at(50.0), (-15.0, -60.0));
        // Loops every minute
        assert_eq!(at(70.0), at(10.0));
    }

    #[test]
    fn test_time_scale() {
        let clock = ManualClock::shared();
        let mut source = AttitudeSimulator::new(
            &AttitudeSourceConfig { time_scale: 2.0 },
            clock.clone(),
        );
        clock.advance(Duration::from_secs(10));
        let sample = source.poll().unwrap();
        assert_eq!(sample.at, Duration::from_secs(10));
        assert_eq!(sample.pair(), (-60.0, 30.0));
    }
}
