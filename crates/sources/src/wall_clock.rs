//! Wall-clock source: time of day in a configured timezone

use chrono::{Local, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use gauges_core::{CapabilitySet, DataSource, Result, SharedClock, SourceMetadata};
use gauges_types::{Sample, WallClockSourceConfig};

/// Seconds since midnight, including the fractional part
pub fn seconds_since_midnight(time: NaiveTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) + f64::from(time.nanosecond() % 1_000_000_000) / 1e9
}

#[derive(Debug, Clone, Copy)]
enum Zone {
    Local,
    Named(Tz),
}

/// PULL source reporting the current time of day as seconds since midnight.
///
/// Sample timestamps come from the injected monotonic clock; the value comes
/// from the system's real-time clock.
pub struct WallClockSource {
    metadata: SourceMetadata,
    zone: Zone,
    clock: SharedClock,
}

impl WallClockSource {
    pub fn new(config: &WallClockSourceConfig, clock: SharedClock) -> Self {
        let zone = if config.timezone == "Local" {
            Zone::Local
        } else if let Ok(tz) = config.timezone.parse::<Tz>() {
            Zone::Named(tz)
        } else {
            // Fallback to local time if timezone parsing fails
            log::warn!(
                "Unknown timezone '{}', falling back to local time",
                config.timezone
            );
            Zone::Local
        };
        Self {
            metadata: SourceMetadata::new("wall_clock", "Clock", "Current time of day"),
            zone,
            clock,
        }
    }

    /// Timezone name in use
    pub fn timezone(&self) -> String {
        match self.zone {
            Zone::Local => "Local".to_string(),
            Zone::Named(tz) => tz.name().to_string(),
        }
    }

    fn time_of_day(&self) -> NaiveTime {
        match self.zone {
            Zone::Local => Local::now().time(),
            Zone::Named(tz) => Utc::now().with_timezone(&tz).time(),
        }
    }
}

impl DataSource for WallClockSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::PULL
    }

    fn poll(&mut self) -> Result<Sample> {
        Ok(Sample::new(
            self.clock.now(),
            seconds_since_midnight(self.time_of_day()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauges_core::SystemClock;

    #[test]
    fn test_seconds_since_midnight() {
        let time = NaiveTime::from_hms_milli_opt(3, 15, 30, 500).unwrap();
        assert_eq!(seconds_since_midnight(time), 3.0 * 3600.0 + 15.0 * 60.0 + 30.5);
    }

    #[test]
    fn test_timezone_parsing() {
        let clock = SystemClock::shared();
        let config = WallClockSourceConfig {
            timezone: "Europe/London".to_string(),
        };
        assert_eq!(
            WallClockSource::new(&config, clock.clone()).timezone(),
            "Europe/London"
        );

        let bogus = WallClockSourceConfig {
            timezone: "Mars/Olympus".to_string(),
        };
        let mut source = WallClockSource::new(&bogus, clock);
        assert_eq!(source.timezone(), "Local");

        let value = source.poll().unwrap().scalar();
        assert!((0.0..86_400.0).contains(&value));
    }
}
