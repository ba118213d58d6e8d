//! Adds a bounded in-memory history to any PULL source

use std::num::NonZeroUsize;

use gauges_core::{
    Capability, CapabilitySet, DataSource, HistoryBuffer, Result, SampleQueue, SourceMetadata,
};
use gauges_types::Sample;

/// Wrapper recording every polled sample of `S`.
///
/// Reports the inner capabilities plus HISTORICAL when `S` can be pulled.
/// A source without PULL is passed through unchanged, including its own
/// history if it keeps one.
pub struct Recorded<S> {
    inner: S,
    history: HistoryBuffer,
}

impl<S: DataSource> Recorded<S> {
    pub fn new(inner: S, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            history: HistoryBuffer::new(capacity),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: DataSource> DataSource for Recorded<S> {
    fn metadata(&self) -> &SourceMetadata {
        self.inner.metadata()
    }

    fn capabilities(&self) -> CapabilitySet {
        let caps = self.inner.capabilities();
        if caps.contains(Capability::Pull) {
            caps.with(Capability::Historical)
        } else {
            caps
        }
    }

    fn poll(&mut self) -> Result<Sample> {
        let sample = self.inner.poll()?;
        self.history.push(sample);
        Ok(sample)
    }

    fn subscribe(&mut self, sink: SampleQueue) -> Result<()> {
        self.inner.subscribe(sink)
    }

    fn history(&self, n: NonZeroUsize) -> Result<Vec<Sample>> {
        if self.inner.capabilities().contains(Capability::Pull) {
            Ok(self.history.last_n(n))
        } else {
            self.inner.history(n)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChannelSource, SyntheticSource};
    use gauges_core::{
        Display, GaugeError, ManualClock, Rect, Requirement, RoleSpec, SampleValue,
    };
    use gauges_types::{SyntheticSourceConfig, Waveform};
    use std::time::Duration;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_history_bounded_oldest_first_and_stable() {
        let clock = ManualClock::shared();
        let config = SyntheticSourceConfig {
            waveform: Waveform::Sawtooth,
            period: 100.0,
            ..Default::default()
        };
        let mut source = Recorded::new(SyntheticSource::new(config, clock.clone()), nz(5));
        assert!(source.capabilities().contains(Capability::Historical));
        assert!(source.capabilities().contains(Capability::Pull));
        assert!(source.history(nz(3)).unwrap().is_empty());

        for _ in 0..8 {
            clock.advance(Duration::from_secs(1));
            source.poll().unwrap();
        }

        let first = source.history(nz(3)).unwrap();
        let times: Vec<u64> = first.iter().map(|s| s.at.as_secs()).collect();
        assert_eq!(times, vec![6, 7, 8]);
        assert_eq!(source.history(nz(3)).unwrap(), first);

        // Capacity bounds what a larger query can return
        assert_eq!(source.history(nz(50)).unwrap().len(), 5);
    }

    #[test]
    fn test_push_only_source_gains_no_history() {
        let (channel, producer) = ChannelSource::new("push");
        let recorded = Recorded::new(channel, nz(8));
        assert_eq!(recorded.capabilities(), CapabilitySet::PUSH);
        assert!(matches!(
            recorded.history(nz(4)),
            Err(GaugeError::UnsupportedCapability { .. })
        ));

        let mut display = Display::new("chart", Rect::new(0.0, 0.0, 100.0, 50.0)).with_role(
            RoleSpec::new(
                "series0",
                Requirement::Historical { window: nz(8) },
                |_: Duration| SampleValue::Scalar(0.0),
            ),
        );
        let err = display.bind("series0", Box::new(recorded)).unwrap_err();
        assert!(matches!(err, GaugeError::IncompatibleSource { .. }));
        assert_eq!(producer.subscribers(), 0);
    }

    #[test]
    fn test_push_source_keeps_its_own_history() {
        let (channel, producer) = ChannelSource::with_history("push", nz(4));
        let recorded = Recorded::new(channel, nz(8));
        for i in 0..3 {
            producer.send(Sample::new(Duration::from_secs(i), i as f64));
        }
        assert_eq!(recorded.history(nz(8)).unwrap().len(), 3);
    }
}
