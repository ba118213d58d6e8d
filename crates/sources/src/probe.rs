//! Fallible sensor reads exposed as a PULL source

use gauges_core::{CapabilitySet, DataSource, Result, SharedClock, SourceMetadata};
use gauges_types::{Sample, SampleValue};

/// A sensor read that may fail transiently (bus errors, missing device...)
pub trait Probe: Send {
    fn read(&mut self) -> anyhow::Result<SampleValue>;
}

impl<F> Probe for F
where
    F: FnMut() -> anyhow::Result<SampleValue> + Send,
{
    fn read(&mut self) -> anyhow::Result<SampleValue> {
        self()
    }
}

/// PULL source around a [`Probe`].
///
/// A failed read is logged and the previous sample is returned again, so a
/// display keeps showing the last good value. Before the first successful
/// read the fallback value is reported.
pub struct ProbeSource<P> {
    metadata: SourceMetadata,
    probe: P,
    clock: SharedClock,
    last: Sample,
    failures: u64,
}

impl<P: Probe> ProbeSource<P> {
    pub fn new(
        metadata: SourceMetadata,
        probe: P,
        clock: SharedClock,
        fallback: impl Into<SampleValue>,
    ) -> Self {
        let last = Sample::new(clock.now(), fallback);
        Self {
            metadata,
            probe,
            clock,
            last,
            failures: 0,
        }
    }

    /// Number of reads that failed and were replaced by the previous sample
    pub fn failures(&self) -> u64 {
        self.failures
    }
}

impl<P: Probe> DataSource for ProbeSource<P> {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::PULL
    }

    fn poll(&mut self) -> Result<Sample> {
        match self.probe.read() {
            Ok(value) => {
                self.last = Sample::new(self.clock.now(), value);
            }
            Err(e) => {
                self.failures += 1;
                log::warn!(
                    "Source '{}': read failed, keeping previous sample: {:#}",
                    self.metadata.id,
                    e
                );
            }
        }
        Ok(self.last)
    }
}
