//! PUSH source fed by producer handles on any thread

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use gauges_core::{
    Capability, CapabilitySet, DataSource, GaugeError, HistoryBuffer, Result, SampleQueue,
    SourceMetadata,
};
use gauges_types::Sample;

struct Shared {
    sinks: Mutex<Vec<SampleQueue>>,
    history: Option<Mutex<HistoryBuffer>>,
    sent: AtomicU64,
}

impl Shared {
    fn live_sinks(&self) -> MutexGuard<'_, Vec<SampleQueue>> {
        let mut sinks = self.sinks.lock().unwrap_or_else(|e| e.into_inner());
        let before = sinks.len();
        sinks.retain(|sink| !sink.is_orphaned());
        if sinks.len() < before {
            log::debug!("Dropped {} unused subscriber queue(s)", before - sinks.len());
        }
        sinks
    }
}

/// Sending half of a [`ChannelSource`]. Cheap to clone and `Send`.
#[derive(Clone)]
pub struct SampleProducer {
    shared: Arc<Shared>,
}

impl SampleProducer {
    /// Deliver `sample` to every subscribed queue and record it in the
    /// history, if the source keeps one. Never blocks on the consumer.
    ///
    /// Queues whose consumer is gone (unbound role, dropped display) are
    /// pruned first.
    pub fn send(&self, sample: Sample) {
        {
            let sinks = self.shared.live_sinks();
            for sink in sinks.iter() {
                sink.push(sample);
            }
        }
        if let Some(history) = &self.shared.history {
            history
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(sample);
        }
        self.shared.sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of samples sent so far
    pub fn sent(&self) -> u64 {
        self.shared.sent.load(Ordering::Relaxed)
    }

    /// Number of queues with a live consumer
    pub fn subscribers(&self) -> usize {
        self.shared.live_sinks().len()
    }
}

/// PUSH source whose samples come from [`SampleProducer`] handles.
///
/// Optionally HISTORICAL: every sent sample is also kept in a bounded
/// in-memory history.
pub struct ChannelSource {
    metadata: SourceMetadata,
    shared: Arc<Shared>,
}

impl ChannelSource {
    pub fn new(id: impl Into<String>) -> (Self, SampleProducer) {
        Self::build(id.into(), None)
    }

    pub fn with_history(id: impl Into<String>, capacity: NonZeroUsize) -> (Self, SampleProducer) {
        Self::build(id.into(), Some(Mutex::new(HistoryBuffer::new(capacity))))
    }

    fn build(id: String, history: Option<Mutex<HistoryBuffer>>) -> (Self, SampleProducer) {
        let shared = Arc::new(Shared {
            sinks: Mutex::new(Vec::new()),
            history,
            sent: AtomicU64::new(0),
        });
        let source = Self {
            metadata: SourceMetadata::new(id, "Channel", "Samples pushed by a producer"),
            shared: Arc::clone(&shared),
        };
        (source, SampleProducer { shared })
    }

    /// Another producer for the same source
    pub fn producer(&self) -> SampleProducer {
        SampleProducer {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl DataSource for ChannelSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn capabilities(&self) -> CapabilitySet {
        let caps = CapabilitySet::PUSH;
        if self.shared.history.is_some() {
            caps.with(Capability::Historical)
        } else {
            caps
        }
    }

    fn subscribe(&mut self, sink: SampleQueue) -> Result<()> {
        log::debug!(
            "Source '{}': new subscriber (capacity {})",
            self.metadata.id,
            sink.capacity()
        );
        self.shared
            .sinks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(sink);
        Ok(())
    }

    fn history(&self, n: NonZeroUsize) -> Result<Vec<Sample>> {
        match &self.shared.history {
            Some(history) => Ok(history.lock().unwrap_or_else(|e| e.into_inner()).last_n(n)),
            None => Err(GaugeError::unsupported(
                &self.metadata.id,
                Capability::Historical,
            )),
        }
    }
}
