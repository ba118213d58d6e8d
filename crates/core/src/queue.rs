//! Bounded hand-off queue between push producers and the frame loop

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam::queue::ArrayQueue;
use gauges_types::Sample;

/// Thread-safe bounded queue of samples.
///
/// Producers (possibly on other threads) call [`SampleQueue::push`]; the
/// display owning the queue drains it once per frame. When the queue is full
/// the oldest queued sample is evicted, so a fast producer never blocks and
/// the consumer always sees the most recent values.
#[derive(Debug, Clone)]
pub struct SampleQueue {
    inner: Arc<ArrayQueue<Sample>>,
    evicted: Arc<AtomicU64>,
}

impl SampleQueue {
    /// Capacity used by displays when binding push sources
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Create a queue holding at most `capacity` samples (minimum 1)
    pub fn bounded(capacity: usize) -> Self {
        Self {
            inner: Arc::new(ArrayQueue::new(capacity.max(1))),
            evicted: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Enqueue a sample. Returns `true` if an older sample was evicted.
    pub fn push(&self, sample: Sample) -> bool {
        if self.inner.force_push(sample).is_some() {
            let total = self.evicted.fetch_add(1, Ordering::Relaxed) + 1;
            log::trace!("Sample queue full, evicted oldest sample ({} total)", total);
            true
        } else {
            false
        }
    }

    /// Remove and return every queued sample, oldest first
    pub fn drain(&self) -> Vec<Sample> {
        let mut samples = Vec::with_capacity(self.inner.len());
        while let Some(sample) = self.inner.pop() {
            samples.push(sample);
        }
        samples
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Number of samples evicted because the consumer fell behind
    pub fn evicted(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }

    /// True when no other handle to this queue is alive, so nothing will
    /// ever drain it
    pub fn is_orphaned(&self) -> bool {
        Arc::strong_count(&self.inner) == 1
    }
}
