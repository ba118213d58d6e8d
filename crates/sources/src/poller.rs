//! Background thread reading a probe at a fixed interval

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use gauges_core::SharedClock;
use gauges_types::Sample;

use crate::channel::SampleProducer;
use crate::probe::Probe;

/// Producer thread feeding a [`ChannelSource`](crate::ChannelSource).
///
/// Failed reads are logged and skipped. The thread stops on [`Poller::stop`]
/// or when the poller is dropped.
pub struct Poller {
    name: String,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn spawn<P: Probe + 'static>(
        name: impl Into<String>,
        mut probe: P,
        producer: SampleProducer,
        clock: SharedClock,
        interval: Duration,
    ) -> std::io::Result<Self> {
        let name = name.into();
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let thread_name = name.clone();

        let handle = thread::Builder::new()
            .name(format!("poller-{}", name))
            .spawn(move || {
                log::debug!("Poller '{}' started ({:?} interval)", thread_name, interval);
                while !thread_stop.load(Ordering::Acquire) {
                    match probe.read() {
                        Ok(value) => producer.send(Sample::new(clock.now(), value)),
                        Err(e) => log::warn!("Poller '{}': read failed: {:#}", thread_name, e),
                    }
                    thread::park_timeout(interval);
                }
                log::debug!("Poller '{}' stopped", thread_name);
            })?;

        Ok(Self {
            name,
            stop,
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().map_or(false, |h| !h.is_finished())
    }

    /// Signal the thread and wait for it to exit
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                log::error!("Poller '{}' panicked", self.name);
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
