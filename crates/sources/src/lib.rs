//! gauges-sources: Data source implementations for the gauges dashboard toolkit.
//!
//! Synthetic and simulated sources are driven by an injected `Clock`, so
//! they are reproducible under a `ManualClock`. Real sensors plug in through
//! the `Probe` trait, either pulled directly (`ProbeSource`) or pushed from a
//! background thread (`Poller` feeding a `ChannelSource`).

pub mod attitude;
mod channel;
mod poller;
mod probe;
mod recorded;
mod synthetic;
mod wall_clock;

pub use attitude::{attitude_at, AttitudeSimulator};
pub use channel::{ChannelSource, SampleProducer};
pub use poller::Poller;
pub use probe::{Probe, ProbeSource};
pub use recorded::Recorded;
pub use synthetic::SyntheticSource;
pub use wall_clock::{seconds_since_midnight, WallClockSource};
