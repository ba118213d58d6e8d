//! Data source trait and related types

use std::num::NonZeroUsize;

use gauges_types::Sample;

use crate::capability::{Capability, CapabilitySet};
use crate::error::{GaugeError, Result};
use crate::queue::SampleQueue;

/// Metadata about a data source
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    /// Unique identifier for this source instance or type
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Description of what this source provides
    pub description: String,
}

impl SourceMetadata {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Trait for all data sources
///
/// A source advertises exactly the capabilities it implements through
/// [`DataSource::capabilities`]. Displays check that set when a source is
/// bound, so the capability methods below are only called on sources that
/// claim them. The default implementations fail with
/// [`GaugeError::UnsupportedCapability`].
pub trait DataSource: Send {
    /// Get metadata about this source
    fn metadata(&self) -> &SourceMetadata;

    /// The capabilities this source implements
    fn capabilities(&self) -> CapabilitySet;

    /// PULL: return the latest sample without blocking.
    ///
    /// Sources that read from fallible hardware must swallow transient
    /// failures and return the previous sample instead.
    fn poll(&mut self) -> Result<Sample> {
        Err(GaugeError::unsupported(&self.metadata().id, Capability::Pull))
    }

    /// PUSH: deliver every future sample into `sink`.
    ///
    /// The sink is a bounded thread-safe queue; producers may run on other
    /// threads. The consumer drains it once per frame.
    fn subscribe(&mut self, sink: SampleQueue) -> Result<()> {
        let _ = sink;
        Err(GaugeError::unsupported(&self.metadata().id, Capability::Push))
    }

    /// HISTORICAL: at most `n` recent samples, oldest first.
    ///
    /// Two calls without new samples in between return identical sequences.
    fn history(&self, n: NonZeroUsize) -> Result<Vec<Sample>> {
        let _ = n;
        Err(GaugeError::unsupported(
            &self.metadata().id,
            Capability::Historical,
        ))
    }
}

/// Type-erased data source for dynamic dispatch
pub type BoxedDataSource = Box<dyn DataSource>;

#[cfg(test)]
mod tests {
    use super::*;

    struct LiveOnly {
        metadata: SourceMetadata,
    }

    impl DataSource for LiveOnly {
        fn metadata(&self) -> &SourceMetadata {
            &self.metadata
        }

        fn capabilities(&self) -> CapabilitySet {
            CapabilitySet::PULL
        }

        fn poll(&mut self) -> Result<Sample> {
            Ok(Sample::new(std::time::Duration::ZERO, 1.0))
        }
    }

    #[test]
    fn test_unimplemented_capabilities_fail() {
        let mut source = LiveOnly {
            metadata: SourceMetadata::new("live", "Live", "pull only"),
        };
        assert!(source.poll().is_ok());

        let n = NonZeroUsize::new(5).unwrap();
        match source.history(n) {
            Err(GaugeError::UnsupportedCapability {
                source_id,
                capability,
            }) => {
                assert_eq!(source_id, "live");
                assert_eq!(capability, Capability::Historical);
            }
            other => panic!("expected UnsupportedCapability, got {:?}", other),
        }

        assert!(matches!(
            source.subscribe(SampleQueue::bounded(4)),
            Err(GaugeError::UnsupportedCapability {
                capability: Capability::Push,
                ..
            })
        ));
    }
}
