//! Per-event dispatch hook

use tracing::Level;

use externalize_core::{Configuration, Event, Payload};

use crate::error::{DispatchError, Result};
use crate::sink::EventSink;

/// Evaluates a [`Configuration`] for each raised event and hands supported
/// ones to the sink.
///
/// Safe to call concurrently: the configuration is immutable and the sink is
/// `Sync`.
pub struct Externalizer<S> {
    configuration: Configuration,
    sink: S,
}

impl<S: EventSink> Externalizer<S> {
    pub fn new(configuration: Configuration, sink: S) -> Self {
        Self {
            configuration,
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Whether `event` would be externalized
    pub fn supports(&self, event: &dyn Event) -> bool {
        self.configuration.supports(event)
    }

    /// Externalizes `event` if the configuration supports it, returning
    /// whether it was handed to the sink.
    ///
    /// Unsupported events return `Ok(false)` without side effects. Mapping,
    /// routing and sink failures are returned as they are, without retry.
    pub fn externalize(&self, event: &Payload) -> Result<bool> {
        if !self.configuration.supports(&**event) {
            return Ok(false);
        }

        let target = self.configuration.determine_target(event)?;
        let mapped = self.configuration.map(event)?;

        if tracing::enabled!(Level::TRACE) {
            tracing::trace!(
                event_type = %event.event_type(),
                routing_target = %target,
                payload = ?mapped,
                "Externalizing event"
            );
        } else {
            tracing::debug!(
                event_type = %event.event_type(),
                routing_target = %target,
                "Externalizing event"
            );
        }

        self.sink
            .externalize(&target, &mapped)
            .map_err(|source| DispatchError::Sink { target, source })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use std::sync::Arc;

    #[test]
    fn test_unsupported_event_is_skipped() {
        let configuration = Configuration::builder().select_by_type::<u8>().build();
        let externalizer = Externalizer::new(configuration, RecordingSink::new());

        let event: Payload = Arc::new(4711_i64);
        assert!(!externalizer.supports(&*event));
        assert!(!externalizer.externalize(&event).unwrap());
        assert!(externalizer.sink().is_empty());
    }

    #[test]
    fn test_supported_event_reaches_sink() {
        let configuration = Configuration::builder()
            .select_by_type::<u8>()
            .mapping_for(|n: &u8| u32::from(*n) * 2)
            .route_by_type(|_| "numbers".to_string())
            .build();
        let externalizer = Externalizer::new(configuration, RecordingSink::new());

        let event: Payload = Arc::new(21_u8);
        assert!(externalizer.supports(&*event));
        assert!(externalizer.externalize(&event).unwrap());

        let records = externalizer.into_sink().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0.target(), "numbers");
        assert_eq!(records[0].1.downcast_ref::<u32>(), Some(&42));
    }
}
