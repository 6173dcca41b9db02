//! Transport boundary and reusable sinks

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use externalize_core::{Event, Payload, RoutingTarget};

/// Transport publishing a mapped payload to its routing target
pub trait EventSink: Send + Sync {
    fn externalize(&self, target: &RoutingTarget, payload: &Payload) -> anyhow::Result<()>;
}

impl<F> EventSink for F
where
    F: Fn(&RoutingTarget, &Payload) -> anyhow::Result<()> + Send + Sync,
{
    fn externalize(&self, target: &RoutingTarget, payload: &Payload) -> anyhow::Result<()> {
        self(target, payload)
    }
}

/// Keeps every externalized (target, payload) pair in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<(RoutingTarget, Payload)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records in externalization order
    pub fn records(&self) -> Vec<(RoutingTarget, Payload)> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn targets(&self) -> Vec<RoutingTarget> {
        self.records().into_iter().map(|(target, _)| target).collect()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for RecordingSink {
    fn externalize(&self, target: &RoutingTarget, payload: &Payload) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((target.clone(), payload.clone()));
        Ok(())
    }
}

type Encoder = Box<dyn Fn(&dyn Event) -> anyhow::Result<serde_json::Value> + Send + Sync>;

/// Writes one `{"target": ..., "payload": ...}` JSON object per line
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
    encoder: Encoder,
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Sink passing JSON payloads through and writing strings as they are
    pub fn new(writer: W) -> Self {
        Self::with_encoder(writer, encode_plain)
    }

    /// Sink encoding payloads with `encoder`
    pub fn with_encoder<E>(writer: W, encoder: E) -> Self
    where
        E: Fn(&dyn Event) -> anyhow::Result<serde_json::Value> + Send + Sync + 'static,
    {
        Self {
            writer: Mutex::new(writer),
            encoder: Box::new(encoder),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn externalize(&self, target: &RoutingTarget, payload: &Payload) -> anyhow::Result<()> {
        let encoded = (self.encoder)(&**payload)?;
        let record = serde_json::json!({
            "target": target,
            "payload": encoded,
        });

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        serde_json::to_writer(&mut *writer, &record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// JSON values pass through, strings stay strings, anything else is rendered with `Debug`
pub fn encode_plain(payload: &dyn Event) -> anyhow::Result<serde_json::Value> {
    if let Some(value) = payload.downcast_ref::<serde_json::Value>() {
        return Ok(value.clone());
    }
    if let Some(text) = payload.downcast_ref::<String>() {
        return Ok(serde_json::Value::String(text.clone()));
    }
    if let Some(text) = payload.downcast_ref::<&str>() {
        return Ok(serde_json::Value::String((*text).to_owned()));
    }
    Ok(serde_json::Value::String(format!("{payload:?}")))
}
