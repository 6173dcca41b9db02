//! Events read from JSON lines

use serde::Deserialize;

use externalize_core::{Event, EventType};

/// Event described by its type path and a JSON body
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InboundEvent {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub body: serde_json::Value,
}

impl Event for InboundEvent {
    fn event_type(&self) -> EventType {
        EventType::named(self.type_name.clone())
    }
}

/// Payload encoder emitting the body of inbound events
pub fn encode_body(payload: &dyn Event) -> anyhow::Result<serde_json::Value> {
    match payload.downcast_ref::<InboundEvent>() {
        Some(event) => Ok(event.body.clone()),
        None => externalize_dispatch::encode_plain(payload),
    }
}
