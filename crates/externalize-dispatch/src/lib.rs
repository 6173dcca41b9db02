//! Dispatch hook handing externalizable events to a transport

mod error;
mod externalizer;
mod sink;

pub use error::{DispatchError, Result};
pub use externalizer::Externalizer;
pub use sink::{encode_plain, EventSink, JsonLinesSink, RecordingSink};
