//! Error types for configuration and evaluation

use std::path::PathBuf;

use crate::event::EventType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required argument missing or empty at construction time
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A caller-supplied mapper failed
    #[error("failed to map event of type {event_type}")]
    Mapper {
        event_type: EventType,
        #[source]
        source: anyhow::Error,
    },

    /// A caller-supplied router failed
    #[error("failed to route event of type {event_type}")]
    Router {
        event_type: EventType,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to read settings from {}", path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings")]
    SettingsFormat(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
