use externalize_core::RoutingTarget;

pub type Result<T> = std::result::Result<T, DispatchError>;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Mapping or routing the event failed
    #[error(transparent)]
    Evaluation(#[from] externalize_core::Error),

    /// The transport failed to externalize the payload
    #[error("failed to externalize event to {target}")]
    Sink {
        target: RoutingTarget,
        #[source]
        source: anyhow::Error,
    },
}
