use thiserror::Error;

/// Errors surfaced while streaming a graph or collecting its events.
///
/// Sinks return this type too, so a failure raised by a collector's output
/// travels back to the caller of [`GraphStreamer::stream`](crate::GraphStreamer::stream)
/// exactly as the sink produced it.
#[derive(Error, Debug)]
pub enum StreamError {
    /// A key-ordering function returned a key the object does not contain.
    #[error("key ordering produced unknown key {key:?} at {path}")]
    UnknownKey {
        /// Offending key.
        key: String,
        /// Path of the object being traversed.
        path: String,
    },
    /// The graph is nested deeper than the policy allows.
    #[error("nesting depth {depth} exceeds limit {limit} at {path}")]
    DepthExceeded {
        /// Depth reached.
        depth: usize,
        /// Configured limit.
        limit: usize,
        /// Path where the limit was hit.
        path: String,
    },
    /// A collector received an End event without a matching Start, or was
    /// finished with open levels.
    #[error("unbalanced event stream: {0}")]
    Unbalanced(String),
    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Output sink rejected a fragment for another reason.
    #[error("output error: {0}")]
    Output(String),
}
