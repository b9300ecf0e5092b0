//! Canonical event streams over dynamically-typed data graphs.
//!
//! A [`GraphValue`] is walked depth-first by a [`GraphStreamer`] into a flat
//! sequence of [`StreamEvent`]s whose order does not depend on object key
//! insertion order. Any [`EventSink`] can consume the stream; two are
//! provided:
//!
//! - [`JsonCollector`] renders compact or indented JSON text.
//! - [`HashCollector`] folds attribute names and scalar values into a SHA-256
//!   digest rendered in base-58.
//!
#![deny(missing_docs)]

/// Error type shared by the streamer and sinks.
pub mod error;
/// Event vocabulary, paths and sink adapters.
pub mod event;
/// Hash collector.
pub mod hash;
/// JSON collector.
pub mod json;
/// Graph traversal and policy.
pub mod streamer;
/// Graph and scalar data model.
pub mod value;
/// Scalar wrappers.
pub mod wrapper;

pub use error::StreamError;
pub use event::{sink_fn, EventKind, EventSink, FnSink, Path, StreamEvent, Tee};
pub use hash::HashCollector;
pub use json::{json_writer, JsonCollector, JsonOptions};
pub use streamer::{stream, GraphStreamer, TraversalPolicy};
pub use value::{GraphValue, ObjectMap, Scalar};
pub use wrapper::{JsonScalar, PlainScalar, ValueWrapper};

use serde::{Deserialize, Serialize};

/// Canonical JSON text together with the content digest of the same graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonHash {
    /// Rendered JSON.
    pub json: String,
    /// Base-58 content digest.
    pub hash: String,
}

/// Renders `graph` as JSON with the default traversal policy.
///
/// # Example
///
/// ```rust
/// use graphcanon_core::{to_json_string, GraphValue, JsonOptions};
///
/// let graph = GraphValue::object([("y", 1), ("x", 2)]);
/// assert_eq!(to_json_string(&graph, &JsonOptions::compact())?, r#"{"x":2,"y":1}"#);
/// # Ok::<(), graphcanon_core::StreamError>(())
/// ```
pub fn to_json_string(graph: &GraphValue, options: &JsonOptions) -> Result<String, StreamError> {
    let mut out = String::new();
    let mut collector = JsonCollector::new(
        |fragment: &str| {
            out.push_str(fragment);
            Ok(())
        },
        options.clone(),
    );
    stream(graph, &mut collector)?;
    collector.finish()?;
    Ok(out)
}

/// Base-58 SHA-256 content digest of `graph` with the default traversal policy.
pub fn content_digest(graph: &GraphValue) -> Result<String, StreamError> {
    let mut collector = HashCollector::new();
    stream(graph, &mut collector)?;
    Ok(collector.digest())
}

/// Renders JSON and computes the digest in a single traversal.
pub fn json_hash(graph: &GraphValue, options: &JsonOptions) -> Result<JsonHash, StreamError> {
    let mut out = String::new();
    let json = JsonCollector::new(
        |fragment: &str| {
            out.push_str(fragment);
            Ok(())
        },
        options.clone(),
    );
    let mut tee = Tee::new(json, HashCollector::new());
    stream(graph, &mut tee)?;
    let (json, hash) = tee.into_inner();
    json.finish()?;
    Ok(JsonHash {
        json: out,
        hash: hash.digest(),
    })
}
