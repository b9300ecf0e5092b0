//! Depth-first traversal that turns a [`GraphValue`] into [`StreamEvent`]s.

use crate::error::StreamError;
use crate::event::{
    EventSink, Path, StreamEvent, ARRAY_END_SEGMENT, ARRAY_START_SEGMENT, OBJECT_END_SEGMENT,
    OBJECT_START_SEGMENT,
};
use crate::value::{GraphValue, Scalar};
use crate::wrapper::{JsonScalar, ValueWrapper};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Orders (and may filter) the keys of one object.
pub type KeyOrderFn = Arc<dyn for<'a> Fn(Vec<&'a str>) -> Vec<&'a str> + Send + Sync>;
/// Orders (and may filter) the elements of one array.
pub type ElementOrderFn =
    Arc<dyn for<'a> Fn(Vec<&'a GraphValue>) -> Vec<&'a GraphValue> + Send + Sync>;
/// Wraps a scalar leaf.
pub type ValueWrapFn = Arc<dyn Fn(Scalar) -> Arc<dyn ValueWrapper> + Send + Sync>;

/// Sorts keys ascending by code point. Default key order.
pub fn sorted_keys(mut keys: Vec<&str>) -> Vec<&str> {
    keys.sort_unstable();
    keys
}

/// Leaves elements in source order. Default element order.
pub fn identity_elements(items: Vec<&GraphValue>) -> Vec<&GraphValue> {
    items
}

/// Default value wrapper.
pub fn json_wrap(value: Scalar) -> Arc<dyn ValueWrapper> {
    Arc::new(JsonScalar::new(value))
}

/// Ordering, wrapping and path configuration for one traversal.
///
/// All fields are resolved when the policy is built, so the streamer never
/// checks for missing settings. A policy holds no mutable state and can be
/// shared across threads and traversals.
#[derive(Clone)]
pub struct TraversalPolicy {
    key_order: KeyOrderFn,
    element_order: ElementOrderFn,
    value_wrap: ValueWrapFn,
    path_prefix: Path,
    max_depth: Option<usize>,
}

impl Default for TraversalPolicy {
    fn default() -> Self {
        Self {
            key_order: Arc::new(sorted_keys),
            element_order: Arc::new(identity_elements),
            value_wrap: Arc::new(json_wrap),
            path_prefix: Path::root(),
            max_depth: None,
        }
    }
}

impl TraversalPolicy {
    /// Replaces the object key order.
    pub fn with_key_order<F>(mut self, order: F) -> Self
    where
        F: for<'a> Fn(Vec<&'a str>) -> Vec<&'a str> + Send + Sync + 'static,
    {
        self.key_order = Arc::new(order);
        self
    }

    /// Replaces the array element order.
    pub fn with_element_order<F>(mut self, order: F) -> Self
    where
        F: for<'a> Fn(Vec<&'a GraphValue>) -> Vec<&'a GraphValue> + Send + Sync + 'static,
    {
        self.element_order = Arc::new(order);
        self
    }

    /// Replaces the scalar wrapper.
    pub fn with_value_wrap<F>(mut self, wrap: F) -> Self
    where
        F: Fn(Scalar) -> Arc<dyn ValueWrapper> + Send + Sync + 'static,
    {
        self.value_wrap = Arc::new(wrap);
        self
    }

    /// Prepends `prefix` to every emitted path.
    pub fn with_path_prefix(mut self, prefix: Path) -> Self {
        self.path_prefix = prefix;
        self
    }

    /// Rejects graphs nesting more than `limit` containers deep.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Path prepended to emitted paths.
    pub fn path_prefix(&self) -> &Path {
        &self.path_prefix
    }

    /// Container nesting limit, if any.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

impl fmt::Debug for TraversalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraversalPolicy")
            .field("path_prefix", &self.path_prefix)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

/// Walks graphs depth-first and emits events into a sink.
///
/// # Example
///
/// ```rust
/// use graphcanon_core::{GraphStreamer, GraphValue, StreamEvent, TraversalPolicy};
///
/// let streamer = GraphStreamer::new(TraversalPolicy::default());
/// let graph = GraphValue::object([("y", 1), ("x", 2)]);
///
/// let mut events: Vec<StreamEvent> = Vec::new();
/// streamer.stream(&graph, &mut events)?;
/// assert_eq!(events.len(), 6);
/// # Ok::<(), graphcanon_core::StreamError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphStreamer {
    policy: TraversalPolicy,
}

impl GraphStreamer {
    /// Creates a streamer for the given policy.
    pub fn new(policy: TraversalPolicy) -> Self {
        Self { policy }
    }

    /// The policy applied to every traversal.
    pub fn policy(&self) -> &TraversalPolicy {
        &self.policy
    }

    /// Emits the events for `graph` into `sink`, in depth-first order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the sink unchanged, or a traversal
    /// error ([`StreamError::UnknownKey`], [`StreamError::DepthExceeded`]).
    /// Events emitted before the failure are not retracted.
    pub fn stream<S: EventSink + ?Sized>(
        &self,
        graph: &GraphValue,
        sink: &mut S,
    ) -> Result<(), StreamError> {
        debug!(prefix = %self.policy.path_prefix, "streaming graph");
        let result = self.walk(graph, &self.policy.path_prefix, 0, sink);
        if let Err(err) = &result {
            warn!(error = %err, "graph traversal stopped");
        }
        result
    }

    fn walk<S: EventSink + ?Sized>(
        &self,
        graph: &GraphValue,
        prefix: &Path,
        depth: usize,
        sink: &mut S,
    ) -> Result<(), StreamError> {
        match graph {
            GraphValue::Array(items) => {
                self.check_depth(depth + 1, prefix)?;
                let array_path = prefix.child(ARRAY_START_SEGMENT);
                sink.append(&StreamEvent::ArrayStart {
                    path: array_path.clone(),
                })?;
                let ordered = (self.policy.element_order)(items.iter().collect());
                for (idx, item) in ordered.into_iter().enumerate() {
                    self.walk(item, &array_path.child(idx.to_string()), depth + 1, sink)?;
                }
                sink.append(&StreamEvent::ArrayEnd {
                    path: prefix.child(ARRAY_END_SEGMENT),
                })
            }
            GraphValue::Object(map) => {
                self.check_depth(depth + 1, prefix)?;
                let object_path = prefix.child(OBJECT_START_SEGMENT);
                sink.append(&StreamEvent::ObjectStart {
                    path: object_path.clone(),
                })?;
                let keys = (self.policy.key_order)(map.keys().map(String::as_str).collect());
                for key in keys {
                    let child = map.get(key).ok_or_else(|| StreamError::UnknownKey {
                        key: key.to_string(),
                        path: object_path.to_string(),
                    })?;
                    let attr_path = object_path.child(key);
                    sink.append(&StreamEvent::Attribute {
                        name: key.to_string(),
                        path: attr_path.clone(),
                    })?;
                    self.walk(child, &attr_path, depth + 1, sink)?;
                }
                sink.append(&StreamEvent::ObjectEnd {
                    path: prefix.child(OBJECT_END_SEGMENT),
                })
            }
            GraphValue::Null => self.emit_value(Scalar::Null, prefix, sink),
            GraphValue::Bool(b) => self.emit_value(Scalar::Bool(*b), prefix, sink),
            GraphValue::Number(n) => self.emit_value(Scalar::Number(*n), prefix, sink),
            GraphValue::String(s) => self.emit_value(Scalar::String(s.clone()), prefix, sink),
            GraphValue::Timestamp(ts) => self.emit_value(Scalar::Timestamp(*ts), prefix, sink),
        }
    }

    fn emit_value<S: EventSink + ?Sized>(
        &self,
        scalar: Scalar,
        prefix: &Path,
        sink: &mut S,
    ) -> Result<(), StreamError> {
        sink.append(&StreamEvent::Value {
            value: (self.policy.value_wrap)(scalar),
            path: prefix.clone(),
        })
    }

    fn check_depth(&self, depth: usize, prefix: &Path) -> Result<(), StreamError> {
        match self.policy.max_depth {
            Some(limit) if depth > limit => Err(StreamError::DepthExceeded {
                depth,
                limit,
                path: prefix.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Streams `graph` into `sink` with the default policy.
pub fn stream<S: EventSink + ?Sized>(graph: &GraphValue, sink: &mut S) -> Result<(), StreamError> {
    GraphStreamer::default().stream(graph, sink)
}
