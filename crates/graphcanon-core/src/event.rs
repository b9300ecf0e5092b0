//! Event vocabulary shared by the streamer and every collector.

use crate::error::StreamError;
use crate::wrapper::ValueWrapper;
use std::fmt;
use std::sync::Arc;

/// Segment opening an object.
pub const OBJECT_START_SEGMENT: &str = "{";
/// Segment closing an object.
pub const OBJECT_END_SEGMENT: &str = "}";
/// Segment opening an array.
pub const ARRAY_START_SEGMENT: &str = "[";
/// Segment closing an array.
pub const ARRAY_END_SEGMENT: &str = "]";

/// Position of an event in the source graph, as a list of segment tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    /// Segments in order from the root.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this is the empty path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Discriminant of a [`StreamEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// Object member name.
    Attribute,
    /// Scalar leaf.
    Value,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::ObjectStart => OBJECT_START_SEGMENT,
            EventKind::ObjectEnd => OBJECT_END_SEGMENT,
            EventKind::ArrayStart => ARRAY_START_SEGMENT,
            EventKind::ArrayEnd => ARRAY_END_SEGMENT,
            EventKind::Attribute => "Attr",
            EventKind::Value => "Value",
        };
        f.pad(label)
    }
}

/// One unit of the linear event stream.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// Entering an object.
    ObjectStart {
        /// Prefix plus `{`.
        path: Path,
    },
    /// Leaving an object.
    ObjectEnd {
        /// Prefix plus `}`.
        path: Path,
    },
    /// Entering an array.
    ArrayStart {
        /// Prefix plus `[`.
        path: Path,
    },
    /// Leaving an array.
    ArrayEnd {
        /// Prefix plus `]`.
        path: Path,
    },
    /// Object member name; the member's value follows.
    Attribute {
        /// Member name.
        name: String,
        /// Object path plus the member name.
        path: Path,
    },
    /// Scalar leaf.
    Value {
        /// Wrapped scalar.
        value: Arc<dyn ValueWrapper>,
        /// Prefix of the leaf (empty for a bare root scalar).
        path: Path,
    },
}

impl StreamEvent {
    /// Path carried by the event.
    pub fn path(&self) -> &Path {
        match self {
            StreamEvent::ObjectStart { path }
            | StreamEvent::ObjectEnd { path }
            | StreamEvent::ArrayStart { path }
            | StreamEvent::ArrayEnd { path }
            | StreamEvent::Attribute { path, .. }
            | StreamEvent::Value { path, .. } => path,
        }
    }

    /// Event discriminant.
    pub fn kind(&self) -> EventKind {
        match self {
            StreamEvent::ObjectStart { .. } => EventKind::ObjectStart,
            StreamEvent::ObjectEnd { .. } => EventKind::ObjectEnd,
            StreamEvent::ArrayStart { .. } => EventKind::ArrayStart,
            StreamEvent::ArrayEnd { .. } => EventKind::ArrayEnd,
            StreamEvent::Attribute { .. } => EventKind::Attribute,
            StreamEvent::Value { .. } => EventKind::Value,
        }
    }

    /// True for Start/End events.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            StreamEvent::Attribute { .. } | StreamEvent::Value { .. }
        )
    }
}

impl PartialEq for StreamEvent {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                StreamEvent::Attribute { name, path },
                StreamEvent::Attribute {
                    name: other_name,
                    path: other_path,
                },
            ) => name == other_name && path == other_path,
            (
                StreamEvent::Value { value, path },
                StreamEvent::Value {
                    value: other_value,
                    path: other_path,
                },
            ) => {
                path == other_path
                    && value.as_value() == other_value.as_value()
                    && value.to_text() == other_value.to_text()
            }
            (a, b) if a.is_structural() && b.is_structural() => {
                a.kind() == b.kind() && a.path() == b.path()
            }
            _ => false,
        }
    }
}

/// Consumer of a stream of events.
///
/// Returning an error stops the traversal; the error reaches the caller of
/// the traversal unchanged.
pub trait EventSink {
    /// Receives the next event in depth-first order.
    fn append(&mut self, event: &StreamEvent) -> Result<(), StreamError>;
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn append(&mut self, event: &StreamEvent) -> Result<(), StreamError> {
        (**self).append(event)
    }
}

/// Records every event, for replay or inspection.
impl EventSink for Vec<StreamEvent> {
    fn append(&mut self, event: &StreamEvent) -> Result<(), StreamError> {
        self.push(event.clone());
        Ok(())
    }
}

/// Adapter turning a closure into an [`EventSink`]. Built by [`sink_fn`].
pub struct FnSink<F>(F);

/// Wraps a closure as an [`EventSink`].
pub fn sink_fn<F>(f: F) -> FnSink<F>
where
    F: FnMut(&StreamEvent) -> Result<(), StreamError>,
{
    FnSink(f)
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(&StreamEvent) -> Result<(), StreamError>,
{
    fn append(&mut self, event: &StreamEvent) -> Result<(), StreamError> {
        (self.0)(event)
    }
}

/// Delivers each event to two sinks, first then second.
#[derive(Debug)]
pub struct Tee<A, B> {
    /// Receives each event first.
    pub first: A,
    /// Receives each event after `first` accepted it.
    pub second: B,
}

impl<A, B> Tee<A, B> {
    /// Pairs two sinks.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Returns the two sinks.
    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: EventSink, B: EventSink> EventSink for Tee<A, B> {
    fn append(&mut self, event: &StreamEvent) -> Result<(), StreamError> {
        self.first.append(event)?;
        self.second.append(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;
    use crate::wrapper::{JsonScalar, PlainScalar};

    #[test]
    fn path_display() {
        assert_eq!(Path::root().to_string(), "root");
        let path = Path::root().child("{").child("x");
        assert_eq!(path.to_string(), "{.x");
        assert_eq!(path.segments().len(), 2);
        assert!(Path::root().is_root());
        assert!(!path.is_root());
    }

    #[test]
    fn child_leaves_parent_untouched() {
        let parent = Path::from_segments(["["]);
        let child = parent.child("0");
        assert_eq!(parent.segments(), ["["]);
        assert_eq!(child.segments(), ["[", "0"]);
    }

    #[test]
    fn value_events_compare_by_scalar_and_text() {
        let json = StreamEvent::Value {
            value: Arc::new(JsonScalar::new(Scalar::String("a".into()))),
            path: Path::root(),
        };
        let same = StreamEvent::Value {
            value: Arc::new(JsonScalar::new(Scalar::String("a".into()))),
            path: Path::root(),
        };
        let plain = StreamEvent::Value {
            value: Arc::new(PlainScalar::new(Scalar::String("a".into()))),
            path: Path::root(),
        };
        assert_eq!(json, same);
        assert_ne!(json, plain);
    }

    #[test]
    fn structural_events_compare_by_kind() {
        let start = StreamEvent::ArrayStart {
            path: Path::from_segments(["["]),
        };
        let object = StreamEvent::ObjectStart {
            path: Path::from_segments(["["]),
        };
        assert_ne!(start, object);
        assert!(start.is_structural());
        assert_eq!(start.kind().to_string(), "[");
    }

    #[test]
    fn tee_stops_at_first_failure() {
        let mut seen = Vec::new();
        let failing = sink_fn(|_: &StreamEvent| Err(StreamError::Output("closed".into())));
        let mut tee = Tee::new(failing, &mut seen);
        let event = StreamEvent::ObjectStart { path: Path::root() };
        assert!(matches!(tee.append(&event), Err(StreamError::Output(_))));
        drop(tee);
        assert!(seen.is_empty());
    }
}
