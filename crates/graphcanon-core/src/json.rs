//! Renders an event stream as JSON text.

use crate::error::StreamError;
use crate::event::{EventKind, EventSink, StreamEvent};
use crate::value::quote;
use std::io::Write;
use tracing::debug;

/// Formatting options for [`JsonCollector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonOptions {
    /// Spaces per nesting level; `0` selects compact output (default: 0).
    pub indent: usize,
    /// Line separator used when `indent > 0` (default: `"\n"`).
    pub newline: String,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            indent: 0,
            newline: "\n".to_string(),
        }
    }
}

impl JsonOptions {
    /// Compact output with no whitespace outside strings.
    pub fn compact() -> Self {
        Self::default()
    }

    /// Indented output with `indent` spaces per level.
    pub fn pretty(indent: usize) -> Self {
        Self {
            indent,
            ..Self::default()
        }
    }
}

#[derive(Debug)]
struct Level {
    kind: Option<EventKind>,
    comma: &'static str,
    siblings: usize,
}

impl Level {
    fn open(kind: Option<EventKind>) -> Self {
        Self {
            kind,
            comma: "",
            siblings: 0,
        }
    }
}

/// Event sink that writes JSON text fragments to an output function.
///
/// Fragments are delivered as soon as each event is processed. A collector
/// serves exactly one top-level traversal; call [`JsonCollector::finish`]
/// afterwards to check the stream was balanced.
///
/// # Example
///
/// ```rust
/// use graphcanon_core::{stream, GraphValue, JsonCollector, JsonOptions};
///
/// let mut out = String::new();
/// let mut collector = JsonCollector::new(
///     |fragment: &str| {
///         out.push_str(fragment);
///         Ok(())
///     },
///     JsonOptions::compact(),
/// );
/// stream(&GraphValue::object([("y", 1), ("x", 2)]), &mut collector)?;
/// collector.finish()?;
/// assert_eq!(out, r#"{"x":2,"y":1}"#);
/// # Ok::<(), graphcanon_core::StreamError>(())
/// ```
pub struct JsonCollector<O> {
    output: O,
    indent: String,
    next_line: String,
    label_space: &'static str,
    levels: Vec<Level>,
    attribute: Option<String>,
}

impl<O> JsonCollector<O>
where
    O: FnMut(&str) -> Result<(), StreamError>,
{
    /// Creates a collector writing through `output`.
    pub fn new(output: O, options: JsonOptions) -> Self {
        let pretty = options.indent > 0;
        Self {
            output,
            indent: " ".repeat(options.indent),
            next_line: if pretty { options.newline } else { String::new() },
            label_space: if pretty { " " } else { "" },
            levels: vec![Level::open(None)],
            attribute: None,
        }
    }

    /// Checks that every opened container was closed.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Unbalanced`] if containers are still open or an
    /// attribute is waiting for its value.
    pub fn finish(self) -> Result<(), StreamError> {
        if self.levels.len() != 1 {
            return Err(StreamError::Unbalanced(format!(
                "{} container(s) left open",
                self.levels.len() - 1
            )));
        }
        if let Some(label) = self.attribute {
            return Err(StreamError::Unbalanced(format!(
                "attribute {} has no value",
                label.trim_end()
            )));
        }
        debug!("json collector finished");
        Ok(())
    }

    fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    fn line_break(&self, depth: usize) -> String {
        let mut text = String::with_capacity(self.next_line.len() + self.indent.len() * depth);
        text.push_str(&self.next_line);
        for _ in 0..depth {
            text.push_str(&self.indent);
        }
        text
    }

    /// Comma, line break and pending label preceding a new sibling.
    fn sibling_prefix(&mut self) -> String {
        let depth = self.depth();
        let level = &self.levels[depth];
        let mut text = String::from(level.comma);
        if depth > 0 && level.siblings > 0 {
            text.push_str(&self.line_break(depth));
        }
        if let Some(label) = self.attribute.take() {
            text.push_str(&label);
        }
        self.levels[depth].comma = ",";
        text
    }

    fn open(&mut self, kind: EventKind, bracket: char) -> Result<(), StreamError> {
        let mut text = self.sibling_prefix();
        text.push(bracket);
        self.levels.push(Level::open(Some(kind)));
        (self.output)(&text)
    }

    fn close(&mut self, opened_by: EventKind, bracket: char, event: &StreamEvent) -> Result<(), StreamError> {
        if self.depth() == 0 || self.levels[self.depth()].kind != Some(opened_by) {
            return Err(StreamError::Unbalanced(format!(
                "unexpected '{}' at {}",
                bracket,
                event.path()
            )));
        }
        if self.attribute.is_some() {
            return Err(StreamError::Unbalanced(format!(
                "'{}' at {} closes a pending attribute",
                bracket,
                event.path()
            )));
        }
        let closed = self.levels.pop();
        let mut text = match closed {
            Some(level) if level.siblings > 0 => self.line_break(self.depth()),
            _ => String::new(),
        };
        text.push(bracket);
        (self.output)(&text)
    }

    fn value(&mut self, rendered: &str) -> Result<(), StreamError> {
        let depth = self.depth();
        self.levels[depth].siblings += 1;
        let mut text = self.sibling_prefix();
        text.push_str(rendered);
        (self.output)(&text)
    }

    fn attribute(&mut self, name: &str) {
        let depth = self.depth();
        self.levels[depth].siblings += 1;
        self.attribute = Some(format!("{}:{}", quote(name), self.label_space));
    }
}

impl<O> EventSink for JsonCollector<O>
where
    O: FnMut(&str) -> Result<(), StreamError>,
{
    fn append(&mut self, event: &StreamEvent) -> Result<(), StreamError> {
        match event {
            StreamEvent::ObjectStart { .. } => self.open(EventKind::ObjectStart, '{'),
            StreamEvent::ArrayStart { .. } => self.open(EventKind::ArrayStart, '['),
            StreamEvent::ObjectEnd { .. } => self.close(EventKind::ObjectStart, '}', event),
            StreamEvent::ArrayEnd { .. } => self.close(EventKind::ArrayStart, ']', event),
            StreamEvent::Attribute { name, .. } => {
                self.attribute(name);
                Ok(())
            }
            StreamEvent::Value { value, .. } => self.value(&value.to_text()),
        }
    }
}

/// Creates a collector writing fragments to `writer`.
pub fn json_writer<W: Write>(
    mut writer: W,
    options: JsonOptions,
) -> JsonCollector<impl FnMut(&str) -> Result<(), StreamError>> {
    JsonCollector::new(
        move |fragment: &str| -> Result<(), StreamError> {
            writer.write_all(fragment.as_bytes())?;
            Ok(())
        },
        options,
    )
}
