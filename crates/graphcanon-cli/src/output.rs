//! Output formatting utilities.

use graphcanon_core::StreamEvent;

/// Formats one event as a tab-separated line: kind, path, payload.
pub fn format_event(event: &StreamEvent) -> String {
    let payload = match event {
        StreamEvent::Attribute { name, .. } => name.clone(),
        StreamEvent::Value { value, .. } => value.to_text(),
        _ => String::new(),
    };
    format!("{:<5}\t{}\t{}", event.kind(), event.path(), payload)
        .trim_end()
        .to_string()
}
