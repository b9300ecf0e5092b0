//! Input loading shared by all commands.

use crate::InputArgs;
use graphcanon_core::{GraphStreamer, GraphValue, TraversalPolicy};
use serde_json::Value;
use std::io::{self, Read};
use tracing::debug;

/// Reads the input document and converts it to a graph.
pub fn read_graph(args: &InputArgs) -> Result<GraphValue, Box<dyn std::error::Error>> {
    let json_str = if let Some(path) = &args.input {
        std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };
    debug!(bytes = json_str.len(), "read input document");

    let value: Value =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;

    Ok(if args.timestamps {
        GraphValue::from_json_detect_timestamps(value)
    } else {
        GraphValue::from(value)
    })
}

/// Builds a streamer honoring the shared options.
pub fn streamer(args: &InputArgs) -> GraphStreamer {
    let mut policy = TraversalPolicy::default();
    if let Some(limit) = args.max_depth {
        policy = policy.with_max_depth(limit);
    }
    GraphStreamer::new(policy)
}
