//! Events command implementation.

use crate::input;
use crate::output;
use crate::InputArgs;
use graphcanon_core::{sink_fn, StreamError, StreamEvent};
use std::io::{self, Write};

pub fn run(args: InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let graph = input::read_graph(&args)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let mut sink = sink_fn(|event: &StreamEvent| -> Result<(), StreamError> {
        writeln!(handle, "{}", output::format_event(event))?;
        Ok(())
    });
    input::streamer(&args)
        .stream(&graph, &mut sink)
        .map_err(|e| format!("Streaming failed: {}", e))?;
    Ok(())
}
