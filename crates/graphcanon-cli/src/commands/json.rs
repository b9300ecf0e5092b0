//! Json command implementation.

use crate::input;
use crate::InputArgs;
use graphcanon_core::{json_writer, JsonOptions};
use std::io::{self, Write};

pub fn run(args: InputArgs, indent: usize) -> Result<(), Box<dyn std::error::Error>> {
    let graph = input::read_graph(&args)?;
    let streamer = input::streamer(&args);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    {
        let mut collector = json_writer(&mut handle, JsonOptions::pretty(indent));
        streamer
            .stream(&graph, &mut collector)
            .map_err(|e| format!("Streaming failed: {}", e))?;
        collector.finish()?;
    }
    writeln!(handle)?;
    Ok(())
}
