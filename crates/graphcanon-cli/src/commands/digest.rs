//! Digest command implementation.

use crate::input;
use crate::InputArgs;
use graphcanon_core::HashCollector;

pub fn run(args: InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let graph = input::read_graph(&args)?;

    let mut collector = HashCollector::new();
    input::streamer(&args)
        .stream(&graph, &mut collector)
        .map_err(|e| format!("Streaming failed: {}", e))?;

    println!("{}", collector.digest());
    Ok(())
}
