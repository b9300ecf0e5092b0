//! Pair command implementation.

use crate::input;
use crate::InputArgs;
use graphcanon_core::{HashCollector, JsonCollector, JsonHash, JsonOptions, Tee};

pub fn run(args: InputArgs, indent: usize) -> Result<(), Box<dyn std::error::Error>> {
    let graph = input::read_graph(&args)?;

    let mut json = String::new();
    let collector = JsonCollector::new(
        |fragment: &str| {
            json.push_str(fragment);
            Ok(())
        },
        JsonOptions::pretty(indent),
    );
    let mut tee = Tee::new(collector, HashCollector::new());
    input::streamer(&args)
        .stream(&graph, &mut tee)
        .map_err(|e| format!("Streaming failed: {}", e))?;
    let (collector, hasher) = tee.into_inner();
    collector.finish()?;

    let pair = JsonHash {
        json,
        hash: hasher.digest(),
    };
    println!("{}", serde_json::to_string(&pair)?);
    Ok(())
}
