use chrono::{TimeZone, Utc};
use graphcanon_core::{json_hash, GraphValue, JsonOptions};

fn main() {
    let occurred_at = Utc
        .with_ymd_and_hms(2025, 12, 20, 0, 0, 0)
        .single()
        .unwrap_or_default();
    let document = GraphValue::object([
        ("kind", GraphValue::from("example")),
        ("occurred_at", GraphValue::from(occurred_at)),
        ("tags", GraphValue::array(["b", "a"])),
        ("payload", GraphValue::object([("value", 42.0), ("ratio", 0.25)])),
    ]);

    match json_hash(&document, &JsonOptions::pretty(2)) {
        Ok(result) => {
            println!("{}", result.json);
            println!("hash: {}", result.hash);
        }
        Err(err) => {
            eprintln!("streaming failed: {}", err);
            std::process::exit(1);
        }
    }
}
