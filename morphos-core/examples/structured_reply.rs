use morphos_core::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Extraction {
    entities: Vec<String>,
    confidence: f64,
}

fn main() -> Result<(), StructureError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Structured Reply Recovery Example ===\n");

    // Example 1: a clean reply decodes on the first tier
    let clean = r#"{"entities": ["Alice", "Bob"], "confidence": 0.95}"#;
    let parser = JsonParser::new();
    println!("Example 1: Clean Reply");
    println!("Reply: {clean}");
    println!("Recovered: {:?}\n", parser.parse(clean)?);

    // Example 2: fenced, with a trailing comma
    let fenced = "Here you go:\n```json\n{\n  \"entities\": [\"Ada\"],\n  \"confidence\": 0.8,\n}\n```";
    println!("Example 2: Fenced Reply with Trailing Comma");
    println!("Reply: {fenced}");
    println!("Recovered: {:?}\n", parser.parse(fenced)?);

    // Example 3: reply cut off mid-stream
    let truncated = r#"{"entities": ["Grace", "Edsger"], "confidence": 0.7"#;
    println!("Example 3: Truncated Reply");
    println!("Reply: {truncated}");
    let extraction: Extraction = structure_response(truncated)?;
    println!(
        "Structured: entities={:?} confidence={}\n",
        extraction.entities, extraction.confidence
    );

    // Example 4: branching on which stage failed
    println!("Example 4: Distinguishing Failure Stages");
    for reply in ["no structure in this one", r#"{"entities": "not a list"}"#] {
        match structure_response::<Extraction>(reply) {
            Ok(extraction) => println!("  ok: {extraction:?}"),
            Err(StructureError::Parse(err)) => println!("  parse stage failed: {err}"),
            Err(StructureError::Validation(err)) => println!("  validation stage failed: {err}"),
        }
    }

    Ok(())
}
