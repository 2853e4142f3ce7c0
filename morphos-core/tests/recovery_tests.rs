//! End-to-end tests for the recovery and structuring pipeline
//!
//! These run realistic model-output transcripts through the public API:
//! fenced replies, chatty prose, truncated streams, and refusals.

use morphos_core::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
struct Extraction {
    entities: Vec<String>,
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct Record {
    name: String,
    value: i64,
}

#[test]
fn recovers_fenced_reply_with_trailing_comma() {
    let reply = "Here is the extraction you asked for:\n\n```json\n{\n  \"entities\": [\"Alice\", \"Bob\"],\n  \"confidence\": 0.9,\n}\n```";
    let extraction: Extraction = structure_response(reply).unwrap();
    assert_eq!(extraction.entities, vec!["Alice", "Bob"]);
    assert!((extraction.confidence - 0.9).abs() < f64::EPSILON);
}

#[test]
fn recovers_object_buried_in_prose() {
    let reply = r#"The entities are {"name": "Morphos", "value": 1} as requested."#;
    let record: Record = structure_response(reply).unwrap();
    assert_eq!(record.name, "Morphos");
    assert_eq!(record.value, 1);
}

#[test]
fn recovers_python_style_dict() {
    let parser = JsonParser::new();
    let map = parser
        .parse(r#"{'name': 'Ada', 'tags': ['pioneer'], 'active': true}"#)
        .unwrap();
    assert_eq!(map["name"], "Ada");
    assert_eq!(map["tags"][0], "pioneer");
    assert_eq!(map["active"], true);
}

#[test]
fn recovers_reply_truncated_mid_stream() {
    let parser = JsonParser::new();
    let reply = r#"{"name": "partial", "value": 7, "notes": ["first", "seco"#;
    let map = parser.parse(reply).unwrap();
    assert_eq!(map["name"], "partial");
    assert_eq!(map["notes"][1], "seco");
}

#[test]
fn refusal_reply_exhausts_the_chain() {
    let reply = "I am sorry, I cannot produce structured data for that passage.";
    let parser = JsonParser::new();
    match parser.parse(reply) {
        Err(ParseError::Exhausted { tier, input }) => {
            assert_eq!(tier, RecoveryTier::Extract);
            assert_eq!(input, reply);
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

#[test]
fn exhaustion_keeps_long_input_untruncated() {
    let reply = "word ".repeat(200);
    let parser = JsonParser::new();
    match parser.parse(&reply) {
        Err(ParseError::Exhausted { input, .. }) => assert_eq!(input, reply),
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

#[test]
fn parse_and_validation_failures_stay_distinguishable() {
    let parse_err = structure_response::<Record>("no structure at all").unwrap_err();
    assert!(matches!(parse_err, StructureError::Parse(_)));

    let validation_err = structure_response::<Record>(r#"{"name": "only a name"}"#).unwrap_err();
    assert!(matches!(validation_err, StructureError::Validation(_)));
}

#[test]
fn strict_configuration_refuses_malformed_input() {
    let parser = JsonParser::with_config(ParserConfig::strict());
    assert!(parser.parse(r#"{"name": "x", "value": 1,}"#).is_err());
    assert!(parser.parse(r#"{"name": "x", "value": 1}"#).is_ok());
}

#[test]
fn repeated_calls_agree() {
    let parser = JsonParser::new();
    let reply = "Result: ```json\n{\"name\": \"stable\", \"value\": 4,}\n```";
    let first = parser.parse(reply).unwrap();
    let second = parser.parse(reply).unwrap();
    assert_eq!(first, second);
}
