//! Structured Output Parsing
//!
//! Robust recovery of JSON objects from raw model output.
//!
//! # Features
//!
//! - **Fuzzy JSON parsing**: handles markdown fences, trailing commas,
//!   single quotes, bare keys, truncated output
//! - **Ordered fallback chain**: strict decode, syntactic repair, then
//!   brace-span extraction — first success wins
//! - **Observable degradation**: every fallback transition is reported via
//!   `tracing` without changing the outcome
//!
//! # Example
//!
//! ```rust
//! use morphos_core::parsing::{JsonParser, OutputParser};
//!
//! let parser = JsonParser::new();
//! let map = parser.parse("```json\n{\"key\": \"value\",}\n```").unwrap();
//! assert_eq!(map["key"], "value");
//! ```

mod json;
mod parser;

pub use json::JsonParser;
pub use parser::{OutputParser, ParseError, ParseResult, ParserConfig, RecoveryTier};
