//! # Morphos - Structured Output Recovery for Language Models
//!
//! Morphos (Μορφή) turns raw model replies into well-formed, typed data:
//! - Fuzzy JSON recovery with an ordered fallback chain (strict decode,
//!   syntactic repair, brace-span extraction)
//! - Typed structuring of recovered objects via serde
//! - Distinguishable parse-stage and validation-stage failures
//! - Fallback transitions reported on the `tracing` channel
//!
//! ## Quick Start
//!
//! ```rust
//! use morphos_core::prelude::*;
//!
//! let parser = JsonParser::new();
//! let reply = r#"Sure! Here is the result: {"name": "widget", "count": 3}"#;
//! let object = parser.parse(reply)?;
//! assert_eq!(object["name"], "widget");
//! # Ok::<(), ParseError>(())
//! ```
//!
//! ## Architecture
//!
//! Everything is synchronous and free of shared state; a [`parsing::JsonParser`]
//! is immutable configuration plus compiled regexes, safe to share across
//! threads. The [`structure`] module layers typed coercion on top: the
//! caller's `Deserialize` type is the schema, and serde enforces it.

pub mod parsing;
pub mod structure;

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::parsing::{
        JsonParser, OutputParser, ParseError, ParseResult, ParserConfig, RecoveryTier,
    };
    pub use crate::structure::{
        structure_response, structure_response_with, structure_value, StructureError,
        ValidationError,
    };
}
