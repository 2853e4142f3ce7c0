//! Structure recovered mappings into typed records
//!
//! The target type is the schema: any `T: DeserializeOwned` acts as the
//! structural contract, with serde enforcing field names, types, and
//! optionality during deserialization. The two-step pipeline keeps the
//! stages distinguishable, so callers can tell "the text was never JSON"
//! from "the JSON did not fit the expected shape".
//!
//! ```rust
//! use morphos_core::structure::structure_response;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Reply {
//!     name: String,
//!     value: i64,
//! }
//!
//! let reply: Reply = structure_response(r#"{"name": "test", "value": 123"#).unwrap();
//! assert_eq!(reply.name, "test");
//! assert_eq!(reply.value, 123);
//! ```

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::parsing::{JsonParser, OutputParser, ParseError};

/// A recovered mapping that does not satisfy the target schema.
///
/// The wrapped serde error names the offending field and the expected
/// versus actual shape where serde can tell.
#[derive(Debug, Error)]
#[error("recovered object does not match the expected schema: {source}")]
pub struct ValidationError {
    #[from]
    source: serde_json::Error,
}

/// Failure of either stage of the structuring pipeline
#[derive(Debug, Error)]
pub enum StructureError {
    /// The raw text never yielded a JSON object
    #[error("parse stage failed: {0}")]
    Parse(#[from] ParseError),

    /// A JSON object was recovered but does not fit the target type
    #[error("validation stage failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Coerce a recovered mapping into `T`.
pub fn structure_value<T: DeserializeOwned>(
    mapping: Map<String, Value>,
) -> Result<T, ValidationError> {
    serde_json::from_value(Value::Object(mapping)).map_err(ValidationError::from)
}

/// Parse raw model output and coerce it into `T` in one step.
pub fn structure_response<T: DeserializeOwned>(raw: &str) -> Result<T, StructureError> {
    structure_response_with(&JsonParser::new(), raw)
}

/// Same as [`structure_response`], with a caller-configured parser.
pub fn structure_response_with<T: DeserializeOwned>(
    parser: &JsonParser,
    raw: &str,
) -> Result<T, StructureError> {
    let mapping = parser.parse(raw)?;
    Ok(structure_value(mapping)?)
}
