//! Core parser trait, configuration, and error types

use thiserror::Error;

/// Stage of the recovery chain, in the order stages run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryTier {
    /// Plain decode of the input as given
    Strict,
    /// Syntactic repair followed by a decode
    Repair,
    /// Greedy brace-span extraction followed by a decode
    Extract,
}

impl std::fmt::Display for RecoveryTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecoveryTier::Strict => "strict",
            RecoveryTier::Repair => "repair",
            RecoveryTier::Extract => "extract",
        };
        f.write_str(name)
    }
}

/// Error type for parsing operations
#[derive(Debug, Error, Clone)]
pub enum ParseError {
    /// Empty input
    #[error("empty input")]
    EmptyInput,

    /// Every recovery tier ran and none produced a JSON object.
    ///
    /// `input` is the complete original text, untruncated; bounding it for
    /// display is the caller's concern.
    #[error("unable to recover a JSON object (last tier: {tier}): {input}")]
    Exhausted {
        /// Last tier attempted before giving up
        tier: RecoveryTier,
        /// The original input, in full
        input: String,
    },
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Trait for output parsers
pub trait OutputParser: Send + Sync {
    /// The output type produced by this parser
    type Output;

    /// Parse the raw output string
    fn parse(&self, raw: &str) -> ParseResult<Self::Output>;

    /// Check if this parser can handle the input
    fn can_parse(&self, raw: &str) -> bool;

    /// Get the parser name for debugging
    fn name(&self) -> &'static str;
}

/// Configuration for parser behavior
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Attempt to repair malformed input
    pub attempt_repair: bool,
    /// Strip markdown code fences before decoding
    pub strip_code_fences: bool,
    /// Trim surrounding whitespace
    pub trim_whitespace: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            attempt_repair: true,
            strip_code_fences: true,
            trim_whitespace: true,
        }
    }
}

impl ParserConfig {
    /// Create a strict config (no repair attempts)
    pub fn strict() -> Self {
        Self {
            attempt_repair: false,
            strip_code_fences: true,
            trim_whitespace: true,
        }
    }

    /// Create a lenient config (maximum recovery)
    pub fn lenient() -> Self {
        Self {
            attempt_repair: true,
            strip_code_fences: true,
            trim_whitespace: true,
        }
    }
}
