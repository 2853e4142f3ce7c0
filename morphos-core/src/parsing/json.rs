//! JSON recovery parser with fuzzy repair
//!
//! Model replies rarely arrive as clean JSON: objects come wrapped in code
//! fences, embedded in prose, or cut off mid-stream. [`JsonParser`] runs an
//! ordered fallback chain over the raw text and returns the first JSON
//! *object* any tier produces:
//!
//! 1. strict decode of the input as given;
//! 2. a deterministic syntactic repair pass, then decode;
//! 3. the greedy span from the first `{` to the last `}`, then decode.
//!
//! Each fallback transition is reported on the `tracing` channel with a
//! bounded preview of the input; the events never change the outcome.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use super::parser::{OutputParser, ParseError, ParseResult, ParserConfig, RecoveryTier};

/// Longest input preview attached to log events.
const PREVIEW_LIMIT: usize = 200;

/// JSON parser with repair and extraction fallbacks
pub struct JsonParser {
    config: ParserConfig,
}

impl JsonParser {
    /// Create a new JSON parser with default config
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Create a strict parser (no repair)
    pub fn strict() -> Self {
        Self {
            config: ParserConfig::strict(),
        }
    }

    /// Pull the payload out of a markdown code fence, if there is one.
    fn strip_code_fences(&self, input: &str) -> String {
        static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"```(?:json|JSON)?\s*\n?([\s\S]*?)\n?```").unwrap()
        });

        if let Some(caps) = FENCE_RE.captures(input) {
            if let Some(body) = caps.get(1) {
                return body.as_str().trim().to_string();
            }
        }

        // Inline backtick spans only count when they hold an object.
        static INLINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

        if let Some(caps) = INLINE_RE.captures(input) {
            if let Some(body) = caps.get(1) {
                let text = body.as_str().trim();
                if text.starts_with('{') {
                    return text.to_string();
                }
            }
        }

        input.to_string()
    }

    /// Syntactic repair pass over near-JSON text.
    ///
    /// Correction rules, applied in order:
    /// 1. strip `//` line comments (only at line start or after whitespace,
    ///    so `https://…` inside values survives) and `/* */` block comments;
    /// 2. rewrite single-quoted strings as double-quoted;
    /// 3. wrap bare object keys in double quotes;
    /// 4. insert a comma between a value ending one line and a quoted key
    ///    opening the next;
    /// 5. drop trailing commas before `}` or `]`;
    /// 6. close an unterminated string literal, then close unbalanced braces
    ///    and brackets in reverse nesting order.
    fn repair(&self, input: &str) -> String {
        static LINE_COMMENT_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"(?m)(^|\s)//[^\n]*").unwrap());
        static BLOCK_COMMENT_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"/\*[\s\S]*?\*/").unwrap());
        static BARE_KEY_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)\s*:").unwrap());
        static MISSING_COMMA_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r#"(["\d}\]]|true|false|null)[ \t]*\n(\s*")"#).unwrap()
        });
        static TRAILING_COMMA_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r",(\s*[}\]])").unwrap());

        let mut text = LINE_COMMENT_RE.replace_all(input, "${1}").into_owned();
        text = BLOCK_COMMENT_RE.replace_all(&text, "").into_owned();
        text = normalize_quotes(&text);
        text = BARE_KEY_RE.replace_all(&text, "${1}\"${2}\":").into_owned();
        text = MISSING_COMMA_RE
            .replace_all(&text, "${1},\n${2}")
            .into_owned();
        text = TRAILING_COMMA_RE.replace_all(&text, "${1}").into_owned();
        balance_delimiters(&text)
    }

    /// Greedy candidate span from the first `{` to the last `}`.
    ///
    /// Assumes a single embedded object; when the input holds several
    /// independent objects the span covers all of them and the decode of it
    /// will fail.
    fn extract_object_span<'a>(&self, input: &'a str) -> Option<&'a str> {
        let start = input.find('{')?;
        let end = input.rfind('}')?;
        if end < start {
            return None;
        }
        Some(&input[start..=end])
    }
}

impl Default for JsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputParser for JsonParser {
    type Output = Map<String, Value>;

    fn parse(&self, raw: &str) -> ParseResult<Self::Output> {
        if raw.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let mut input = if self.config.trim_whitespace {
            raw.trim().to_string()
        } else {
            raw.to_string()
        };

        // Tier 1: decode the input as given.
        if let Some(map) = decode_object(&input) {
            return Ok(map);
        }

        // A fenced reply is still a strict decode once the fence is removed;
        // later tiers work on the unfenced payload either way.
        if self.config.strip_code_fences {
            let stripped = self.strip_code_fences(&input);
            if stripped != input {
                if let Some(map) = decode_object(&stripped) {
                    return Ok(map);
                }
                input = stripped;
            }
        }

        // Tier 2: repair, then decode.
        if self.config.attempt_repair {
            tracing::warn!(
                tier = %RecoveryTier::Repair,
                preview = preview(&input),
                "strict JSON decode failed, attempting repair"
            );
            let repaired = self.repair(&input);
            if let Some(map) = decode_object(&repaired) {
                return Ok(map);
            }
        }

        // Tier 3: extract a brace span, then decode.
        tracing::warn!(
            tier = %RecoveryTier::Extract,
            preview = preview(&input),
            "falling back to brace-span extraction"
        );
        if let Some(span) = self.extract_object_span(&input) {
            if let Some(map) = decode_object(span) {
                return Ok(map);
            }
        }

        tracing::error!(
            tier = %RecoveryTier::Extract,
            preview = preview(&input),
            "unable to recover a JSON object"
        );
        Err(ParseError::Exhausted {
            tier: RecoveryTier::Extract,
            input: raw.to_string(),
        })
    }

    fn can_parse(&self, raw: &str) -> bool {
        raw.contains('{') || raw.contains("```json") || raw.contains("```JSON")
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

/// Decode `text`, keeping the result only when the top-level value is an
/// object. A bare array or scalar counts as a failed tier.
fn decode_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Rewrite single-quoted strings as double-quoted, leaving apostrophes
/// inside double-quoted strings alone.
fn normalize_quotes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_double = false;
    let mut in_single = false;
    let mut escaped = false;

    for c in input.chars() {
        if escaped {
            out.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                out.push(c);
                escaped = true;
            }
            '"' if !in_single => {
                in_double = !in_double;
                out.push(c);
            }
            '\'' if !in_double => {
                in_single = !in_single;
                out.push('"');
            }
            _ => out.push(c),
        }
    }

    out
}

/// Close whatever the input left open: first an unterminated string literal,
/// then open braces/brackets in reverse nesting order. Delimiters inside
/// string literals do not count toward nesting.
fn balance_delimiters(input: &str) -> String {
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for c in input.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => stack.push('}'),
            '[' if !in_string => stack.push(']'),
            '}' | ']' if !in_string => {
                if stack.last() == Some(&c) {
                    stack.pop();
                }
            }
            _ => {}
        }
    }

    let mut out = input.to_string();
    if in_string {
        out.push('"');
    }
    while let Some(close) = stack.pop() {
        out.push(close);
    }
    out
}

/// Bounded, char-boundary-safe preview for log events.
fn preview(input: &str) -> &str {
    match input.char_indices().nth(PREVIEW_LIMIT) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}
