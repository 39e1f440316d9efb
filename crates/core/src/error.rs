//! Core error taxonomy.
//!
//! Three failure kinds cross the public surface: [`ParseError`] (malformed
//! input for a format), [`QueryError`] (unusable path expression), and
//! [`EncodeError`] (value shape incompatible with the target format).
//! Validation outcomes are values, not errors; see
//! [`crate::validate::ValidationResult`].

use std::fmt;

use crate::Format;

/// Malformed input for a given format.
///
/// `line`/`column` carry the decoder-reported position when one exists
/// (serde_json for JSON, the line cursor for YAML and XML).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub format: Format,
    pub message: String,
    pub line: Option<u64>,
    pub column: Option<u64>,
}

impl ParseError {
    pub fn new(format: Format, message: impl Into<String>) -> Self {
        ParseError {
            format,
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn at_line(format: Format, line: u64, message: impl Into<String>) -> Self {
        ParseError {
            format,
            message: message.into(),
            line: Some(line),
            column: None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} parse error", self.format)?;
        if let Some(line) = self.line {
            write!(f, " at line {}", line)?;
            if let Some(column) = self.column {
                write!(f, ", column {}", column)?;
            }
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Unparseable or type-mismatched path expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// A segment that matches no grammar rule (e.g. `[abc]`).
    #[error("unsupported path segment '{0}'")]
    InvalidSegment(String),
    /// A `[` without a matching `]`.
    #[error("unclosed '[' in path expression")]
    UnclosedBracket,
    /// `[*]` applied to something that is not a sequence.
    #[error("wildcard requires a sequence, found {found}")]
    WildcardOnNonSequence { found: &'static str },
}

/// Value shape incompatible with the target format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The underlying JSON serializer failed.
    #[error("JSON encode error: {0}")]
    Json(String),
    /// CSV encode of something that is neither a sequence nor a mapping.
    #[error("CSV encode requires a sequence of mappings, found {found}")]
    CsvNotACollection { found: &'static str },
    /// A CSV row that is not a mapping.
    #[error("CSV row {index} is {found}, expected a mapping")]
    CsvRowShape { index: usize, found: &'static str },
    /// A CSV cell holding a nested sequence or mapping.
    #[error("CSV cell under header '{header}' holds a nested value")]
    CsvNestedValue { header: String },
}
