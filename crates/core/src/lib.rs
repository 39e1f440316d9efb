//! morph-core: the multi-format data-interchange core.
//!
//! Parses JSON, XML, YAML, and CSV into a single in-memory [`Value`] model,
//! converts between any pair of those formats, queries the model with a
//! dot/bracket path language, structurally diffs two values, and
//! synthesizes example data from a schema description. Everything here is
//! synchronous, single-threaded, and free of retained state: each call
//! receives its inputs and returns a fresh result.
//!
//! # Public API
//!
//! Key entry points are re-exported at the crate root:
//!
//! - [`decode()`] / [`encode()`] -- text to/from [`Value`] per [`Format`]
//! - [`beautify()`] / [`minify()`] -- best-effort reformatting
//! - [`query()`] -- path expression evaluation
//! - [`diff()`] -- structural comparison into [`DiffEntry`] lists
//! - [`generate_mock()`] -- schema-driven example data
//! - [`validate()`] / [`validate_schema()`] -- well-formedness checks

use std::fmt as std_fmt;

pub mod csv;
pub mod diff;
pub mod error;
pub mod fmt;
pub mod json;
pub mod mock;
pub mod query;
pub mod validate;
pub mod value;
pub mod xml;
pub mod yaml;

// ── Convenience re-exports ──────────────────────────────────────────

pub use diff::{diff, DiffEntry};
pub use error::{EncodeError, ParseError, QueryError};
pub use fmt::{beautify, minify};
pub use mock::generate as generate_mock;
pub use query::query;
pub use validate::{validate, validate_schema, ValidationResult};
pub use value::Value;

/// One of the four supported text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Xml,
    Yaml,
    Csv,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Json, Format::Xml, Format::Yaml, Format::Csv];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
            Format::Yaml => "yaml",
            Format::Csv => "csv",
        }
    }

    /// Fixed file-extension table: `json`, `xml`, `yaml`/`yml`, `csv`.
    pub fn from_extension(extension: &str) -> Option<Format> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "xml" => Some(Format::Xml),
            "yaml" | "yml" => Some(Format::Yaml),
            "csv" => Some(Format::Csv),
            _ => None,
        }
    }
}

impl std_fmt::Display for Format {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_extension(s).ok_or_else(|| format!("unknown format '{}'", s))
    }
}

/// Options consumed by [`encode`].
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Root element name for XML output.
    pub xml_root: String,
    /// Pretty-print JSON (2-space indent) instead of compact.
    pub pretty: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            xml_root: "root".to_string(),
            pretty: true,
        }
    }
}

/// Parse `text` as `format` into a [`Value`].
pub fn decode(format: Format, text: &str) -> Result<Value, ParseError> {
    match format {
        Format::Json => json::decode(text),
        Format::Xml => xml::decode(text),
        Format::Yaml => yaml::decode(text),
        Format::Csv => Ok(csv::decode(text)),
    }
}

/// Render `value` as `format` text.
pub fn encode(format: Format, value: &Value, opts: &EncodeOptions) -> Result<String, EncodeError> {
    match format {
        Format::Json => json::encode(value, opts.pretty),
        Format::Xml => Ok(xml::encode(value, &opts.xml_root)),
        Format::Yaml => Ok(yaml::encode(value)),
        Format::Csv => csv::encode(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_table() {
        assert_eq!(Format::from_extension("json"), Some(Format::Json));
        assert_eq!(Format::from_extension("yml"), Some(Format::Yaml));
        assert_eq!(Format::from_extension("YAML"), Some(Format::Yaml));
        assert_eq!(Format::from_extension("txt"), None);
    }

    #[test]
    fn format_round_trips_through_display_and_from_str() {
        for format in Format::ALL {
            assert_eq!(format.as_str().parse::<Format>().unwrap(), format);
        }
    }

    #[test]
    fn decode_encode_dispatch() {
        let value = decode(Format::Json, r#"{"a":1}"#).unwrap();
        let opts = EncodeOptions::default();
        assert!(encode(Format::Xml, &value, &opts)
            .unwrap()
            .contains("<root><a>1</a></root>"));
        assert_eq!(encode(Format::Yaml, &value, &opts).unwrap(), "a: 1");
    }
}
