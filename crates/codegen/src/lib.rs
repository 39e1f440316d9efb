//! morph-codegen: type/struct declaration emission from sample values.
//!
//! Given a decoded [`Value`] (expected to be a mapping) and a declaration
//! name, renders its shape in one of four target notations: TypeScript
//! interfaces, Python annotated classes, Java accessor classes, and Go
//! tagged structs. Shared rules across targets: whole-number values type
//! as integers, a nested mapping types as the capitalized field name, and
//! a sequence's element type comes from its first element only. Input
//! that is not a mapping yields an empty string in every target.

pub mod go;
pub mod java;
pub mod python;
pub mod typescript;

use std::fmt;

use morph_core::Value;

/// A supported declaration target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    TypeScript,
    Python,
    Java,
    Go,
}

impl Target {
    pub const ALL: [Target; 4] = [Target::TypeScript, Target::Python, Target::Java, Target::Go];

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::TypeScript => "typescript",
            Target::Python => "python",
            Target::Java => "java",
            Target::Go => "go",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Target::TypeScript),
            "python" | "py" => Ok(Target::Python),
            "java" => Ok(Target::Java),
            "go" => Ok(Target::Go),
            other => Err(format!("unknown target '{}'", other)),
        }
    }
}

/// Render `value` as a declaration named `name` in the chosen target.
pub fn emit(target: Target, value: &Value, name: &str) -> String {
    match target {
        Target::TypeScript => typescript::emit(value, name),
        Target::Python => python::emit(value, name),
        Target::Java => java::emit(value, name),
        Target::Go => go::emit(value, name),
    }
}

/// First-letter capitalization used for generated type, method, and field
/// names.
pub(crate) fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
