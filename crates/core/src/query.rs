//! Dot/bracket path expression evaluation.
//!
//! A path is `$` optionally followed by `.name`, `[index]`, and `[*]`
//! segments. Missing keys and out-of-range indices resolve to `Null`
//! (also mid-path, where evaluation short-circuits); only an
//! uninterpretable segment or a wildcard over a non-sequence is an error.

use crate::error::QueryError;
use crate::value::Value;

/// One parsed path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Name(String),
    Index(usize),
    Wildcard,
}

/// Evaluate `path` against `value`, returning an owned result.
///
/// An empty path (or bare `$`) returns the whole value. A `[*]` segment
/// maps the remainder of the path over every element and collects the
/// non-null results into a sequence.
pub fn query(value: &Value, path: &str) -> Result<Value, QueryError> {
    let trimmed = path.trim();
    let stripped = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let stripped = stripped.strip_prefix('.').unwrap_or(stripped);
    let segments = tokenize(stripped)?;
    eval(value, &segments)
}

/// Split on `.` outside brackets; bracketed content is its own segment.
fn tokenize(path: &str) -> Result<Vec<Segment>, QueryError> {
    let chars: Vec<char> = path.chars().collect();
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut pos = 0usize;

    while pos < chars.len() {
        match chars[pos] {
            '.' => {
                flush_name(&mut current, &mut segments);
                pos += 1;
            }
            '[' => {
                flush_name(&mut current, &mut segments);
                pos += 1;
                let mut inner = String::new();
                loop {
                    match chars.get(pos) {
                        None => return Err(QueryError::UnclosedBracket),
                        Some(']') => {
                            pos += 1;
                            break;
                        }
                        Some(c) => {
                            inner.push(*c);
                            pos += 1;
                        }
                    }
                }
                if inner == "*" {
                    segments.push(Segment::Wildcard);
                } else {
                    match inner.parse::<usize>() {
                        Ok(index) => segments.push(Segment::Index(index)),
                        Err(_) => {
                            return Err(QueryError::InvalidSegment(format!("[{}]", inner)))
                        }
                    }
                }
            }
            c => {
                current.push(c);
                pos += 1;
            }
        }
    }
    flush_name(&mut current, &mut segments);
    Ok(segments)
}

fn flush_name(current: &mut String, segments: &mut Vec<Segment>) {
    if !current.is_empty() {
        segments.push(Segment::Name(std::mem::take(current)));
    }
}

fn eval(value: &Value, segments: &[Segment]) -> Result<Value, QueryError> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(value.clone());
    };
    match segment {
        Segment::Name(name) => match value.get(name) {
            Some(child) => eval(child, rest),
            None => Ok(Value::Null),
        },
        Segment::Index(index) => match value {
            Value::Sequence(items) => match items.get(*index) {
                Some(child) => eval(child, rest),
                None => Ok(Value::Null),
            },
            _ => Ok(Value::Null),
        },
        Segment::Wildcard => match value {
            Value::Sequence(items) => {
                let mut results = Vec::new();
                for item in items {
                    let result = eval(item, rest)?;
                    if result != Value::Null {
                        results.push(result);
                    }
                }
                Ok(Value::Sequence(results))
            }
            other => Err(QueryError::WildcardOnNonSequence {
                found: other.type_name(),
            }),
        },
    }
}
