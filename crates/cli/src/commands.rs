//! Command implementations: read input files, call into the core, print
//! results. Failures go to stderr and exit with status 1.

use std::fs;
use std::path::Path;
use std::process;

use morph_codegen::Target;
use morph_core::{
    beautify, decode, diff, encode, generate_mock, minify, query, validate, validate_schema,
    EncodeOptions, Format, Value,
};
use time::OffsetDateTime;

use crate::OutputFormat;

fn read_input(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn extension_format(path: &Path) -> Option<Format> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(Format::from_extension)
}

/// Resolve the source format: an explicit flag wins, then the extension
/// table. Errors out when neither applies.
fn resolve_format(path: &Path, explicit: Option<Format>) -> Format {
    if let Some(format) = explicit.or_else(|| extension_format(path)) {
        return format;
    }
    eprintln!(
        "error: cannot determine the format of '{}' (use --from)",
        path.display()
    );
    process::exit(1);
}

/// Like `resolve_format`, but documents without a recognizable extension
/// default to JSON (the query/diff/generate surfaces are JSON-first).
fn resolve_format_or_json(path: &Path, explicit: Option<Format>) -> Format {
    explicit
        .or_else(|| extension_format(path))
        .unwrap_or(Format::Json)
}

fn decode_or_exit(format: Format, text: &str) -> Value {
    match decode(format, text) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

pub(crate) fn cmd_convert(
    input: &Path,
    to: Format,
    from: Option<Format>,
    root: &str,
    compact: bool,
    out: Option<&Path>,
) {
    let source = resolve_format(input, from);
    let text = read_input(input);
    let value = decode_or_exit(source, &text);

    let opts = EncodeOptions {
        xml_root: root.to_string(),
        pretty: !compact,
    };
    let rendered = match encode(to, &value, &opts) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    match out {
        Some(path) => {
            if let Err(e) = fs::write(path, &rendered) {
                eprintln!("error: cannot write '{}': {}", path.display(), e);
                process::exit(1);
            }
        }
        None => println!("{}", rendered),
    }
}

pub(crate) fn cmd_query(input: &Path, path: &str, from: Option<Format>) {
    let source = resolve_format_or_json(input, from);
    let text = read_input(input);
    let value = decode_or_exit(source, &text);

    match query(&value, path) {
        Ok(result) => println!(
            "{}",
            serde_json::to_string_pretty(&result).unwrap_or_default()
        ),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

pub(crate) fn cmd_diff(left: &Path, right: &Path, output: OutputFormat) {
    let left_value = decode_or_exit(
        resolve_format_or_json(left, None),
        &read_input(left),
    );
    let right_value = decode_or_exit(
        resolve_format_or_json(right, None),
        &read_input(right),
    );

    let entries = diff(&left_value, &right_value);
    match output {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&entries).unwrap_or_default()
        ),
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("no differences");
                return;
            }
            for entry in &entries {
                match entry {
                    morph_core::DiffEntry::Added { path, value } => {
                        println!("+ {}: {}", path, compact(value));
                    }
                    morph_core::DiffEntry::Removed { path, value } => {
                        println!("- {}: {}", path, compact(value));
                    }
                    morph_core::DiffEntry::Changed { path, old, new } => {
                        println!("~ {}: {} -> {}", path, compact(old), compact(new));
                    }
                }
            }
            println!("{} difference(s)", entries.len());
        }
    }
}

fn compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

pub(crate) fn cmd_mock(schema_path: &Path) {
    let schema = decode_or_exit(Format::Json, &read_input(schema_path));
    let mock = generate_mock(&schema, OffsetDateTime::now_utc());
    println!(
        "{}",
        serde_json::to_string_pretty(&mock).unwrap_or_default()
    );
}

pub(crate) fn cmd_generate(target: Target, input: &Path, name: &str, from: Option<Format>) {
    let source = resolve_format_or_json(input, from);
    let value = decode_or_exit(source, &read_input(input));
    let code = morph_codegen::emit(target, &value, name);
    if code.is_empty() {
        eprintln!("error: input is not a mapping, nothing to generate");
        process::exit(1);
    }
    println!("{}", code);
}

pub(crate) fn cmd_validate(input: &Path, format: Option<Format>, output: OutputFormat) {
    let source = resolve_format(input, format);
    let result = validate(source, &read_input(input));

    match output {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&result).unwrap_or_default()
        ),
        OutputFormat::Text => {
            if result.valid {
                println!("✓ {}", result.message);
            } else {
                println!("✗ {}", result.message);
            }
        }
    }
    if !result.valid {
        process::exit(1);
    }
}

pub(crate) fn cmd_check(data_path: &Path, schema_path: &Path, output: OutputFormat) {
    let data = decode_or_exit(Format::Json, &read_input(data_path));
    let schema = decode_or_exit(Format::Json, &read_input(schema_path));
    let result = validate_schema(&data, &schema);

    match output {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&result).unwrap_or_default()
        ),
        OutputFormat::Text => {
            if result.valid {
                println!("✓ {}", result.message);
            } else {
                println!("✗ {}", result.message);
            }
        }
    }
    if !result.valid {
        process::exit(1);
    }
}

/// Reformat with the documented best-effort fallback: when the input does
/// not parse, the original text is printed unchanged.
pub(crate) fn cmd_fmt(input: &Path, do_minify: bool, format: Option<Format>) {
    let source = resolve_format(input, format);
    let text = read_input(input);
    let result = if do_minify {
        minify(&text, source)
    } else {
        beautify(&text, source)
    };
    println!("{}", result.unwrap_or(text));
}
