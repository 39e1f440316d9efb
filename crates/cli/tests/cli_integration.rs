//! CLI integration tests for all implemented subcommands.
//!
//! Uses `assert_cmd` to spawn the `morph` binary and verify exit codes,
//! stdout content, and stderr content. Fixture files live in per-test
//! temporary directories.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn morph() -> Command {
    cargo_bin_cmd!("morph")
}

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    morph()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("morph multi-format data toolkit"));
}

#[test]
fn version_exits_0() {
    morph()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("morph"));
}

// ──────────────────────────────────────────────
// 2. Convert
// ──────────────────────────────────────────────

#[test]
fn convert_json_to_yaml() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "input.json", r#"{"name":"Ada","skills":["a","b"]}"#);

    morph()
        .args(["convert", arg(&input), "--to", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name: Ada"))
        .stdout(predicate::str::contains("  - a"));
}

#[test]
fn convert_infers_source_format_from_extension() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "rows.csv", "a,b\n1,2");

    morph()
        .args(["convert", arg(&input), "--to", "json", "--compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"[{"a":"1","b":"2"}]"#));
}

#[test]
fn convert_json_to_xml_with_custom_root() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "input.json", r#"{"name":"Ada"}"#);

    morph()
        .args(["convert", arg(&input), "--to", "xml", "--root", "person"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<person><name>Ada</name></person>",
        ));
}

#[test]
fn convert_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "input.json", r#"[{"a":1,"b":2}]"#);
    let out = dir.path().join("out.csv");

    morph()
        .args(["convert", arg(&input), "--to", "csv", "--out", arg(&out)])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&out).unwrap(), "a,b\n1,2");
}

#[test]
fn convert_malformed_input_exits_1() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "broken.json", "{oops");

    morph()
        .args(["convert", arg(&input), "--to", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("json parse error"));
}

#[test]
fn convert_unknown_extension_requires_from() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "data.txt", r#"{"a":1}"#);

    morph()
        .args(["convert", arg(&input), "--to", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from"));

    morph()
        .args(["convert", arg(&input), "--to", "yaml", "--from", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a: 1"));
}

// ──────────────────────────────────────────────
// 3. Query
// ──────────────────────────────────────────────

#[test]
fn query_name_path() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "data.json", r#"{"name":"John Doe"}"#);

    morph()
        .args(["query", arg(&input), "$.name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"John Doe\""));
}

#[test]
fn query_wildcard_collects_ids() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "data.json", r#"{"users":[{"id":1},{"id":2}]}"#);

    morph()
        .args(["query", arg(&input), "$.users[*].id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1"))
        .stdout(predicate::str::contains("2"));
}

#[test]
fn query_bad_segment_exits_1() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "data.json", r#"{"a":[1]}"#);

    morph()
        .args(["query", arg(&input), "$.a[x]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported path segment"));
}

// ──────────────────────────────────────────────
// 4. Diff
// ──────────────────────────────────────────────

#[test]
fn diff_text_output_lists_entries() {
    let dir = TempDir::new().unwrap();
    let left = write_fixture(&dir, "left.json", r#"{"a":1,"b":2}"#);
    let right = write_fixture(&dir, "right.json", r#"{"b":3,"c":4}"#);

    morph()
        .args(["diff", arg(&left), arg(&right)])
        .assert()
        .success()
        .stdout(predicate::str::contains("- a: 1"))
        .stdout(predicate::str::contains("~ b: 2 -> 3"))
        .stdout(predicate::str::contains("+ c: 4"))
        .stdout(predicate::str::contains("3 difference(s)"));
}

#[test]
fn diff_json_output_carries_type_tags() {
    let dir = TempDir::new().unwrap();
    let left = write_fixture(&dir, "left.json", r#"{"a":1}"#);
    let right = write_fixture(&dir, "right.json", r#"{}"#);

    morph()
        .args(["diff", arg(&left), arg(&right), "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "removed""#));
}

#[test]
fn diff_equal_documents() {
    let dir = TempDir::new().unwrap();
    let left = write_fixture(&dir, "left.json", r#"{"a":1}"#);
    let right = write_fixture(&dir, "right.json", r#"{"a":1}"#);

    morph()
        .args(["diff", arg(&left), arg(&right)])
        .assert()
        .success()
        .stdout(predicate::str::contains("no differences"));
}

// ──────────────────────────────────────────────
// 5. Mock
// ──────────────────────────────────────────────

#[test]
fn mock_generates_deterministic_fields() {
    let dir = TempDir::new().unwrap();
    let schema = write_fixture(
        &dir,
        "schema.json",
        r#"{"type":"object","properties":{
            "id":{"type":"integer"},
            "email":{"type":"string","format":"email"}}}"#,
    );

    morph()
        .args(["mock", arg(&schema)])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": 42"))
        .stdout(predicate::str::contains("\"email\": \"user@example.com\""));
}

// ──────────────────────────────────────────────
// 6. Generate
// ──────────────────────────────────────────────

#[test]
fn generate_typescript_interface() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "data.json", r#"{"name":"Ada","age":36}"#);

    morph()
        .args(["generate", "typescript", arg(&input)])
        .assert()
        .success()
        .stdout(predicate::str::contains("interface Root {"))
        .stdout(predicate::str::contains("  name: string;"));
}

#[test]
fn generate_go_struct_with_custom_name() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "data.json", r#"{"id":7}"#);

    morph()
        .args(["generate", "go", arg(&input), "--name", "User"])
        .assert()
        .success()
        .stdout(predicate::str::contains("type User struct {"))
        .stdout(predicate::str::contains("Id int `json:\"id\"`"));
}

#[test]
fn generate_non_mapping_exits_1() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "data.json", "[1,2]");

    morph()
        .args(["generate", "python", arg(&input)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a mapping"));
}

// ──────────────────────────────────────────────
// 7. Validate and check
// ──────────────────────────────────────────────

#[test]
fn validate_valid_json() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "data.json", r#"{"a":1}"#);

    morph()
        .args(["validate", arg(&input)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid JSON"));
}

#[test]
fn validate_invalid_csv_exits_1() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "empty.csv", "");

    morph()
        .args(["validate", arg(&input)])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Empty CSV"));
}

#[test]
fn validate_json_output() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "data.xml", "<r><a>1</a></r>");

    morph()
        .args(["validate", arg(&input), "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"));
}

#[test]
fn check_data_against_schema() {
    let dir = TempDir::new().unwrap();
    let data = write_fixture(&dir, "data.json", r#"{"name":"Ada"}"#);
    let schema = write_fixture(
        &dir,
        "schema.json",
        r#"{"type":"object","properties":{"name":{"type":"string"}}}"#,
    );

    morph()
        .args(["check", arg(&data), arg(&schema)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data matches schema"));

    let bad = write_fixture(&dir, "bad.json", r#"{"name":42}"#);
    morph()
        .args(["check", arg(&bad), arg(&schema)])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Data does not match schema"));
}

// ──────────────────────────────────────────────
// 8. Fmt
// ──────────────────────────────────────────────

#[test]
fn fmt_beautifies_json() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "data.json", r#"{"a":1}"#);

    morph()
        .args(["fmt", arg(&input)])
        .assert()
        .success()
        .stdout(predicate::str::contains("{\n  \"a\": 1\n}"));
}

#[test]
fn fmt_minifies_json() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "data.json", "{\n  \"a\": 1\n}");

    morph()
        .args(["fmt", arg(&input), "--minify"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"a":1}"#));
}

#[test]
fn fmt_falls_back_to_original_on_parse_failure() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "broken.json", "{oops");

    morph()
        .args(["fmt", arg(&input)])
        .assert()
        .success()
        .stdout(predicate::str::contains("{oops"));
}
