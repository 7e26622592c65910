//! Test harness for the Okra parser against fixture files.
//!
//! Every `test/okra/*.okra` file must parse cleanly and resolve to the value
//! in the matching `test/json/*.json` file, keys in the same order. Every
//! `test/nay/*.nay` file must fail; its `.error` file lists the expected
//! errors, one `LINE:COL CODE message` per line, in report order.

use std::fs;
use std::path::{Path, PathBuf};

use glob::glob;
use libokra::{parse_document, resolve, scan, stringify, Map, Value};

/// Root test directory.
fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("test")
}

fn fixture_files(subdir: &str, ext: &str) -> Vec<PathBuf> {
    let pattern = test_root().join(subdir).join(format!("*.{}", ext));
    let mut files: Vec<PathBuf> = glob(&pattern.to_string_lossy())
        .unwrap()
        .flatten()
        .collect();
    files.sort();
    files
}

/// Sibling fixture with the same stem.
fn companion(path: &Path, subdir: &str, ext: &str) -> PathBuf {
    let stem = path.file_stem().unwrap().to_string_lossy();
    test_root().join(subdir).join(format!("{}.{}", stem, ext))
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}

fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap()),
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(from_json).collect()),
        serde_json::Value::Object(obj) => Value::Object(
            obj.into_iter()
                .map(|(k, v)| (k, from_json(v)))
                .collect::<Map>(),
        ),
        serde_json::Value::Null => panic!("null has no Okra equivalent"),
    }
}

/// Run a single .okra fixture (expected to succeed).
fn run_okra_test(path: &Path) -> Result<(), String> {
    let filename = file_name(path);
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", filename, e))?;

    let document = parse_document(&scan(&content));
    if let Some(err) = document.first_error() {
        return Err(format!(
            "{}: Unexpected parse error at {}:{}: {}",
            filename,
            err.line(),
            err.col(),
            err
        ));
    }
    let actual = resolve(&document);

    let json_path = companion(path, "json", "json");
    let json = fs::read_to_string(&json_path)
        .map_err(|e| format!("{}: Missing expected output: {}", filename, e))?;
    let expected = from_json(
        serde_json::from_str(&json).map_err(|e| format!("{}: Bad JSON: {}", filename, e))?,
    );

    // Debug output lists object entries in order, so this also checks key order.
    let (actual_text, expected_text) = (format!("{:?}", actual), format!("{:?}", expected));
    if actual_text != expected_text {
        return Err(format!(
            "{}: Output mismatch\n    expected: {}\n    actual:   {}",
            filename, expected_text, actual_text
        ));
    }

    // Whatever parses must also survive a trip through the stringifier.
    let text = stringify(&actual).map_err(|e| format!("{}: stringify: {}", filename, e))?;
    let reparsed = resolve(&parse_document(&scan(&text)));
    if format!("{:?}", reparsed) != actual_text {
        return Err(format!(
            "{}: Round-trip mismatch\n    text: {:?}\n    value: {:?}",
            filename, text, reparsed
        ));
    }

    println!("  {} => {}", filename, actual_text);
    Ok(())
}

/// Run a single .nay fixture (expected to fail with specific errors).
fn run_nay_test(path: &Path) -> Result<(), String> {
    let filename = file_name(path);
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", filename, e))?;

    let document = parse_document(&scan(&content));
    if document.is_ok() {
        return Err(format!(
            "{}: Expected parse error, but got success: {:?}",
            filename,
            resolve(&document)
        ));
    }

    let actual: Vec<String> = document
        .errors
        .iter()
        .map(|e| format!("{}:{} {} {}", e.line(), e.col(), e.code, e.message))
        .collect();
    let actual = actual.join("\n");

    match fs::read_to_string(companion(path, "nay", "error")) {
        Ok(expected) if expected.trim_end() == actual => {
            println!("  {} => error (as expected)", filename);
            Ok(())
        }
        Ok(expected) => Err(format!(
            "{}: Error mismatch\n    expected: {}\n    actual:   {}",
            filename,
            expected.trim_end(),
            actual
        )),
        Err(_) => {
            println!("  {} => {} (no .error file to compare)", filename, actual);
            Ok(())
        }
    }
}

fn run_all(kind: &str, files: &[PathBuf], run: fn(&Path) -> Result<(), String>) {
    assert!(!files.is_empty(), "No .{} test files found!", kind);
    println!("\nRunning {} .{} test files:", files.len(), kind);

    let errors: Vec<String> = files.iter().filter_map(|f| run(f).err()).collect();
    println!(
        "\nResults: {} passed, {} failed",
        files.len() - errors.len(),
        errors.len()
    );
    if !errors.is_empty() {
        println!("\nErrors:");
        for error in &errors {
            println!("  - {}", error);
        }
    }
    assert!(errors.is_empty(), "{} .{} tests failed", errors.len(), kind);
}

#[test]
fn test_all_okra_fixtures() {
    run_all("okra", &fixture_files("okra", "okra"), run_okra_test);
}

#[test]
fn test_all_nay_fixtures() {
    run_all("nay", &fixture_files("nay", "nay"), run_nay_test);
}

#[test]
fn test_every_okra_fixture_has_expected_json() {
    for path in fixture_files("okra", "okra") {
        assert!(
            companion(&path, "json", "json").exists(),
            "{} has no expected JSON",
            file_name(&path)
        );
    }
}
