// Integration tests for the unitsynth binary.
//
// Each test writes its inputs into a temp directory and runs the built
// binary against them.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Returns the path to the cargo-built `unitsynth` binary.
fn unitsynth_binary() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_unitsynth"));
    assert!(path.exists(), "unitsynth binary not found at {}", path.display());
    path
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write temp file");
    path
}

fn run(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(unitsynth_binary())
        .args(args)
        .output()
        .expect("failed to execute unitsynth")
}

const MODEL: &str = r#"{
    "root": "example.com/shapes",
    "packages": [{
        "path": "example.com/shapes",
        "name": "shapes",
        "files": [{
            "name": "rect.go",
            "types": [
                {"name": "Rect", "type": {"struct": {"fields": [
                    {"names": ["W", "H"], "type": {"ident": "int"}}
                ]}}}
            ],
            "functions": [
                {"name": "Area", "receiver": {"names": ["r"], "type": {"ident": "Rect"}},
                 "params": [{"names": ["scale"], "type": {"ident": "int"}}],
                 "results": [{"type": {"ident": "int"}}]},
                {"name": "main"}
            ]
        }]
    }]
}"#;

const RUN: &str = r#"{"type":"int","var_name":"area","val":"6"}
{"type":"pointer","var_name":"p","val":"0xc000","child":{"type":"string","var_name":"name","val":"box"}}
"#;

#[test]
fn synth_prints_test_inputs() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let model = write(dir.path(), "model.json", MODEL);
    let output = run(&[
        "synth".as_ref(),
        "--model".as_ref(),
        model.as_os_str(),
        "--seed".as_ref(),
        "7".as_ref(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("// Rect/RectArea #1"), "{stdout}");
    assert!(stdout.contains(":= Rect{W: int("), "{stdout}");
    assert!(!stdout.contains("main()"), "{stdout}");
    assert!(stdout.contains("// seed: 7"), "{stdout}");
}

#[test]
fn synth_is_reproducible_with_a_seed() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let model = write(dir.path(), "model.json", MODEL);
    let args = [
        "synth".as_ref(),
        "--model".as_ref(),
        model.as_os_str(),
        "--seed".as_ref(),
        "42".as_ref(),
    ];
    assert_eq!(run(&args).stdout, run(&args).stdout);
}

#[test]
fn synth_applies_config_overrides() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let model = write(dir.path(), "model.json", MODEL);
    let config = write(
        dir.path(),
        "unitsynth.toml",
        r#"
[generator]
test_cases_per_func = 1

[values]
override_probability = 1.0

[[overrides.function]]
file = "rect.go"
name = "Area"
params = { scale = ["int(3)"] }
"#,
    );
    let output = run(&[
        "synth".as_ref(),
        "--model".as_ref(),
        model.as_os_str(),
        "--config".as_ref(),
        config.as_os_str(),
        "--seed".as_ref(),
        "1".as_ref(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains(":= int(3)\n"), "{stdout}");
    assert!(!stdout.contains("#2"), "{stdout}");
}

#[test]
fn synth_unknown_function_fails() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let model = write(dir.path(), "model.json", MODEL);
    let output = run(&[
        "synth".as_ref(),
        "--model".as_ref(),
        model.as_os_str(),
        "--function".as_ref(),
        "Perimeter".as_ref(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Perimeter"));
}

#[test]
fn decode_prints_suite_assertions() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let captures = write(dir.path(), "run.jsonl", RUN);
    let output = run(&["decode".as_ref(), captures.as_os_str()]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "s.EqualValues(int(6), area)\nname := *p\ns.EqualValues(string(`box`), name)\n"
    );
}

#[test]
fn validate_accepts_identical_runs() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let first = write(dir.path(), "first.jsonl", RUN);
    let second = write(dir.path(), "second.jsonl", RUN);
    let output = run(&["validate".as_ref(), first.as_os_str(), second.as_os_str()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("valid\n"), "{stdout}");
    assert!(stdout.contains("s.EqualValues(int(6), area)"));
}

#[test]
fn validate_rejects_differing_runs() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let first = write(dir.path(), "first.jsonl", RUN);
    let second = write(
        dir.path(),
        "second.jsonl",
        &RUN.replace(r#""val":"6""#, r#""val":"7""#),
    );
    let output = run(&["validate".as_ref(), first.as_os_str(), second.as_os_str()]);
    assert!(!output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "invalid\n");
}

#[test]
fn validate_reports_panicking_runs() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let run_with_panic = format!("{RUN}{{\"type\":\"panic\",\"val\":\"boom\"}}\n");
    let first = write(dir.path(), "first.jsonl", &run_with_panic);
    let second = write(dir.path(), "second.jsonl", &run_with_panic);
    let output = run(&["validate".as_ref(), first.as_os_str(), second.as_os_str()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("valid\npanics\n"), "{stdout}");
}

#[test]
fn missing_input_file_fails() {
    let output = run(&["decode".as_ref(), "/nonexistent/run.jsonl".as_ref()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not read"));
}
