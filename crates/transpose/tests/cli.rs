//! End-to-end runs of the CLI driver against JSON fixtures.

use clap::Parser;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use transpose::config::TransposeConfig;
use transpose::{Cli, run};
use transpose_codegen::SEPARATOR;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .display()
        .to_string()
}

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("transpose").chain(args.iter().copied())).unwrap()
}

fn project_config(root: &Path) -> TransposeConfig {
    TransposeConfig::load_from(None, root)
}

fn run_to_string(cli: &Cli, config: &TransposeConfig) -> String {
    let mut out: Vec<u8> = Vec::new();
    let outcome = run(cli, config, &mut out).unwrap();
    assert!(outcome.is_success());
    String::from_utf8(out).unwrap()
}

#[test]
fn native_to_stdout() {
    let dir = TempDir::new().unwrap();
    let out = run_to_string(&cli(&[&fixture("point.json")]), &project_config(dir.path()));
    let (prelude, body) = out.split_once(SEPARATOR).unwrap();
    assert!(prelude.contains("function __isNil"));
    assert!(body.contains("class Point {"));
    assert!(body.contains("  x: number = 0.0;"));
    assert!(body.contains("const origin = new Point();"));
}

#[test]
fn managed_flag() {
    let dir = TempDir::new().unwrap();
    let out = run_to_string(
        &cli(&[&fixture("point.json"), "--mode", "managed"]),
        &project_config(dir.path()),
    );
    assert!(out.contains("function __isRecord"));
    assert!(out.contains("  x = { value: 0.0, type: \"number\" };"));
    assert!(out.contains(
        "const origin = { value: new Point(), type: \"any\", constant: true };"
    ));
}

#[test]
fn project_config_selects_mode() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".transpose")).unwrap();
    std::fs::write(
        dir.path().join(".transpose").join("config.toml"),
        "[codegen]\nmode = \"managed\"\n",
    )
    .unwrap();
    let config = project_config(dir.path());

    let managed = run_to_string(&cli(&[&fixture("point.json")]), &config);
    assert!(managed.contains("__isRecord"));

    let native = run_to_string(&cli(&[&fixture("point.json"), "--mode", "native"]), &config);
    assert!(!native.contains("__isRecord"));
}

#[test]
fn writes_output_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("point.ts");
    let target_arg = target.display().to_string();
    let mut stdout: Vec<u8> = Vec::new();
    let outcome = run(
        &cli(&[&fixture("point.json"), "-o", &target_arg]),
        &project_config(dir.path()),
        &mut stdout,
    )
    .unwrap();
    assert!(outcome.is_success());
    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(&target).unwrap();
    assert!(written.contains("const origin = new Point();"));
}

#[test]
fn fail_fast_reports_item() {
    let dir = TempDir::new().unwrap();
    let err = run(
        &cli(&[&fixture("broken.json")]),
        &project_config(dir.path()),
        &mut Vec::<u8>::new(),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "item 0 (struct at 1:1): unsupported class inside a type body"
    );
}

#[test]
fn keep_going_writes_partial_output() {
    let dir = TempDir::new().unwrap();
    let mut out: Vec<u8> = Vec::new();
    let outcome = run(
        &cli(&[&fixture("broken.json"), "--keep-going"]),
        &project_config(dir.path()),
        &mut out,
    )
    .unwrap();
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].index, 0);
    let out = String::from_utf8(out).unwrap();
    assert!(out.ends_with("const n = 1;\n"));
    assert!(!out.contains("Outer"));
}

#[test]
fn malformed_input_has_context() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.json");
    std::fs::write(&input, "{ \"items\": [ { \"node\": \"jump\" } ] }").unwrap();
    let err = run(
        &cli(&[&input.display().to_string()]),
        &project_config(dir.path()),
        &mut Vec::<u8>::new(),
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("failed to parse AST from"));
}
