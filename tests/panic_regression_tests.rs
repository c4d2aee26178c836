//! Malformed class strings must never crash the binary: unbalanced brackets,
//! stray colons and odd bytes degrade to conservative results instead.

use std::io::Write;
use std::process::{Command, Stdio};
use tailwind_classkit::{parse_class_tokens, sort, tokenize, ClassAnalyzer};

const MALFORMED: &[&str] = &[
    "w-[100px",
    "]]]] [[[[",
    "::::",
    "hover:",
    ":flex",
    "[&:hover]:",
    "bg-[",
    "-",
    "!",
    "!-",
    "p-",
    "grid-cols-[repeat(auto-fit,minmax(250px,1fr)) gap-4",
    "md:[",
    "\u{0}\u{1}\u{7f}",
    "日本語 クラス",
    "w-[１００px]",
    "group-/name:flex",
    "max-:p-1",
    "bg-red-500/",
    "text-[]/[]",
    "z [ flex text-] bg-[a ",
    "[a b] sm:p-2[a b] [a b][a b] w-[ ",
    "w-[ p-4 ] flex",
];

#[test]
fn test_library_handles_malformed_input() {
    let analyzer = ClassAnalyzer::default();
    let cache = analyzer.new_cache();

    for input in MALFORMED {
        let sorted = sort(input);
        assert_eq!(sort(&sorted), sorted, "sort not idempotent for {:?}", input);

        let raw_count = tokenize(input).len();
        assert_eq!(tokenize(&sorted).len(), raw_count, "sort lost text for {:?}", input);
        assert_eq!(
            sorted.split_whitespace().count(),
            input.split_whitespace().count(),
            "sort changed words for {:?}",
            input
        );

        let analysis = analyzer.analyze(input, &cache);
        assert!(analysis.tokens.len() <= raw_count);
        assert_eq!(parse_class_tokens(input).len(), analysis.tokens.len());
    }
}

#[test]
fn test_sort_command_survives_malformed_lines() {
    let input = MALFORMED.join("\n");
    let result = run_classkit(&["sort"], &input);

    assert!(result.success, "sort failed: {}", result.stderr);
    assert!(!result.stderr.contains("panicked at"), "sort panicked: {}", result.stderr);
    assert_eq!(result.stdout.lines().count(), MALFORMED.len());
}

#[test]
fn test_lint_command_survives_malformed_lines() {
    let input = MALFORMED.join("\n");
    let result = run_classkit(&["lint", "--json"], &input);

    assert!(!result.stderr.contains("panicked at"), "lint panicked: {}", result.stderr);
    assert_eq!(result.code, Some(1), "malformed input should be reported");

    let report: serde_json::Value = serde_json::from_str(&result.stdout).expect("lint output is JSON");
    assert_eq!(report["metadata"]["inputs_processed"], MALFORMED.len());
    assert_eq!(report["metadata"]["source"], "stdin");
}

#[test]
fn test_classify_command_survives_malformed_lines() {
    let input = MALFORMED.join("\n");
    let result = run_classkit(&["classify", "--json"], &input);

    assert!(result.success, "classify failed: {}", result.stderr);
    assert!(!result.stderr.contains("panicked at"), "classify panicked: {}", result.stderr);
}

#[test]
fn test_invalid_utf8_lines_do_not_drop_input() {
    let input: &[u8] = b"text-white p-4 flex\nbg-\xff-500 block\n";
    let result = run_classkit_bytes(&["sort"], input);

    assert!(result.success, "sort failed: {}", result.stderr);
    let lines: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "flex p-4 text-white");
    assert!(lines[1].starts_with("block bg-"), "{}", lines[1]);
}

#[test]
fn test_empty_stdin() {
    let result = run_classkit(&["sort"], "");
    assert!(result.success);
    assert!(result.stdout.is_empty());
}

fn run_classkit(args: &[&str], input: &str) -> ClassKitResult {
    run_classkit_bytes(args, input.as_bytes())
}

fn run_classkit_bytes(args: &[&str], input: &[u8]) -> ClassKitResult {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tw-classkit"))
        .args(args)
        .env_remove("TW_CLASSKIT_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn tw-classkit");

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input).unwrap();
    }

    let output = child.wait_with_output().expect("Failed to wait for output");

    ClassKitResult {
        success: output.status.success(),
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

struct ClassKitResult {
    success: bool,
    code: Option<i32>,
    stdout: String,
    stderr: String,
}
