//! Integration tests for treescribe

mod harness;

use harness::{run_treescribe, TestTree};
use std::fs;

#[test]
fn test_basic_tree_output() {
    let tree = TestTree::new();
    tree.add_file("main.rs", "fn main() {}");
    tree.add_file("lib.rs", "pub mod foo;");

    let (stdout, _stderr, success) = run_treescribe(&tree, &["run"]);
    assert!(success, "treescribe should succeed");
    assert!(stdout.contains("main.rs"), "should show main.rs");
    assert!(stdout.contains("lib.rs"), "should show lib.rs");
}

#[test]
fn test_header_names_absolute_root() {
    let tree = TestTree::new();
    tree.add_file("a.txt", "a");

    let (stdout, _stderr, success) = run_treescribe(&tree, &["run"]);
    assert!(success);
    let header = stdout.lines().next().unwrap();
    assert!(
        header.starts_with("treescribe: Analyzing /"),
        "header should carry the absolute path: {}",
        header
    );
}

#[test]
fn test_exclude_flag() {
    let tree = TestTree::new();
    tree.add_file("keep.rs", "fn keep() {}");
    tree.add_file("node_modules/package.json", "{}");

    let (stdout, _stderr, success) = run_treescribe(&tree, &["run", "-e", "node_modules"]);
    assert!(success);
    assert!(stdout.contains("keep.rs"), "should show non-excluded files");
    assert!(
        !stdout.contains("node_modules"),
        "excluded directory gets no line at all: {}",
        stdout
    );
    assert!(!stdout.contains("package.json"), "no descent into excluded dir");
}

#[test]
fn test_configured_exclude_is_fallback() {
    // No -e on the command line: the default config excludes node_modules
    let tree = TestTree::new();
    tree.add_file("keep.rs", "fn keep() {}");
    tree.add_file("node_modules/package.json", "{}");

    let (stdout, _stderr, success) = run_treescribe(&tree, &["run"]);
    assert!(success);
    assert!(stdout.contains("keep.rs"));
    assert!(
        !stdout.contains("node_modules"),
        "configured excludes apply when -e is unset: {}",
        stdout
    );
}

#[test]
fn test_depth_limit() {
    let tree = TestTree::new();
    tree.add_file("top.rs", "fn top() {}");
    tree.add_file("level1/mid.rs", "fn mid() {}");
    tree.add_file("level1/level2/deep.rs", "fn deep() {}");

    let (stdout, _stderr, success) = run_treescribe(&tree, &["run", "-d", "0"]);
    assert!(success);
    assert!(stdout.contains("top.rs"), "should show top level");
    assert!(stdout.contains("level1"), "should name first level dir");
    assert!(
        !stdout.contains("mid.rs"),
        "should not descend past the depth limit: {}",
        stdout
    );
}

#[test]
fn test_sibling_sort_order() {
    let tree = TestTree::new();
    tree.add_file("b.txt", "b");
    tree.add_file("a.txt", "a");
    tree.add_dir("A");
    tree.add_dir("B");

    let (stdout, _stderr, success) = run_treescribe(&tree, &["run"]);
    assert!(success);

    let a_file = stdout.find("a.txt").unwrap();
    let b_file = stdout.find("b.txt").unwrap();
    let a_dir = stdout.find("── A\n").unwrap();
    let b_dir = stdout.find("── B\n").unwrap();
    assert!(a_file < b_file, "files sort case-insensitively");
    assert!(b_file < a_dir, "files come before directories: {}", stdout);
    assert!(a_dir < b_dir);
}

#[test]
fn test_output_sink_duplicates_tree() {
    let tree = TestTree::new();
    tree.add_file("main.rs", "fn main() {}");

    let (stdout, _stderr, success) = run_treescribe(&tree, &["run", "-o", "analysis.txt"]);
    assert!(success);
    assert!(
        stdout.contains("Analysis written to analysis.txt"),
        "trailing confirmation expected: {}",
        stdout
    );

    let sink = fs::read_to_string(tree.path().join("analysis.txt")).unwrap();
    assert!(sink.contains("treescribe: Analyzing"), "header is dual-written");
    assert!(sink.contains("main.rs"));
    assert!(
        !sink.contains("Analysis written to"),
        "confirmation stays on stdout: {}",
        sink
    );
    // every sink line appears on stdout too, in the same order
    let mut stdout_lines = stdout.lines();
    for sink_line in sink.lines() {
        assert!(
            stdout_lines.any(|l| l == sink_line),
            "sink line missing or out of order on stdout: {}",
            sink_line
        );
    }
}

#[test]
fn test_invalid_root_exits_nonzero() {
    let tree = TestTree::new();

    let (_stdout, stderr, success) = run_treescribe(&tree, &["run", "does-not-exist"]);
    assert!(!success, "missing root must fail");
    assert!(
        stderr.contains("not a valid directory"),
        "stderr should explain: {}",
        stderr
    );
}

#[test]
fn test_run_twice_is_deterministic() {
    let tree = TestTree::new();
    tree.add_file("src/main.rs", "fn main() {}");
    tree.add_file("src/lib.rs", "pub fn lib() {}");
    tree.add_file("README.md", "# readme");

    let (first, _, ok1) = run_treescribe(&tree, &["run"]);
    let (second, _, ok2) = run_treescribe(&tree, &["run"]);
    assert!(ok1 && ok2);
    assert_eq!(first, second, "renders of an unchanged tree are byte-identical");
}

#[test]
fn test_config_show_lists_defaults() {
    let tree = TestTree::new();

    let (stdout, _stderr, success) = run_treescribe(&tree, &["config", "--show"]);
    assert!(success);
    assert!(stdout.contains("model: llama3:8b-instruct-q5_1"), "got: {}", stdout);
    assert!(stdout.contains("api_url: http://localhost:11434"), "got: {}", stdout);
    assert!(stdout.contains("exclude: node_modules, .git"), "got: {}", stdout);
}

#[test]
fn test_config_set_persists() {
    let tree = TestTree::new();

    let (stdout, _stderr, success) =
        run_treescribe(&tree, &["config", "--set", "model", "gpt-4"]);
    assert!(success);
    assert!(stdout.contains("Updated model in configuration."), "got: {}", stdout);

    let (stdout, _stderr, success) = run_treescribe(&tree, &["config", "--show"]);
    assert!(success);
    assert!(stdout.contains("model: gpt-4"), "setting should persist: {}", stdout);
}

#[test]
fn test_config_set_unknown_key_fails() {
    let tree = TestTree::new();

    let (_stdout, stderr, success) =
        run_treescribe(&tree, &["config", "--set", "temperature", "0.7"]);
    assert!(!success);
    assert!(
        stderr.contains("unknown configuration key"),
        "got: {}",
        stderr
    );
}

#[test]
fn test_config_without_flags_prints_usage_hint() {
    let tree = TestTree::new();

    let (stdout, _stderr, success) = run_treescribe(&tree, &["config"]);
    assert!(success);
    assert!(stdout.contains("--set KEY VALUE"), "got: {}", stdout);
}
