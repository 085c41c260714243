//! CLI flag contract tests
//!
//! Runs the built binary against temp files with an isolated config
//! directory and no API keys, so every run uses the local rules.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

const ESSAY: &str = "He don't like school. I have 25 years old and I like music alot.\n";

fn esl_coach_bin() -> &'static str {
    env!("CARGO_BIN_EXE_esl-coach")
}

/// Command with HOME/XDG pointed at `home` and provider keys removed
fn command(home: &Path) -> Command {
    let mut cmd = Command::new(esl_coach_bin());
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("ESL_COACH_BACKEND")
        .env_remove("ESL_COACH_MODEL");
    for key in [
        "ANTHROPIC_API_KEY",
        "OPENAI_API_KEY",
        "OPENROUTER_API_KEY",
        "DEEPINFRA_API_KEY",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

fn write_essay(dir: &Path, text: &str) -> std::path::PathBuf {
    let path = dir.join("essay.txt");
    std::fs::write(&path, text).unwrap();
    path
}

fn run(home: &Path, args: &[&str]) -> Output {
    command(home).args(args).output().expect("Failed to run esl-coach")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let essay = write_essay(dir.path(), ESSAY);
    let out = run(
        dir.path(),
        &["check", essay.to_str().unwrap(), "--offline", "--format", "json"],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("valid JSON");
    assert_eq!(report["source"], "rules_only");
    let score = report["score"].as_u64().unwrap();
    assert!(score < 100);
    assert_eq!(report["grade"].as_str().unwrap().len(), 1);

    let suggestions = report["suggestions"].as_array().unwrap();
    assert!(suggestions.len() >= 3);
    for s in suggestions {
        for field in ["id", "category", "severity", "span", "original", "explanation"] {
            assert!(!s[field].is_null(), "missing {} in {}", field, s);
        }
    }
    assert!(suggestions.iter().any(|s| s["replacement"] == "a lot"));
}

#[test]
fn test_check_reads_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = command(dir.path())
        .args(["check", "--offline", "--format", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"I ate a apple.")
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["suggestions"][0]["replacement"], "an apple");
}

#[test]
fn test_check_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let essay = write_essay(dir.path(), ESSAY);
    let out = run(dir.path(), &["check", essay.to_str().unwrap(), "--offline"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("esl-coach Writing Review"));
    assert!(text.contains("SUGGESTIONS"));
    assert!(text.contains("\"alot\""));
}

#[test]
fn test_top_and_min_severity() {
    let dir = tempfile::tempdir().unwrap();
    let essay = write_essay(dir.path(), ESSAY);
    let out = run(
        dir.path(),
        &[
            "check",
            essay.to_str().unwrap(),
            "--offline",
            "--format",
            "json",
            "--min-severity",
            "high",
            "--top",
            "1",
        ],
    );
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let suggestions = report["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["severity"], "high");
}

#[test]
fn test_fail_under() {
    let dir = tempfile::tempdir().unwrap();
    let essay = write_essay(dir.path(), ESSAY);
    let path = essay.to_str().unwrap();

    let failing = run(dir.path(), &["check", path, "--offline", "--fail-under", "100"]);
    assert_eq!(failing.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&failing.stderr).contains("--fail-under=100"));

    let passing = run(dir.path(), &["check", path, "--offline", "--fail-under", "0"]);
    assert_eq!(passing.status.code(), Some(0));
}

#[test]
fn test_empty_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let essay = write_essay(dir.path(), "   \n");
    let out = run(dir.path(), &["check", essay.to_str().unwrap(), "--offline"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("empty"));
}

#[test]
fn test_missing_key_runs_rules_only() {
    // No --offline and no key: the model is skipped, not an error
    let dir = tempfile::tempdir().unwrap();
    let essay = write_essay(dir.path(), ESSAY);
    let out = run(
        dir.path(),
        &["check", essay.to_str().unwrap(), "--backend", "openai", "--format", "json"],
    );
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["source"], "rules_only");
}

#[test]
fn test_config_file_sets_profile() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join(".config").join("esl-coach");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[analysis]\nlevel = \"c1\"\nnative_language = \"Korean\"\n",
    )
    .unwrap();
    let essay = write_essay(dir.path(), ESSAY);

    let out = run(
        dir.path(),
        &["check", essay.to_str().unwrap(), "--offline", "--format", "json"],
    );
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    // dirs resolves the config dir per platform; only assert where it is XDG
    if cfg!(target_os = "linux") {
        assert_eq!(report["profile"]["level"], "advanced");
        assert_eq!(report["profile"]["native_language"], "Korean");
    }

    // Flags override the file
    let out = run(
        dir.path(),
        &["check", essay.to_str().unwrap(), "--offline", "--format", "json", "--level", "a1"],
    );
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["profile"]["level"], "beginner");
}

// ============================================================================
// fix / rules / sample / stats / init
// ============================================================================

#[test]
fn test_fix_prints_corrected_text() {
    let dir = tempfile::tempdir().unwrap();
    let essay = write_essay(dir.path(), ESSAY);
    let out = run(dir.path(), &["fix", essay.to_str().unwrap(), "--offline"]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "He doesn't like school. I am 25 years old and I like music a lot.\n"
    );
    // File untouched without --write
    assert_eq!(std::fs::read_to_string(&essay).unwrap(), ESSAY);
}

#[test]
fn test_fix_write_overwrites_file() {
    let dir = tempfile::tempdir().unwrap();
    let essay = write_essay(dir.path(), "I ate a apple.");
    let out = run(dir.path(), &["fix", essay.to_str().unwrap(), "--offline", "--write"]);
    assert!(out.status.success());
    assert_eq!(std::fs::read_to_string(&essay).unwrap(), "I ate an apple.");
}

#[test]
fn test_fix_applies_more_than_report_limit() {
    let dir = tempfile::tempdir().unwrap();
    let essay = write_essay(dir.path(), &"I like it alot.\n".repeat(60));
    let out = run(dir.path(), &["fix", essay.to_str().unwrap(), "--offline"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "I like it a lot.\n".repeat(60));
}

#[test]
fn test_rules_lists_and_filters() {
    let dir = tempfile::tempdir().unwrap();
    let all = stdout(&run(dir.path(), &["rules"]));
    assert!(all.contains("article-an-before-vowel"));
    assert!(all.contains("long-sentence"));

    let spelling = stdout(&run(dir.path(), &["rules", "--category", "spelling"]));
    assert!(spelling.contains("alot"));
    assert!(!spelling.contains("article-an-before-vowel"));
}

#[test]
fn test_sample_by_level_and_index() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["sample", "--level", "beginner", "--index", "1"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("My name is Ana"));

    let out = run(dir.path(), &["sample", "--level", "beginner", "--index", "99"]);
    assert!(!out.status.success());
}

#[test]
fn test_stats_json() {
    let dir = tempfile::tempdir().unwrap();
    let essay = write_essay(dir.path(), "One two three. Four five!\n\nSix.");
    let out = run(dir.path(), &["stats", essay.to_str().unwrap(), "--format", "json"]);
    let stats: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(stats["words"], 6);
    assert_eq!(stats["sentences"], 3);
    assert_eq!(stats["paragraphs"], 2);
}

#[test]
fn test_init_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let first = stdout(&run(dir.path(), &["init"]));
    assert!(first.contains("Created"));
    let second = stdout(&run(dir.path(), &["init"]));
    assert!(second.contains("already exists"));
}
