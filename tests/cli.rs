use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_repo-summary"))
}

#[test]
fn zero_arguments_print_help_to_stderr_and_exit_one() {
    let home = TempDir::new().unwrap();
    let output = binary().env("HOME", home.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage:"));
    assert!(stderr.contains("--llm"));
    assert!(output.stdout.is_empty());
}

#[test]
fn llm_flag_persists_the_selection_and_exits_without_summarizing() {
    let home = TempDir::new().unwrap();
    let output = binary()
        .env("HOME", home.path())
        .arg("--llm")
        .arg("togetherai")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Using togetherai"));

    let config = fs::read_to_string(home.path().join(".repo-summary.toml")).unwrap();
    assert!(config.contains(r#"llm = "togetherai""#));
}

#[test]
fn first_run_seeds_openai_as_the_default_provider() {
    let home = TempDir::new().unwrap();

    // A missing scan path ends the run after configuration is settled but
    // before any request goes out.
    let output = binary()
        .env("HOME", home.path())
        .arg("/definitely/not/a/real/path")
        .output()
        .unwrap();
    assert_ne!(output.status.code(), Some(0));

    let config = fs::read_to_string(home.path().join(".repo-summary.toml")).unwrap();
    assert!(config.contains(r#"llm = "openai""#));
}

#[test]
fn later_runs_keep_the_persisted_provider() {
    let home = TempDir::new().unwrap();
    binary()
        .env("HOME", home.path())
        .arg("--llm")
        .arg("groq")
        .output()
        .unwrap();

    let output = binary()
        .env("HOME", home.path())
        .arg("/definitely/not/a/real/path")
        .output()
        .unwrap();

    // The persisted key resolves to a client; the failure is the bad path,
    // never an invalid provider.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("Invalid LLM provider"));

    let config = fs::read_to_string(home.path().join(".repo-summary.toml")).unwrap();
    assert!(config.contains(r#"llm = "groq""#));
}
