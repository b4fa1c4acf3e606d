//! Tests for `labvars scopes`.

use crate::support::*;

#[test]
fn test_scopes_lists_distinct_scopes() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    gitlab.project();
    gitlab.list(VARIABLES);

    let output = t.run(&gitlab, &["scopes"]);
    assert_success(&output);
    assert_stdout_contains(&output, "4 scopes");
    for scope in ["production", "staging", "staging-eu", "*"] {
        assert_stdout_contains(&output, &format!("• {}", scope));
    }
}

#[test]
fn test_scopes_json() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    gitlab.project();
    gitlab.list(VARIABLES);

    let output = t.run(&gitlab, &["scopes", "--json"]);
    assert_success(&output);

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["project"], "group/app");
    assert_eq!(parsed["count"], 4);
    assert_eq!(
        parsed["scopes"],
        serde_json::json!(["production", "staging", "staging-eu", "*"])
    );
}

#[test]
fn test_scopes_empty_project() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    gitlab.project();
    gitlab.list("[]");

    let output = t.run(&gitlab, &["scopes"]);
    assert_success(&output);
    assert_stdout_contains(&output, "no variables");
}
