//! Tests for `labvars credentials`.

use crate::support::*;

#[test]
fn test_credentials_add_and_list() {
    let t = Test::new();

    let output = t.credentials_add("gitlab.example.com", "glpat-abcdefghijkl");
    assert_success(&output);
    assert_stdout_contains(&output, "added credential for gitlab.example.com");

    let output = t.credentials_list();
    assert_success(&output);
    assert_stdout_contains(&output, "gitlab.example.com");
    assert_stdout_contains(&output, "glpa****");
    assert_stdout_excludes(&output, "glpat-abcdefghijkl");
}

#[test]
fn test_credentials_add_replaces() {
    let t = Test::new();
    assert_success(&t.credentials_add("gitlab.example.com", "first-token-value"));

    let output = t.credentials_add("gitlab.example.com", "second-token-value");
    assert_success(&output);
    assert_stdout_contains(&output, "updated credential");

    let config = std::fs::read_to_string(t.config_path()).unwrap();
    assert!(config.contains("second-token-value"));
    assert!(!config.contains("first-token-value"));
}

#[test]
fn test_credentials_list_json() {
    let t = Test::new();
    assert_success(&t.credentials_add("gitlab.com", "glpat-abcdefghijkl"));
    assert_success(&t.credentials_add("gitlab.example.com", "glpat-zyxwvutsrqpo"));

    let output = t
        .cmd()
        .args(["credentials", "list", "--json"])
        .output()
        .unwrap();
    assert_success(&output);

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["count"], 2);
    assert_eq!(parsed["credentials"][0]["domain"], "gitlab.com");
    assert_eq!(parsed["credentials"][0]["token"], "glpa****");
    assert_eq!(parsed["credentials"][1]["domain"], "gitlab.example.com");
}

#[test]
fn test_credentials_list_empty() {
    let t = Test::new();

    let output = t.credentials_list();
    assert_success(&output);
    assert_stdout_contains(&output, "no credentials configured");
}

#[test]
fn test_credentials_rm() {
    let t = Test::new();
    assert_success(&t.credentials_add("gitlab.example.com", "glpat-abcdefghijkl"));

    let output = t
        .cmd()
        .args(["credentials", "rm", "gitlab.example.com"])
        .output()
        .unwrap();
    assert_success(&output);

    let output = t.credentials_list();
    assert_stdout_contains(&output, "no credentials configured");
}

#[test]
fn test_credentials_rm_unknown_domain() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["credentials", "rm", "gitlab.example.com"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "private token not found for domain: gitlab.example.com");
}

#[test]
fn test_credentials_add_rejects_url() {
    let t = Test::new();

    let output = t.credentials_add("https://gitlab.example.com", "token");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid domain");
    assert!(!t.config_path().exists());
}

#[cfg(unix)]
#[test]
fn test_credentials_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::new();
    assert_success(&t.credentials_add("gitlab.example.com", "token-value-123"));

    let mode = std::fs::metadata(t.config_path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
