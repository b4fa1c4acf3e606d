//! Tests for `labvars push`.

use crate::support::*;
use mockito::Matcher;
use serde_json::json;

#[test]
fn test_push_updates_existing_and_creates_missing() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    t.write("vars.json", PUSH_SNAPSHOT);
    gitlab.project();

    let probe_existing = gitlab
        .variable("GET", "DB_URL", "production")
        .with_body(r#"{"key": "DB_URL", "value": "postgres://prod", "environment_scope": "production"}"#)
        .expect(1)
        .create();
    let update = gitlab
        .variable("PUT", "DB_URL", "production")
        .match_body(Matcher::PartialJson(json!({
            "key": "DB_URL",
            "value": "postgres://new",
            "environment_scope": "production"
        })))
        .with_body("{}")
        .expect(1)
        .create();
    let probe_missing = gitlab
        .variable("GET", "NEW_FLAG", "*")
        .with_status(404)
        .with_body(r#"{"message": "404 Variable Not Found"}"#)
        .expect(1)
        .create();
    let path = gitlab.variables_path();
    let create = gitlab
        .server
        .mock("POST", path.as_str())
        .match_body(Matcher::PartialJson(json!({
            "key": "NEW_FLAG",
            "value": "on",
            "environment_scope": "*"
        })))
        .with_status(201)
        .with_body("{}")
        .expect(1)
        .create();

    let output = t.push(&gitlab, "vars.json");
    assert_success(&output);
    assert_stdout_contains(&output, "updated DB_URL [production]");
    assert_stdout_contains(&output, "created NEW_FLAG [*]");
    assert_stdout_contains(&output, "pushed 2 variables (1 created, 1 updated)");

    probe_existing.assert();
    update.assert();
    probe_missing.assert();
    create.assert();
}

#[test]
fn test_push_probe_error_aborts() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    t.write("vars.json", PUSH_SNAPSHOT);
    gitlab.project();

    gitlab
        .variable("GET", "DB_URL", "production")
        .with_status(500)
        .create();
    let update = gitlab
        .variable("PUT", "DB_URL", "production")
        .expect(0)
        .create();
    let later = gitlab
        .variable("GET", "NEW_FLAG", "*")
        .expect(0)
        .create();
    let path = gitlab.variables_path();
    let create = gitlab.server.mock("POST", path.as_str()).expect(0).create();

    let output = t.push(&gitlab, "vars.json");
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to push variable 'DB_URL'");

    update.assert();
    later.assert();
    create.assert();
}

#[test]
fn test_push_write_error_stops_at_variable() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    t.write("vars.json", PUSH_SNAPSHOT);
    gitlab.project();

    gitlab
        .variable("GET", "DB_URL", "production")
        .with_body(r#"{"key": "DB_URL", "value": "old", "environment_scope": "production"}"#)
        .create();
    gitlab
        .variable("PUT", "DB_URL", "production")
        .with_status(400)
        .with_body(r#"{"message": {"value": ["is invalid"]}}"#)
        .create();
    let later = gitlab
        .variable("GET", "NEW_FLAG", "*")
        .expect(0)
        .create();

    let output = t.push(&gitlab, "vars.json");
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to push variable 'DB_URL'");
    later.assert();
}

#[test]
fn test_push_missing_file_makes_no_requests() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    let project = gitlab
        .server
        .mock("GET", "/api/v4/projects/group%2Fapp")
        .expect(0)
        .create();

    let output = t.push(&gitlab, "absent.json");
    assert_failure(&output);
    assert_stderr_contains(&output, "snapshot file not found");
    project.assert();
}

#[test]
fn test_push_invalid_snapshot() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    t.write("vars.json", "{ not json");
    gitlab.project();

    let output = t.push(&gitlab, "vars.json");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid snapshot");
}

#[test]
fn test_push_empty_snapshot() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    t.write("vars.json", "[]");
    gitlab.project();

    let output = t.push(&gitlab, "vars.json");
    assert_success(&output);
    assert_stdout_contains(&output, "pushed 0 variables");
}
