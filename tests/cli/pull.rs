//! Tests for `labvars pull`.

use crate::support::*;
use serde_json::Value;

fn json(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

#[test]
fn test_pull_writes_all_variables() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    let project = gitlab.project();
    let list = gitlab.list(VARIABLES);

    let output = t.pull(&gitlab, "vars.json");
    assert_success(&output);
    assert_stdout_contains(&output, "pulled 4 variables");

    assert_eq!(json(&t.read("vars.json")), json(VARIABLES));
    project.assert();
    list.assert();
}

#[test]
fn test_pull_output_is_pretty_printed() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    gitlab.project();
    gitlab.list(VARIABLES);

    assert_success(&t.pull(&gitlab, "vars.json"));

    let contents = t.read("vars.json");
    assert!(contents.starts_with("[\n  {\n    \""));
    assert!(contents.ends_with("]\n"));
}

#[test]
fn test_pull_sends_private_token() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    let project = gitlab
        .server
        .mock("GET", "/api/v4/projects/group%2Fapp")
        .match_header("PRIVATE-TOKEN", TOKEN)
        .with_body(r#"{"id": 42}"#)
        .create();
    gitlab.list("[]");

    assert_success(&t.pull(&gitlab, "vars.json"));
    project.assert();
}

#[test]
fn test_pull_env_token_overrides_config() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    let project = gitlab
        .server
        .mock("GET", "/api/v4/projects/group%2Fapp")
        .match_header("PRIVATE-TOKEN", "from-env")
        .with_body(r#"{"id": 42}"#)
        .create();
    gitlab.list("[]");

    let output = t
        .cmd()
        .env("LABVARS_TOKEN", "from-env")
        .args(["--remote", &gitlab.remote(), "pull", "--file", "vars.json"])
        .output()
        .unwrap();
    assert_success(&output);
    project.assert();
}

#[test]
fn test_pull_follows_pagination() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    gitlab.project();

    let path = gitlab.variables_path();
    let base = format!("{}{}", gitlab.server.url(), path);
    let first = gitlab
        .server
        .mock("GET", path.as_str())
        .with_header(
            "link",
            &format!(
                "<{base}?page=2>; rel=\"next\", <{base}?page=1>; rel=\"first\", <{base}?page=2>; rel=\"last\""
            ),
        )
        .with_body(r#"[{"key": "A", "value": "1", "environment_scope": "*"}]"#)
        .expect(1)
        .create();
    let second = gitlab
        .server
        .mock("GET", format!("{}?page=2", path).as_str())
        .with_header(
            "link",
            &format!("<{base}?page=1>; rel=\"first\", <{base}?page=2>; rel=\"last\""),
        )
        .with_body(r#"[{"key": "B", "value": "2", "environment_scope": "*"}]"#)
        .expect(1)
        .create();

    let output = t.pull(&gitlab, "vars.json");
    assert_success(&output);
    assert_stdout_contains(&output, "pulled 2 variables");

    let pulled = json(&t.read("vars.json"));
    assert_eq!(pulled[0]["key"], "A");
    assert_eq!(pulled[1]["key"], "B");
    first.assert();
    second.assert();
}

#[test]
fn test_pull_failure_leaves_file_untouched() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    gitlab.project();
    let path = gitlab.variables_path();
    gitlab
        .server
        .mock("GET", path.as_str())
        .with_status(500)
        .create();
    t.write("vars.json", "previous\n");

    let output = t.pull(&gitlab, "vars.json");
    assert_failure(&output);
    assert_stderr_contains(&output, "error fetching CI/CD variables");
    assert_eq!(t.read("vars.json"), "previous\n");
}

#[test]
fn test_pull_project_not_found() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    gitlab
        .server
        .mock("GET", "/api/v4/projects/group%2Fapp")
        .with_status(404)
        .with_body(r#"{"message": "404 Project Not Found"}"#)
        .create();

    let output = t.pull(&gitlab, "vars.json");
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to retrieve project group/app");
    assert!(!t.path("vars.json").exists());
}

#[test]
fn test_pull_uses_default_directory() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::new();
    let snapshots = t.path("snapshots");
    std::fs::create_dir(&snapshots).unwrap();
    let output = t
        .cmd()
        .args(["credentials", "add", &gitlab.host(), TOKEN, "--default-path"])
        .arg(&snapshots)
        .output()
        .unwrap();
    assert_success(&output);
    gitlab.project();
    gitlab.list(VARIABLES);

    let output = t.run(&gitlab, &["pull"]);
    assert_success(&output);
    assert!(snapshots.join("app.variables.json").exists());
}

#[test]
fn test_pull_without_file_or_default() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::with_credential(&gitlab);
    let project = gitlab
        .server
        .mock("GET", "/api/v4/projects/group%2Fapp")
        .expect(0)
        .create();

    let output = t.run(&gitlab, &["pull"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no file selected");
    project.assert();
}

#[test]
fn test_pull_without_credential_warns_and_continues() {
    let mut gitlab = FakeGitLab::new();
    let t = Test::new();
    gitlab.project();
    gitlab.list("[]");

    let output = t.pull(&gitlab, "vars.json");
    assert_success(&output);
    assert_stderr_contains(&output, "private token not found for domain");
    assert_eq!(t.read("vars.json"), "[]\n");
}
