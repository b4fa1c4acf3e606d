//! Command helper methods for Test.

use super::{FakeGitLab, Test};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a labvars command isolated from the caller's environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - `LABVARS_CONFIG` set to a config file inside it
    /// - Current directory set to the test working directory
    /// - Colors off and no inherited token, remote, or log filter
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("labvars").expect("failed to find labvars binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path());
        cmd.env("LABVARS_CONFIG", self.config_path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("LABVARS_TOKEN");
        cmd.env_remove("LABVARS_REMOTE");
        cmd.env_remove("LABVARS_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run `labvars --remote <fake project> <args>`.
    pub fn run(&self, gitlab: &FakeGitLab, args: &[&str]) -> Output {
        self.cmd()
            .arg("--remote")
            .arg(gitlab.remote())
            .args(args)
            .output()
            .expect("failed to run labvars")
    }

    /// Shortcut for `labvars pull --file <file>`.
    pub fn pull(&self, gitlab: &FakeGitLab, file: &str) -> Output {
        self.run(gitlab, &["pull", "--file", file])
    }

    /// Shortcut for `labvars push --file <file>`.
    pub fn push(&self, gitlab: &FakeGitLab, file: &str) -> Output {
        self.run(gitlab, &["push", "--file", file])
    }

    /// Shortcut for `labvars credentials add`.
    pub fn credentials_add(&self, domain: &str, token: &str) -> Output {
        self.cmd()
            .args(["credentials", "add", domain, token])
            .output()
            .expect("failed to run labvars credentials add")
    }

    /// Shortcut for `labvars credentials list`.
    pub fn credentials_list(&self) -> Output {
        self.cmd()
            .args(["credentials", "list"])
            .output()
            .expect("failed to run labvars credentials list")
    }
}
