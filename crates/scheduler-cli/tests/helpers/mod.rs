use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Runs the `scheduler` binary against a throwaway database.
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self { temp_dir, db_path }
    }

    /// A command configured through `TODO_DBFILE`, run inside the temp
    /// directory so no stray `scheduler.toml` is picked up.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("scheduler").expect("Failed to find scheduler binary");
        cmd.current_dir(self.temp_dir.path())
            .env("TODO_DBFILE", &self.db_path)
            .env_remove("TODO_PORT")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}

/// A date far enough ahead that it is never moved to today.
pub const FUTURE_DATE: &str = "20990101";
