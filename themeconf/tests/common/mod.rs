//! Shared integration-test harness for running the `themeconf` binary
//! against fixture documents.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Helpers for invoking the built `themeconf` binary.
pub struct ThemeConf;

impl ThemeConf {
    /// Runs `themeconf` with the given arguments and waits for it to exit.
    ///
    /// Logging env overrides are cleared so output does not depend on the
    /// caller's environment.
    pub fn run(args: &[&str]) -> Output {
        Self::run_with_env(args, &[])
    }

    /// Like [`ThemeConf::run`], with extra environment variables set on the
    /// child process.
    #[allow(clippy::missing_panics_doc)]
    pub fn run_with_env(args: &[&str], envs: &[(&str, &str)]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_themeconf"))
            .args(args)
            .env_remove("THEMECONF_LOG_LEVEL")
            .env_remove("THEMECONF_CONFIG")
            .env_remove("THEMECONF_EXTRA_PLUGINS")
            .env("NO_COLOR", "1")
            .envs(envs.iter().copied())
            .output()
            .expect("failed to run themeconf")
    }

    /// Runs `themeconf` with one fixture path appended to `args`.
    pub fn run_fixture(args: &[&str], fixture: &str) -> Output {
        let path = Self::fixture_path(fixture);
        let mut all = args.to_vec();
        all.push(path.to_str().expect("non-UTF-8 fixture path"));
        Self::run(&all)
    }

    /// Absolute path of a file under `tests/fixtures`.
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }
}

/// Lossy stdout of a finished process.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Lossy stderr of a finished process.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
