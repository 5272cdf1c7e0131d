//! Fake `kubectl` for end-to-end tests
//!
//! The executor clears the child environment, so the script carries its
//! state directory baked into its text instead of reading it from env.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use qdprobe_infra_system::{KubectlConfig, KubectlExecutor};
use tempfile::TempDir;

pub struct FakeKubectl {
    dir: TempDir,
}

impl FakeKubectl {
    /// Fresh script in a unique `qdprobe-<name>-*` temp dir, answering `[]` by default
    pub fn new(name: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("qdprobe-{}-", name))
            .tempdir()
            .unwrap();

        let script = format!(
            r#"#!/bin/sh
dir='{dir}'
echo "$*" >> "$dir/calls.log"
n=$(wc -l < "$dir/calls.log" | tr -d ' ')
if [ -f "$dir/sleep" ]; then sleep "$(cat "$dir/sleep")"; fi
if [ -f "$dir/stderr" ]; then cat "$dir/stderr" >&2; exit 1; fi
if [ -f "$dir/stdout.$n" ]; then cat "$dir/stdout.$n"; else cat "$dir/stdout"; fi
"#,
            dir = dir.path().display()
        );

        let path = dir.path().join("kubectl");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let fake = Self { dir };
        fake.respond("[]");
        fake
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.path().join(file)
    }

    /// Default stdout for every call
    pub fn respond(&self, stdout: &str) {
        fs::write(self.path("stdout"), stdout).unwrap();
    }

    /// Stdout for the n-th call (1-based)
    pub fn respond_nth(&self, n: usize, stdout: &str) {
        fs::write(self.path(&format!("stdout.{}", n)), stdout).unwrap();
    }

    /// Every call exits 1 with this stderr
    pub fn fail_with(&self, stderr: &str) {
        fs::write(self.path("stderr"), stderr).unwrap();
    }

    /// Every call sleeps before answering
    pub fn hang_for_secs(&self, secs: u64) {
        fs::write(self.path("sleep"), secs.to_string()).unwrap();
    }

    /// Argument lines of every call so far
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.path("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn config(&self) -> KubectlConfig {
        KubectlConfig {
            kubectl: self.path("kubectl").display().to_string(),
            ..KubectlConfig::default()
        }
    }

    pub fn executor(&self) -> KubectlExecutor {
        KubectlExecutor::with_default_env(self.config())
    }
}
