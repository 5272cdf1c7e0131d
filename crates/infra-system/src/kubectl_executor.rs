// kubectl exec implementation of the CommandExecutor port
// reason: async-trait, tokio for async process management
use async_trait::async_trait;
use std::collections::HashMap;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{info, warn};

use qdprobe_core::port::{CommandExecutor, ExecOutput, ExecRequest, ExecutionError};

use crate::config::KubectlConfig;

/// Environment variables passed through to kubectl by default
pub const DEFAULT_ENV_ALLOWLIST: [&str; 4] = ["PATH", "HOME", "USER", "KUBECONFIG"];

/// Runs commands in a pod through `kubectl exec`
/// The child only sees allowlisted environment variables
pub struct KubectlExecutor {
    config: KubectlConfig,
    env_allowlist: Vec<String>,
}

impl KubectlExecutor {
    /// Create a new kubectl executor
    ///
    /// # Arguments
    /// * `config` - kubectl binary, namespace, container, kubeconfig
    /// * `env_allowlist` - Environment variables the child may inherit
    ///
    /// # Example
    /// ```ignore
    /// let executor = KubectlExecutor::new(
    ///     KubectlConfig::from_env(),
    ///     DEFAULT_ENV_ALLOWLIST.iter().map(|v| v.to_string()).collect(),
    /// );
    /// ```
    pub fn new(config: KubectlConfig, env_allowlist: Vec<String>) -> Self {
        Self {
            config,
            env_allowlist,
        }
    }

    /// Executor with the default environment allowlist
    pub fn with_default_env(config: KubectlConfig) -> Self {
        Self::new(
            config,
            DEFAULT_ENV_ALLOWLIST.iter().map(|v| v.to_string()).collect(),
        )
    }

    pub fn config(&self) -> &KubectlConfig {
        &self.config
    }

    /// `[--kubeconfig K] [--context C] exec <pod> [-n NS] [-c C] -- <command...>`
    pub fn build_args(&self, request: &ExecRequest) -> Vec<String> {
        let mut args = Vec::with_capacity(request.command.len() + 8);

        if let Some(kubeconfig) = &self.config.kubeconfig {
            args.push("--kubeconfig".to_string());
            args.push(kubeconfig.clone());
        }
        if let Some(context) = &self.config.context {
            args.push("--context".to_string());
            args.push(context.clone());
        }

        args.push("exec".to_string());
        args.push(request.pod.clone());

        if let Some(namespace) = &self.config.namespace {
            args.push("-n".to_string());
            args.push(namespace.clone());
        }
        if let Some(container) = &self.config.container {
            args.push("-c".to_string());
            args.push(container.clone());
        }

        args.push("--".to_string());
        args.extend(request.command.iter().cloned());
        args
    }

    /// Filter environment variables to allowlist only
    fn filter_env(&self, env: &HashMap<String, String>) -> HashMap<String, String> {
        env.iter()
            .filter(|(k, _)| self.env_allowlist.contains(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Spawn kubectl and wait for output (bounded by `request.timeout`)
    async fn spawn_and_wait(
        &self,
        args: &[String],
        request: &ExecRequest,
    ) -> Result<std::process::Output, ExecutionError> {
        let parent_env: HashMap<String, String> = std::env::vars().collect();
        let filtered_env = self.filter_env(&parent_env);

        let child = Command::new(&self.config.kubectl)
            .args(args)
            .env_clear()
            .envs(&filtered_env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(!cfg!(unix))
            .spawn()
            .map_err(|e| self.categorize_spawn_error(&e))?;

        let pid = child.id();

        match timeout(request.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(ExecutionError::IoError(e.to_string())),
            Err(_) => {
                warn!(
                    pod = %request.pod,
                    pid = ?pid,
                    timeout_secs = request.timeout.as_secs(),
                    "kubectl exec timed out, terminating"
                );
                if let Some(pid) = pid {
                    terminate(pid);
                }
                Err(ExecutionError::Timeout(request.timeout))
            }
        }
    }

    fn categorize_spawn_error(&self, e: &std::io::Error) -> ExecutionError {
        match e.kind() {
            std::io::ErrorKind::NotFound => {
                ExecutionError::SpawnFailed(format!("{} not found in PATH", self.config.kubectl))
            }
            _ => ExecutionError::SpawnFailed(e.to_string()),
        }
    }
}

/// Ask a timed-out kubectl to exit so it tears down the remote exec session
#[cfg(unix)]
fn terminate(pid: u32) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
        // Already gone
        tracing::debug!(pid = pid, error = %e, "SIGTERM failed");
    }
}

// kill_on_drop handles it
#[cfg(not(unix))]
fn terminate(_pid: u32) {}

#[async_trait]
impl CommandExecutor for KubectlExecutor {
    async fn exec(&self, request: &ExecRequest) -> Result<ExecOutput, ExecutionError> {
        let args = self.build_args(request);
        let start = Instant::now();

        info!(
            kubectl = %self.config.kubectl,
            pod = %request.pod,
            command = ?request.command,
            timeout_secs = request.timeout.as_secs(),
            "Starting kubectl exec"
        );

        let output = self.spawn_and_wait(&args, request).await?;
        let duration_ms = start.elapsed().as_millis() as u64;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        info!(
            pod = %request.pod,
            duration_ms = duration_ms,
            exit_code = ?output.status.code(),
            "kubectl exec completed"
        );

        if !output.status.success() {
            return Err(ExecutionError::CommandFailed {
                exit_code: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(ExecOutput {
            stdout,
            stderr,
            duration_ms,
        })
    }
}
