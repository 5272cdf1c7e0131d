// Command Executor Port
// Abstraction for running a command inside a target container (kubectl exec, docker exec, ...)

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Command to run inside a target pod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    pub pod: String,
    pub command: Vec<String>,
    pub timeout: Duration,
}

impl ExecRequest {
    pub fn new(pod: impl Into<String>, command: Vec<String>, timeout: Duration) -> Self {
        Self {
            pod: pod.into(),
            command,
            timeout,
        }
    }
}

/// Output of a successful command
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

/// Execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Command timeout after {0:?}")]
    Timeout(Duration),

    #[error("Command failed (exit code {exit_code:?}): {stderr}")]
    CommandFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("IO error: {0}")]
    IoError(String),
}

/// Command Executor trait
///
/// Implementations:
/// - KubectlExecutor (infra-system): `kubectl exec <pod> -- <command>`
/// - MockCommandExecutor: scripted responses for tests
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run a command in the target and return its output
    ///
    /// # Errors
    /// - ExecutionError::SpawnFailed if the exec tool cannot be started
    /// - ExecutionError::Timeout if the command exceeds `request.timeout`
    /// - ExecutionError::CommandFailed if the command exits non-zero
    async fn exec(&self, request: &ExecRequest) -> Result<ExecOutput, ExecutionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Scripted outcome of one exec call
    #[derive(Debug, Clone)]
    pub enum MockResponse {
        /// Succeed with this stdout
        Stdout(String),
        /// Fail with a non-zero exit and this stderr
        Fail(String),
        /// Fail as if the command hung past its timeout
        Timeout,
    }

    /// Mock Command Executor for testing
    ///
    /// Pops scripted responses in order; once the script runs out the last
    /// response is repeated.
    pub struct MockCommandExecutor {
        script: Arc<Mutex<VecDeque<MockResponse>>>,
        last: Arc<Mutex<Option<MockResponse>>>,
        requests: Arc<Mutex<Vec<ExecRequest>>>,
    }

    impl MockCommandExecutor {
        pub fn new(script: Vec<MockResponse>) -> Self {
            Self {
                script: Arc::new(Mutex::new(script.into())),
                last: Arc::new(Mutex::new(None)),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }
        pub fn new_stdout(stdout: impl Into<String>) -> Self {
            Self::new(vec![MockResponse::Stdout(stdout.into())])
        }
        pub fn new_fail(stderr: impl Into<String>) -> Self {
            Self::new(vec![MockResponse::Fail(stderr.into())])
        }
        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
        pub fn requests(&self) -> Vec<ExecRequest> {
            self.requests.lock().unwrap().clone()
        }
        fn next_response(&self) -> Option<MockResponse> {
            let mut last = self.last.lock().unwrap();
            if let Some(next) = self.script.lock().unwrap().pop_front() {
                *last = Some(next);
            }
            last.clone()
        }
    }

    #[async_trait]
    impl CommandExecutor for MockCommandExecutor {
        async fn exec(&self, request: &ExecRequest) -> Result<ExecOutput, ExecutionError> {
            self.requests.lock().unwrap().push(request.clone());

            match self.next_response() {
                Some(MockResponse::Stdout(stdout)) => Ok(ExecOutput {
                    stdout,
                    stderr: String::new(),
                    duration_ms: 1,
                }),
                Some(MockResponse::Fail(stderr)) => Err(ExecutionError::CommandFailed {
                    exit_code: Some(1),
                    stderr,
                }),
                Some(MockResponse::Timeout) => Err(ExecutionError::Timeout(request.timeout)),
                None => Err(ExecutionError::SpawnFailed("no scripted response".to_string())),
            }
        }
    }
}
