use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Failure to obtain output from an external command.
///
/// Any variant aborts the collection cycle that triggered the command;
/// collectors never consume partial output.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {status}: {stderr}")]
    NonZeroExit {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("`{command}` produced non-UTF-8 output")]
    Utf8 { command: String },
    #[error("`{command}` did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },
}

/// Executes a shell command line and returns its stdout.
///
/// Collectors depend on this trait rather than spawning processes directly,
/// so tests can substitute canned output for the Solaris commands.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str) -> Result<String, CommandError>;
}

/// Production runner: executes the command line through `sh -c` (the
/// collector commands contain pipelines) with a bounded timeout.
pub struct ShellRunner {
    timeout: Duration,
}

impl ShellRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<String, CommandError> {
        debug!(%command, "running shell command");

        let result = tokio::time::timeout(
            self.timeout,
            tokio::process::Command::new("sh")
                .arg("-c")
                .arg(command)
                .kill_on_drop(true)
                .output(),
        )
        .await;

        let output = match result {
            Err(_) => {
                return Err(CommandError::Timeout {
                    command: command.to_string(),
                    timeout: self.timeout,
                })
            }
            Ok(Err(source)) => {
                return Err(CommandError::Spawn {
                    command: command.to_string(),
                    source,
                })
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            return Err(CommandError::NonZeroExit {
                command: command.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| CommandError::Utf8 {
            command: command.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> ShellRunner {
        ShellRunner::new(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn captures_stdout() {
        let out = runner().run("echo hello").await.unwrap();
        assert_eq!(out, "hello\n");
    }

    #[tokio::test]
    async fn runs_pipelines() {
        let out = runner().run("printf 'a\\nb\\n' | wc -l").await.unwrap();
        assert_eq!(out.trim(), "2");
    }

    #[tokio::test]
    async fn nonzero_exit_is_an_error() {
        let err = runner().run("echo oops >&2; exit 3").await.unwrap_err();
        match err {
            CommandError::NonZeroExit { status, stderr, .. } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "oops");
            }
            other => panic!("expected NonZeroExit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_command_times_out() {
        let runner = ShellRunner::new(Duration::from_millis(100));
        let err = runner.run("sleep 5").await.unwrap_err();
        assert!(matches!(err, CommandError::Timeout { .. }));
    }
}
