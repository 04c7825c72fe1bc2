use std::io::Write;
use std::process::ExitStatus;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notify command exited with {status}")]
    CommandFailed { status: ExitStatus },
    #[error("failed to run notify command: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait Notifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

// Runs a user supplied command, e.g. `notify-send restbell {message}`.
pub struct ExecNotifier {
    program: String,
    args: Vec<String>,
}

impl ExecNotifier {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

#[async_trait]
impl Notifier for ExecNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let status = Command::new(&self.program)
            .args(substitute(&self.args, message))
            .status()
            .await?;
        if !status.success() {
            return Err(NotifyError::CommandFailed { status });
        }
        Ok(())
    }
}

// `{message}` in any argument is replaced; without a placeholder the message
// goes last.
fn substitute(args: &[String], message: &str) -> Vec<String> {
    let mut found = false;
    let mut out: Vec<String> = args
        .iter()
        .map(|arg| {
            if arg.contains("{message}") {
                found = true;
                arg.replace("{message}", message)
            } else {
                arg.clone()
            }
        })
        .collect();
    if !found {
        out.push(message.to_string());
    }
    out
}

// Fallback when no command is configured: ring the terminal bell.
pub struct BellNotifier;

#[async_trait]
impl Notifier for BellNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let mut stderr = std::io::stderr();
        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        tracing::debug!("{}", message);
        Ok(())
    }
}
