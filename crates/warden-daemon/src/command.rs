use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;
use warden_types::{WardenError, WardenResult};

const MAX_CAPTURE_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct CommandOutput {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    pub fn describe_failure(&self) -> String {
        let code = self
            .status
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".into());
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            format!("exit status {}", code)
        } else {
            format!("exit status {}: {}", code, last_line(stderr))
        }
    }
}

fn last_line(s: &str) -> &str {
    s.lines().last().unwrap_or(s)
}

fn truncate_capture(bytes: &[u8]) -> String {
    let slice = if bytes.len() > MAX_CAPTURE_BYTES {
        &bytes[bytes.len() - MAX_CAPTURE_BYTES..]
    } else {
        bytes
    };
    String::from_utf8_lossy(slice).into_owned()
}

/// Runs `argv[0]` with the remaining arguments, killing it if it outlives
/// `timeout`. A non-zero exit is not an error here; callers inspect the
/// returned status.
pub async fn run_command(
    argv: &[String],
    envs: &[(&str, &str)],
    timeout: Duration,
) -> WardenResult<CommandOutput> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| WardenError::Config("Empty command".into()))?;

    debug!("Running command: {}", argv.join(" "));

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    for (key, value) in envs {
        command.env(key, value);
    }

    let child = command
        .spawn()
        .map_err(|e| WardenError::Io(format!("Failed to spawn '{}': {}", program, e)))?;

    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| WardenError::Io(format!("'{}' timed out after {:?}", program, timeout)))?
        .map_err(|e| WardenError::Io(format!("Failed to wait for '{}': {}", program, e)))?;

    Ok(CommandOutput {
        status: output.status.code(),
        stdout: truncate_capture(&output.stdout),
        stderr: truncate_capture(&output.stderr),
    })
}
