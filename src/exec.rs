//! Subprocess execution with a hard wall-clock timeout.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use wait_timeout::ChildExt;
use which::which;

#[derive(Debug)]
pub struct ExecOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Locate the container runtime on PATH.
pub fn container_runtime_path() -> io::Result<PathBuf> {
    if let Ok(p) = which("docker") {
        return Ok(p);
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        "Docker is required but was not found in PATH.",
    ))
}

/// Run a command with captured output, killing it if the timeout expires.
/// A timeout is reported as an ordinary error; callers decide whether it is
/// fatal.
pub fn run_with_timeout(
    program: &std::path::Path,
    args: &[&str],
    timeout: Duration,
) -> Result<ExecOutput> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn {} with args {:?}", program.display(), args))?;

    let mut stdout_pipe = child.stdout.take();
    let mut stderr_pipe = child.stderr.take();

    let status = match child
        .wait_timeout(timeout)
        .context("failed to wait with timeout")?
    {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(anyhow!(
                "command {} timed out after {:?}",
                program.display(),
                timeout
            ));
        }
    };

    let stdout = read_stream(stdout_pipe.as_mut())?;
    let stderr = read_stream(stderr_pipe.as_mut())?;
    Ok(ExecOutput {
        status,
        stdout,
        stderr,
    })
}

fn read_stream(stream: Option<&mut impl Read>) -> Result<String> {
    let mut buf = String::new();
    if let Some(reader) = stream {
        reader
            .read_to_string(&mut buf)
            .context("failed to read process output")?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_output_of_fast_command() {
        let sh = which::which("sh").expect("sh available in test environment");
        let out = run_with_timeout(&sh, &["-c", "echo hello"], Duration::from_secs(10))
            .expect("command must run");
        assert!(out.status.success());
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn reports_timeout_as_error() {
        let sh = which::which("sh").expect("sh available in test environment");
        let err = run_with_timeout(&sh, &["-c", "sleep 5"], Duration::from_millis(100))
            .expect_err("must time out");
        assert!(err.to_string().contains("timed out"), "got: {err}");
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let missing = std::path::Path::new("/definitely/not/a/binary");
        assert!(run_with_timeout(missing, &[], Duration::from_secs(1)).is_err());
    }
}
