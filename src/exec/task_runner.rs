// src/exec/task_runner.rs

//! Script process runner.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::process::{Child, Command};
use tracing::{debug, error, info, warn};

/// A fully resolved script launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptInvocation {
    pub command_id: String,
    pub executable: PathBuf,
    pub args: Vec<String>,
}

/// Start the child process. Returns once the process exists; use
/// [`watch_script`] to observe its completion.
///
/// The child inherits the current process environment.
pub fn spawn_script(inv: &ScriptInvocation) -> Result<Child> {
    info!(
        command_id = %inv.command_id,
        exe = %inv.executable.display(),
        args = ?inv.args,
        "starting script process"
    );

    let child = Command::new(&inv.executable)
        .args(&inv.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawning script {}", inv.executable.display()))?;

    Ok(child)
}

/// Wait for a launched script and log the result. A non-zero exit code is a
/// warning carrying whatever the script wrote to stdout and stderr.
pub async fn watch_script(child: Child, inv: ScriptInvocation) {
    let output = match child.wait_with_output().await {
        Ok(output) => output,
        Err(err) => {
            error!(
                command_id = %inv.command_id,
                exe = %inv.executable.display(),
                error = %err,
                "waiting for script process failed"
            );
            return;
        }
    };

    let code = output.status.code().unwrap_or(-1);
    if output.status.success() {
        debug!(
            command_id = %inv.command_id,
            exe = %inv.executable.display(),
            "script process exited cleanly"
        );
        return;
    }

    warn!(
        command_id = %inv.command_id,
        exe = %inv.executable.display(),
        exit_code = code,
        "command failed with non-zero exit code"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        warn!(command_id = %inv.command_id, "stdout: {}", stdout.trim_end());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        warn!(command_id = %inv.command_id, "stderr: {}", stderr.trim_end());
    }
}
