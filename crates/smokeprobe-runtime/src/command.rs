use smokeprobe_core::{Result, SmokeError};
use tracing::debug;

/// Output from a command execution
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Execute a command and return output regardless of exit code.
///
/// Only a failure to spawn the program (missing binary, no permission) is an
/// error.
pub async fn exec_unchecked(program: &str, args: &[&str]) -> Result<CommandOutput> {
    debug!("Executing: {} {}", program, args.join(" "));

    let output = tokio::process::Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| {
            SmokeError::command_failed(
                format!("{} {}", program, args.join(" ")),
                -1,
                e.to_string(),
            )
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    debug!(
        "Command exited with code {}: {} {}",
        exit_code,
        program,
        args.join(" ")
    );

    Ok(CommandOutput {
        stdout,
        stderr,
        exit_code,
    })
}
