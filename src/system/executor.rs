//! hpilo_cli subprocess executor.
//! Spawns `hpilo_cli --json` for a single iLO method call and returns its stdout.

use tracing::{debug, trace};

use crate::config::types::ToolSettings;
use crate::credentials::Credentials;
use crate::error::IloError;

/// Build an hpilo_cli Command for one method call.
/// Layout: `hpilo_cli -l <login> -p <password> [-t <timeout>] --json <hostname> <method> [args]`
pub fn build_hpilo_command(
    tool: &ToolSettings,
    creds: &Credentials,
    method: &str,
    method_args: &[&str],
) -> std::process::Command {
    let mut cmd = std::process::Command::new(&tool.cli_path);

    cmd.args(["-l", &creds.login, "-p", &creds.password]);
    if let Some(timeout) = tool.timeout {
        cmd.args(["-t", &timeout.to_string()]);
    }
    cmd.arg("--json");
    cmd.arg(&creds.hostname);
    cmd.arg(method);
    cmd.args(method_args);

    cmd
}

/// Arguments of a built command with the password replaced, for logging.
pub fn redacted_args(cmd: &std::process::Command) -> Vec<String> {
    let mut redact_next = false;
    cmd.get_args()
        .map(|arg| {
            let arg = arg.to_string_lossy();
            if redact_next {
                redact_next = false;
                "********".to_string()
            } else {
                redact_next = arg == "-p";
                arg.to_string()
            }
        })
        .collect()
}

/// Execute one iLO method through hpilo_cli and return the raw stdout.
pub async fn run_hpilo_method(
    tool: &ToolSettings,
    creds: &Credentials,
    method: &str,
    method_args: &[&str],
) -> Result<String, IloError> {
    let cmd = build_hpilo_command(tool, creds, method, method_args);

    trace!("Executing: {} {:?}", tool.cli_path, redacted_args(&cmd));
    debug!("Executing: hpilo_cli {} {}", creds.hostname, method);

    let output = tokio::process::Command::from(cmd)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| IloError::Spawn {
            tool: tool.cli_path.clone(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(IloError::CommandFailed(failure_message(&output.stdout, &output.stderr)));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// hpilo_cli prints iLO errors on stderr, but older versions use stdout.
fn failure_message(stdout: &[u8], stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = String::from_utf8_lossy(stdout);
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    "hpilo_cli exited with an error and no output".to_string()
}

/// Verify the management tool can be spawned.
pub async fn check_available(tool: &ToolSettings) -> Result<(), IloError> {
    let output = tokio::process::Command::new(&tool.cli_path)
        .arg("--help")
        .output()
        .await
        .map_err(|e| IloError::Spawn {
            tool: tool.cli_path.clone(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(IloError::CommandFailed(format!(
            "{} --help failed: {}",
            tool.cli_path,
            failure_message(&output.stdout, &output.stderr)
        )));
    }

    Ok(())
}
