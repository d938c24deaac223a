use std::path::Path;
use std::process::{ExitStatus, Stdio};

use crate::error::LaunchError;

/// Abstraction over starting a process and waiting for it, for testability.
///
/// Production code uses [`RealLauncher`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait Launcher: Send + Sync {
    /// Run `cmd` in `cwd`, streaming its output to the job log, and return
    /// the exit code once it finishes.
    async fn launch(&self, cmd: &[String], cwd: &Path) -> Result<i32, LaunchError>;
}

impl<L: Launcher> Launcher for &L {
    async fn launch(&self, cmd: &[String], cwd: &Path) -> Result<i32, LaunchError> {
        (**self).launch(cmd, cwd).await
    }
}

/// Launches real processes and kills the child if the job is aborted
/// (SIGTERM or SIGINT). The job log is this process's console, so the child's
/// stdout and stderr are inherited.
pub struct RealLauncher;

impl Launcher for RealLauncher {
    async fn launch(&self, cmd: &[String], cwd: &Path) -> Result<i32, LaunchError> {
        launch_until(cmd, cwd, aborted()).await
    }
}

/// Run `cmd` in `cwd` until it exits or `abort` resolves, whichever comes
/// first. On abort the child is killed and reaped before returning
/// [`LaunchError::Interrupted`].
pub async fn launch_until(
    cmd: &[String],
    cwd: &Path,
    abort: impl Future<Output = ()>,
) -> Result<i32, LaunchError> {
    let (program, args) = cmd.split_first().ok_or(LaunchError::EmptyCommand)?;

    let mut child = tokio::process::Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| LaunchError::Spawn {
            program: program.clone(),
            source: e,
        })?;

    tokio::select! {
        status = child.wait() => {
            let status = status.map_err(|e| LaunchError::Wait { source: e })?;
            Ok(exit_code(status))
        }
        () = abort => {
            tracing::warn!(program = %program, "job aborted; killing child process");
            // arch-lint: allow(no-error-swallowing) reason="an abort is reported as an interruption even if the kill fails"
            if let Err(e) = child.kill().await {
                tracing::warn!(program = %program, error = %e, "failed to kill child process");
            }
            Err(LaunchError::Interrupted)
        }
    }
}

/// Resolves when the job is aborted (SIGTERM or SIGINT). Never resolves if
/// the handlers can't be installed.
async fn aborted() {
    // arch-lint: allow(no-error-swallowing) reason="without a handler the step still runs to completion"
    if let Err(e) = abort_signal().await {
        tracing::debug!(error = %e, "abort signal handler unavailable");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn abort_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => tracing::info!("received SIGTERM"),
        _ = sigint.recv() => tracing::info!("received SIGINT"),
    }
    Ok(())
}

#[cfg(not(unix))]
async fn abort_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Exit code as a shell would report it: signal-terminated processes map to
/// `128 + signal`.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["/bin/sh".to_owned(), "-c".to_owned(), script.to_owned()]
    }

    #[tokio::test]
    async fn reports_exit_codes() {
        let cwd = std::env::temp_dir();
        assert_eq!(RealLauncher.launch(&sh("exit 0"), &cwd).await.unwrap(), 0);
        assert_eq!(RealLauncher.launch(&sh("exit 3"), &cwd).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn signal_maps_to_shell_code() {
        let cwd = std::env::temp_dir();
        let code = RealLauncher.launch(&sh("kill -9 $$"), &cwd).await.unwrap();
        assert_eq!(code, 137);
    }

    #[tokio::test]
    async fn runs_in_given_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("marker"), "").unwrap();
        let code = RealLauncher
            .launch(&sh("test -f marker"), tmp.path())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn missing_binary_is_spawn_error() {
        let cwd = std::env::temp_dir();
        let result = RealLauncher
            .launch(&["dockstep-no-such-binary".to_owned()], &cwd)
            .await;
        assert!(matches!(result, Err(LaunchError::Spawn { ref program, .. }) if program == "dockstep-no-such-binary"));
    }

    #[tokio::test]
    async fn empty_command_is_rejected() {
        let cwd = std::env::temp_dir();
        assert!(matches!(
            RealLauncher.launch(&[], &cwd).await,
            Err(LaunchError::EmptyCommand)
        ));
    }

    #[tokio::test]
    async fn abort_kills_the_child() {
        let tmp = tempfile::TempDir::new().unwrap();
        let pid_file = tmp.path().join("pid");

        // Fires once the child has recorded its pid.
        let abort = {
            let pid_file = pid_file.clone();
            async move {
                while read_pid(&pid_file).is_none() {
                    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                }
            }
        };

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            launch_until(&sh("echo $$ > pid; exec sleep 30"), tmp.path(), abort),
        )
        .await
        .expect("abort should stop the launch well before sleep ends");

        assert!(matches!(result, Err(LaunchError::Interrupted)));

        let pid = read_pid(&pid_file).unwrap();
        let alive = std::process::Command::new("kill")
            .args(["-0", &pid.to_string()])
            .status()
            .unwrap()
            .success();
        assert!(!alive, "child {pid} still running after abort");
    }

    #[tokio::test]
    async fn completes_when_abort_never_fires() {
        let cwd = std::env::temp_dir();
        let code = launch_until(&sh("exit 4"), &cwd, std::future::pending())
            .await
            .unwrap();
        assert_eq!(code, 4);
    }

    fn read_pid(path: &Path) -> Option<u32> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        content.trim().parse::<u32>().into_iter().next()
    }
}
