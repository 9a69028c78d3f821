//! Alias generation through an external program.
//!
//! The program receives the flag key on standard input and must print a JSON
//! array of strings on standard output. One process is spawned per flag and
//! rule.

use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::JoinHandle;

use flag_alias_core::CommandRule;
use tracing::debug;
use wait_timeout::ChildExt;

use crate::error::{AliasError, Result};

/// Runs `rule`'s command for `flag` with `base_dir` as working directory.
///
/// The command string is split on whitespace with no shell interpretation.
/// Standard output and standard error are drained on background threads so
/// a chatty child cannot block on a full pipe.
///
/// # Errors
///
/// - [`AliasError::EmptyCommand`] if the command string is blank.
/// - [`AliasError::CommandSpawn`] if the process cannot be started or its
///   pipes fail.
/// - [`AliasError::Timeout`] if the rule has a deadline and the process is
///   still running when it passes. The process is killed.
/// - [`AliasError::CommandExecution`] on a non-zero exit.
/// - [`AliasError::CommandOutput`] if stdout is not a JSON array of strings.
pub fn run_alias_command(rule: &CommandRule, flag: &str, base_dir: &Path) -> Result<Vec<String>> {
    let argv = rule.argv();
    let Some((program, args)) = argv.split_first() else {
        return Err(AliasError::EmptyCommand {
            flag: flag.to_string(),
        });
    };
    let spawn_error = |source: std::io::Error| AliasError::CommandSpawn {
        command: rule.command.clone(),
        source,
    };

    debug!(command = ?argv, flag = %flag, "Running alias command");
    let mut child = Command::new(program)
        .args(args)
        .current_dir(base_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn_error)?;

    let stdout_thread = child.stdout.take().map(drain);
    let stderr_thread = child.stderr.take().map(drain);

    if let Some(mut stdin) = child.stdin.take() {
        // A child that exits without reading its input closes the pipe early.
        match stdin.write_all(flag.as_bytes()) {
            Err(e) if e.kind() != ErrorKind::BrokenPipe => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(spawn_error(e));
            }
            _ => {}
        }
    }

    let status = match rule.deadline() {
        Some(timeout) => match child.wait_timeout(timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                debug!(
                    command = ?argv,
                    flag = %flag,
                    timeout_secs = timeout.as_secs(),
                    "Alias command timed out, killing process"
                );
                let _ = child.kill();
                let _ = child.wait();
                return Err(AliasError::Timeout {
                    command: rule.command.clone(),
                    flag: flag.to_string(),
                    timeout,
                });
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(spawn_error(e));
            }
        },
        None => child.wait().map_err(spawn_error)?,
    };

    let stdout = collect(stdout_thread).map_err(spawn_error)?;
    let stderr = collect(stderr_thread).unwrap_or_default();
    check_status(rule, flag, status, &stderr)?;

    serde_json::from_slice::<Vec<String>>(&stdout).map_err(|source| AliasError::CommandOutput {
        command: rule.command.clone(),
        flag: flag.to_string(),
        source,
    })
}

fn check_status(rule: &CommandRule, flag: &str, status: ExitStatus, stderr: &[u8]) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    Err(AliasError::CommandExecution {
        command: rule.command.clone(),
        flag: flag.to_string(),
        status,
        stderr: String::from_utf8_lossy(stderr).trim().to_string(),
    })
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<std::io::Result<Vec<u8>>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn collect(handle: Option<JoinHandle<std::io::Result<Vec<u8>>>>) -> std::io::Result<Vec<u8>> {
    match handle {
        Some(handle) => handle
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("output reader thread panicked"))),
        None => Ok(Vec::new()),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::fs;
    use std::time::{Duration, Instant};

    use super::*;

    fn script_rule(dir: &Path, body: &str, timeout: Option<i64>) -> CommandRule {
        fs::write(dir.join("alias.sh"), body).unwrap();
        CommandRule {
            command: "sh alias.sh".to_string(),
            timeout,
        }
    }

    #[test]
    fn test_returns_json_array_from_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let rule = script_rule(dir.path(), "echo '[\"a\",\"b\"]'\n", None);
        assert_eq!(
            run_alias_command(&rule, "my-flag", dir.path()).unwrap(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_flag_key_is_written_to_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let rule = script_rule(
            dir.path(),
            "key=$(cat)\nprintf '[\"%s_alias\",\"%s\"]' \"$key\" \"$key\"\n",
            Some(10),
        );
        assert_eq!(
            run_alias_command(&rule, "beta", dir.path()).unwrap(),
            vec!["beta_alias", "beta"]
        );
    }

    #[test]
    fn test_runs_in_base_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("aliases.json"), "[\"fromFile\"]").unwrap();
        let rule = CommandRule {
            command: "cat aliases.json".to_string(),
            timeout: None,
        };
        assert_eq!(
            run_alias_command(&rule, "x", dir.path()).unwrap(),
            vec!["fromFile"]
        );
    }

    #[test]
    fn test_timeout_kills_process() {
        let dir = tempfile::tempdir().unwrap();
        let rule = script_rule(dir.path(), "exec sleep 30\n", Some(1));

        let started = Instant::now();
        let err = run_alias_command(&rule, "slow", dir.path()).unwrap_err();
        assert!(matches!(
            err,
            AliasError::Timeout { ref flag, timeout, .. }
                if flag == "slow" && timeout == Duration::from_secs(1)
        ));
        assert!(started.elapsed() < Duration::from_secs(20));
    }

    #[test]
    fn test_non_zero_exit_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let rule = script_rule(dir.path(), "echo 'no aliases here' >&2\nexit 3\n", None);

        match run_alias_command(&rule, "gamma", dir.path()).unwrap_err() {
            AliasError::CommandExecution { status, stderr, .. } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "no aliases here");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_json_is_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let rule = script_rule(dir.path(), "echo not-json\n", None);
        assert!(matches!(
            run_alias_command(&rule, "delta", dir.path()),
            Err(AliasError::CommandOutput { .. })
        ));
    }

    #[test]
    fn test_non_string_elements_are_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let rule = script_rule(dir.path(), "echo '[\"ok\", 7]'\n", None);
        assert!(matches!(
            run_alias_command(&rule, "delta", dir.path()),
            Err(AliasError::CommandOutput { .. })
        ));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let rule = CommandRule {
            command: "flag-alias-no-such-program --json".to_string(),
            timeout: None,
        };
        assert!(matches!(
            run_alias_command(&rule, "eps", dir.path()),
            Err(AliasError::CommandSpawn { .. })
        ));
    }

    #[test]
    fn test_blank_command_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let rule = CommandRule {
            command: "  ".to_string(),
            timeout: None,
        };
        assert!(matches!(
            run_alias_command(&rule, "zeta", dir.path()),
            Err(AliasError::EmptyCommand { .. })
        ));
    }
}
