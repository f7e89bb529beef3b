//! Best-effort hardware probes.
//!
//! A process can be told the wrong architecture: a 32-bit process on
//! 64-bit Windows (WOW64), or an x86-64 binary under a translation layer.
//! These probes ask the system directly. Every failure is logged and
//! reported as `None`; callers fall back to what the process reports.

use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::ProbeSettings;
use crate::env::Environment;
use crate::os::OperatingSystem;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Why a probe command produced no answer.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("probe command is empty")]
    EmptyCommand,

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("`{program}` exited with {status}")]
    Failed { program: String, status: ExitStatus },

    #[error("`{program}` printed nothing")]
    EmptyOutput { program: String },
}

/// Name of the true hardware architecture, if it can be determined.
pub fn system_arch_name(
    os: OperatingSystem,
    env: &impl Environment,
    settings: &ProbeSettings,
) -> Option<String> {
    if !settings.enabled {
        tracing::trace!("probes disabled");
        return None;
    }
    if os == OperatingSystem::Windows {
        return windows_arch_name(env);
    }
    run_probe(&settings.command, settings)
}

/// Kernel release of the running system, if it can be determined.
pub fn os_version(os: OperatingSystem, settings: &ProbeSettings) -> Option<String> {
    if os == OperatingSystem::Windows {
        return None;
    }
    run_probe(&settings.version_command, settings)
}

/// A WOW64 process sees its own architecture in `PROCESSOR_ARCHITECTURE`;
/// the machine's is in `PROCESSOR_ARCHITEW6432`, or failing that the first
/// word of `PROCESSOR_IDENTIFIER` (e.g. `"AMD64 Family 25 Model 33"`).
///
/// Intel CPUs report `"Intel64 Family ..."` there on 32-bit Windows too, so
/// `Intel64` is left unclassified and such hosts fall back to the current
/// platform.
fn windows_arch_name(env: &impl Environment) -> Option<String> {
    if let Some(arch) = env.var("PROCESSOR_ARCHITEW6432") {
        let arch = arch.trim();
        if !arch.is_empty() {
            return Some(arch.to_string());
        }
    }
    let identifier = env.var("PROCESSOR_IDENTIFIER")?;
    let (first, _) = identifier.trim().split_once(char::is_whitespace)?;
    if first.is_empty() {
        return None;
    }
    Some(first.to_string())
}

fn run_probe(command: &[String], settings: &ProbeSettings) -> Option<String> {
    if !settings.enabled {
        tracing::trace!("probes disabled");
        return None;
    }
    let timeout = Duration::from_millis(settings.timeout_ms);
    match run_command(command, timeout) {
        Ok(line) => {
            tracing::debug!(?command, output = %line, "probe succeeded");
            Some(line)
        }
        Err(e) => {
            tracing::debug!(?command, error = %e, "probe failed");
            None
        }
    }
}

/// Run `command` and return the first non-empty line it prints.
///
/// The child is killed if it outlives `timeout`.
pub fn run_command(command: &[String], timeout: Duration) -> Result<String, ProbeError> {
    let (program, args) = command.split_first().ok_or(ProbeError::EmptyCommand)?;
    if program.trim().is_empty() {
        return Err(ProbeError::EmptyCommand);
    }

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ProbeError::Spawn {
            program: program.clone(),
            source,
        })?;

    // Drain stdout while the child runs; a full pipe would stall it.
    let (tx, rx) = mpsc::channel();
    if let Some(mut stdout) = child.stdout.take() {
        thread::spawn(move || {
            let mut output = String::new();
            let result = stdout.read_to_string(&mut output).map(|_| output);
            let _ = tx.send(result);
        });
    }

    let deadline = Instant::now() + timeout;
    let timed_out = |child: &mut std::process::Child| {
        // Already-exited races are harmless here.
        let _ = child.kill();
        let _ = child.wait();
        ProbeError::Timeout {
            program: program.clone(),
            timeout,
        }
    };

    let output = match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ProbeError::Spawn {
                program: program.clone(),
                source,
            });
        }
        Err(mpsc::RecvTimeoutError::Timeout) => return Err(timed_out(&mut child)),
        Err(mpsc::RecvTimeoutError::Disconnected) => String::new(),
    };

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => return Err(timed_out(&mut child)),
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(source) => {
                let _ = child.kill();
                return Err(ProbeError::Spawn {
                    program: program.clone(),
                    source,
                });
            }
        }
    };

    if !status.success() {
        return Err(ProbeError::Failed {
            program: program.clone(),
            status,
        });
    }

    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProbeError::EmptyOutput {
            program: program.clone(),
        })
}
