use crate::swap::{DirectorySwapper, FolderOps, StdFolders, SwapError, SwapReport};
use log::{debug, info, warn};
use regex::Regex;
use std::io;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use sysinfo::{Pid, ProcessStatus, System};
use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Invalid process name '{0}'")]
    InvalidName(String),
    #[error("Timed out after {}s waiting for {name} to exit", .timeout.as_secs())]
    StopTimeout { name: String, timeout: Duration },
    #[error("Failed to start {name}: {source}")]
    Start {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("Starting {name} exited with {status}")]
    StartStatus { name: String, status: String },
}

pub type Result<T> = std::result::Result<T, ProcessError>;

/// Upper-case the image name and make sure it carries an `.EXE` suffix (`excel` -> `EXCEL.EXE`)
pub fn normalize_process_name(name: &str) -> String {
    let upper = name.trim().to_uppercase();
    if upper.ends_with(".EXE") {
        upper
    } else {
        format!("{}.EXE", upper)
    }
}

/// Reject anything that is not a plain program name before it reaches a shell
pub fn check_process_name(name: &str) -> Result<()> {
    let re = Regex::new(r"^[A-Za-z0-9_. -]+$")
        .map_err(|_| ProcessError::InvalidName(name.to_string()))?;
    if name.trim().is_empty() || !re.is_match(name) {
        return Err(ProcessError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Find, stop and start a host application by name
pub trait ProcessControl {
    /// Stop every matching process and wait up to `timeout` for them to exit.
    /// Returns how many were stopped; zero means none were running.
    fn stop(&self, name: &str, timeout: Duration) -> Result<usize>;

    fn start(&self, name: &str) -> Result<()>;
}

/// When a stop that began now gives up. `None` if `timeout` overflows `Instant`; the wait is then unbounded.
fn stop_deadline(timeout: Duration) -> Option<Instant> {
    Instant::now().checked_add(timeout)
}

pub struct SystemProcesses;

impl SystemProcesses {
    /// A zombie has exited, it only waits for its parent to reap it
    fn is_gone(system: &System, pid: Pid) -> bool {
        system
            .process(pid)
            .map_or(true, |process| process.status() == ProcessStatus::Zombie)
    }

    fn matching_pids(system: &System, target: &str) -> Vec<Pid> {
        system
            .processes()
            .iter()
            .filter(|(_, process)| {
                normalize_process_name(&process.name().to_string_lossy()) == target
            })
            .map(|(pid, _)| *pid)
            .collect()
    }
}

impl ProcessControl for SystemProcesses {
    fn stop(&self, name: &str, timeout: Duration) -> Result<usize> {
        let target = normalize_process_name(name);
        let mut system = System::new_all();
        let pids = Self::matching_pids(&system, &target);

        if pids.is_empty() {
            debug!("{} is not running, nothing to stop", target);
            return Ok(0);
        }

        for pid in &pids {
            if let Some(process) = system.process(*pid) {
                debug!("Killing {} (pid {})", target, pid.as_u32());
                if !process.kill() {
                    warn!("Kill signal for pid {} was not delivered", pid.as_u32());
                }
            }
        }

        // The kill is asynchronous; poll until every pid is gone or the deadline passes
        let deadline = stop_deadline(timeout);
        loop {
            system.refresh_all();
            if pids.iter().all(|pid| Self::is_gone(&system, *pid)) {
                info!("Stopped {} instance(s) of {}", pids.len(), target);
                return Ok(pids.len());
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return Err(ProcessError::StopTimeout {
                    name: target,
                    timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn start(&self, name: &str) -> Result<()> {
        check_process_name(name)?;
        info!("Starting {}", name);

        // RUST LEARNING: `#[cfg(windows)]` only compiles this block on Windows targets
        #[cfg(windows)]
        {
            let status = Command::new("cmd")
                .args(["/C", "start", "", name])
                .stdin(Stdio::null())
                .status()
                .map_err(|source| ProcessError::Start {
                    name: name.to_string(),
                    source,
                })?;
            if !status.success() {
                return Err(ProcessError::StartStatus {
                    name: name.to_string(),
                    status: status.to_string(),
                });
            }
        }

        #[cfg(not(windows))]
        {
            Command::new(name)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .map_err(|source| ProcessError::Start {
                    name: name.to_string(),
                    source,
                })?;
        }

        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error("Could not stop the host application: {0}")]
    Stop(#[source] ProcessError),
    #[error(transparent)]
    Swap(#[from] SwapError),
    #[error("Swapped in '{}', but restarting failed: {source}", .report.promoted)]
    Restart {
        report: SwapReport,
        #[source]
        source: ProcessError,
    },
}

/// Stops the host application, swaps folders, then restarts it
pub struct ProcessCoordinator<'a, F: FolderOps = StdFolders, P: ProcessControl = SystemProcesses>
{
    swapper: DirectorySwapper<'a, F>,
    processes: P,
    stop_timeout: Duration,
}

impl<'a, F: FolderOps, P: ProcessControl> ProcessCoordinator<'a, F, P> {
    pub fn new(swapper: DirectorySwapper<'a, F>, processes: P, stop_timeout: Duration) -> Self {
        Self {
            swapper,
            processes,
            stop_timeout,
        }
    }

    pub fn swapper(&self) -> &DirectorySwapper<'a, F> {
        &self.swapper
    }

    /// Stop, swap, restart, strictly in that order.
    ///
    /// A failed stop aborts before anything is renamed. A failed swap still
    /// restarts the application so the user is not left without it.
    pub fn swap_and_restart(
        &self,
        process_name: &str,
        incoming: &str,
    ) -> std::result::Result<SwapReport, CoordinatorError> {
        check_process_name(process_name).map_err(CoordinatorError::Stop)?;

        let stopped = self
            .processes
            .stop(process_name, self.stop_timeout)
            .map_err(CoordinatorError::Stop)?;
        debug!("Stop phase complete ({} stopped)", stopped);

        let swapped = self.swapper.swap(incoming);

        let restarted = self.processes.start(process_name);

        match (swapped, restarted) {
            (Ok(report), Ok(())) => Ok(report),
            (Ok(report), Err(source)) => Err(CoordinatorError::Restart { report, source }),
            (Err(err), Ok(())) => Err(err.into()),
            (Err(err), Err(restart_err)) => {
                warn!(
                    "Restarting {} after the failed swap also failed: {}",
                    process_name, restart_err
                );
                Err(err.into())
            }
        }
    }

    pub fn swap_only(&self, incoming: &str) -> std::result::Result<SwapReport, CoordinatorError> {
        Ok(self.swapper.swap(incoming)?)
    }
}
