//! Execute the orca binary for one job.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use orcsub_core::JobSpec;
use std::fs::File;
use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum RunError {
    #[error("ORCA_ROOT is not set; load the orca module environment first")]
    ModuleNotLoaded,
    #[error("Input file not found: {0}")]
    MissingInput(Utf8PathBuf),
    #[error("Failed to create log file {path}: {source}")]
    LogFile {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to execute {binary}: {source}")]
    Spawn {
        binary: Utf8PathBuf,
        source: std::io::Error,
    },
}

/// Outcome of one orca invocation.
///
/// The exit code is reported as-is; interpreting it is the caller's
/// problem, the same as the shell scripts this replaces.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Input file the run consumed
    pub input: Utf8PathBuf,

    /// Log file stdout was captured to
    pub log: Utf8PathBuf,

    /// Exit code of the binary (-1 when killed by a signal)
    pub exit_code: i32,

    /// Wall-clock time around the invocation
    pub elapsed: Duration,

    /// When the invocation started
    pub started: DateTime<Utc>,
}

impl RunReport {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Locate the orca binary through the module-provided ORCA_ROOT.
pub fn orca_binary() -> Result<Utf8PathBuf, RunError> {
    let root = std::env::var("ORCA_ROOT").map_err(|_| RunError::ModuleNotLoaded)?;
    Ok(Utf8PathBuf::from(root).join("orca"))
}

/// Run orca over the job input in its workdir.
///
/// stdout goes to `<name>.log`, stderr stays on the parent's stderr so
/// the scheduler's per-job error file picks it up.
pub async fn run(spec: &JobSpec) -> Result<RunReport, RunError> {
    let binary = orca_binary()?;
    run_with_binary(spec, &binary).await
}

/// Same as [`run`] with an explicit binary path. Tests use a stub here.
pub async fn run_with_binary(spec: &JobSpec, binary: &Utf8Path) -> Result<RunReport, RunError> {
    let dir = spec.workdir();
    let input = dir.join(spec.input_name());
    if !input.is_file() {
        return Err(RunError::MissingInput(input));
    }

    let log_path = dir.join(spec.log_file());
    let log = File::create(&log_path).map_err(|source| RunError::LogFile {
        path: log_path.clone(),
        source,
    })?;

    let mut cmd = Command::new(binary.as_str());
    cmd.arg(spec.input_name())
        .current_dir(&dir)
        .env("PROJECT", &spec.account)
        .stdout(Stdio::from(log))
        .stderr(Stdio::inherit());

    debug!(%binary, input = spec.input_name(), log = %log_path, "starting orca");
    let started = Utc::now();
    let timer = Instant::now();

    let status = cmd.status().await.map_err(|source| RunError::Spawn {
        binary: binary.to_owned(),
        source,
    })?;

    let elapsed = timer.elapsed();
    let exit_code = status.code().unwrap_or(-1);
    info!(exit_code, ?elapsed, "orca finished");

    Ok(RunReport {
        input: spec.input.clone(),
        log: log_path,
        exit_code,
        elapsed,
        started,
    })
}
