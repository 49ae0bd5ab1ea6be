//! Submit batch scripts through sbatch.

use crate::script::batch_script;
use camino::Utf8PathBuf;
use orcsub_core::JobSpec;
use std::fs;
use thiserror::Error;
use tokio::process::Command;
use tracing::info;

#[derive(Error, Debug)]
pub enum SbatchError {
    #[error("Failed to write batch script {path}: {source}")]
    WriteScript {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to execute sbatch: {0}")]
    ExecutionError(String),
    #[error("sbatch rejected the job: {0}")]
    Rejected(String),
    #[error("Unexpected sbatch acknowledgement: {0}")]
    ParseError(String),
}

/// Parse the job id out of sbatch's acknowledgement line
/// ("Submitted batch job 12345").
pub fn parse_job_id(output: &str) -> Option<u64> {
    let marker = "batch job ";
    let idx = output.find(marker)?;
    output[idx + marker.len()..]
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}

/// Write the batch script into the job's workdir and submit it.
///
/// Returns the scheduler-assigned job id. A non-zero sbatch exit surfaces
/// its stderr verbatim.
pub async fn submit(spec: &JobSpec) -> Result<u64, SbatchError> {
    let dir = spec.workdir();
    let script_path = dir.join(spec.script_file());
    fs::write(&script_path, batch_script(spec)).map_err(|source| SbatchError::WriteScript {
        path: script_path.clone(),
        source,
    })?;

    let mut cmd = Command::new("sbatch");
    cmd.arg(spec.script_file().as_str()).current_dir(&dir);

    let output = cmd
        .output()
        .await
        .map_err(|e| SbatchError::ExecutionError(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SbatchError::Rejected(stderr.trim().to_string()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let job_id = parse_job_id(&stdout)
        .ok_or_else(|| SbatchError::ParseError(stdout.trim().to_string()))?;

    info!(job_id, script = %script_path, "submitted batch job");
    Ok(job_id)
}
