//! JSON persistence for job specs.
//!
//! A directory can pin its submission parameters in a small job file so
//! repeat submissions don't need the full flag set.

use crate::job::JobSpec;
use camino::Utf8Path;
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load a job spec from a JSON job file.
pub fn load(path: &Utf8Path) -> Result<JobSpec, JobFileError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save a job spec as a JSON job file.
pub fn save(spec: &JobSpec, path: &Utf8Path) -> Result<(), JobFileError> {
    let content = serde_json::to_string_pretty(spec)?;
    fs::write(path, content)?;
    Ok(())
}
