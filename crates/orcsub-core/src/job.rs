//! Job descriptor for a single ORCA run.

use crate::units::{Memory, WallTime};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("Input file must use the .inp extension: {0}")]
    NotAnInputFile(Utf8PathBuf),
    #[error("Input file has no usable name: {0}")]
    NoStem(Utf8PathBuf),
}

/// Resource requests handed to the scheduler.
///
/// Defaults are the site allocation the tool was written for: one node,
/// sixteen single-core tasks, 64G, a day of wall time on comp/short at
/// partner QoS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    /// Node count
    pub nodes: u32,

    /// Task count (ORCA parallelizes across these)
    pub ntasks: u32,

    /// Cores per task
    pub cpus_per_task: u32,

    /// Memory request
    pub mem: Memory,

    /// Wall-clock limit
    pub time: WallTime,

    /// Candidate partitions, in preference order
    pub partitions: Vec<String>,

    /// Quality-of-service tier
    pub qos: String,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            nodes: 1,
            ntasks: 16,
            cpus_per_task: 1,
            mem: "64G".parse().expect("default memory"),
            time: "24:00:00".parse().expect("default wall time"),
            partitions: vec!["comp".to_string(), "short".to_string()],
            qos: "partner".to_string(),
        }
    }
}

/// One ORCA job: an input file plus everything the scheduler needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Job name; derives the log, error, and script file names
    pub name: String,

    /// ORCA input file (`<name>.inp`)
    pub input: Utf8PathBuf,

    /// Project id exported as PROJECT before the module load
    pub account: String,

    /// Environment module that puts orca on the path
    pub module: String,

    /// Scheduler resource requests
    pub resources: Resources,
}

impl JobSpec {
    /// Project id of the original submission environment.
    pub const DEFAULT_ACCOUNT: &'static str = "p2015120004";

    /// Module loaded on the original cluster.
    pub const DEFAULT_MODULE: &'static str = "orca/4.0.1.2";

    /// Build a spec for an input file with default resources.
    ///
    /// The job name is the file stem, so `calc/benzene.inp` becomes job
    /// `benzene` logging to `benzene.log`. Anything but a `.inp` file is
    /// rejected.
    pub fn for_input(input: impl Into<Utf8PathBuf>) -> Result<Self, JobError> {
        let input = input.into();
        if input.extension() != Some("inp") {
            return Err(JobError::NotAnInputFile(input));
        }
        let name = input
            .file_stem()
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| JobError::NoStem(input.clone()))?
            .to_string();

        Ok(Self {
            name,
            input,
            account: Self::DEFAULT_ACCOUNT.to_string(),
            module: Self::DEFAULT_MODULE.to_string(),
            resources: Resources::default(),
        })
    }

    /// Directory the job runs in (where the input lives).
    pub fn workdir(&self) -> Utf8PathBuf {
        match self.input.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
            _ => Utf8PathBuf::from("."),
        }
    }

    /// Input file name as passed on the orca command line.
    pub fn input_name(&self) -> &str {
        self.input.file_name().unwrap_or(self.input.as_str())
    }

    /// Log file receiving orca's stdout, relative to the workdir.
    pub fn log_file(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}.log", self.name))
    }

    /// Per-job stderr pattern handed to the scheduler (`%j` is the job id).
    pub fn error_pattern(&self) -> String {
        format!("{}.%j.err", self.name)
    }

    /// Batch script file name, relative to the workdir.
    pub fn script_file(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}.job", self.name))
    }
}
