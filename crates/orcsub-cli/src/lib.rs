//! CLI argument parsing for orcsub.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use orcsub_core::{jobfile, JobError, JobSpec, Memory, WallTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Job(#[from] JobError),
    #[error("Failed to read job file: {0}")]
    JobFile(#[from] jobfile::JobFileError),
}

#[derive(Parser, Debug)]
#[command(name = "orcsub")]
#[command(about = "Submit and run ORCA jobs on SLURM clusters")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the batch script for an input file
    Script {
        #[command(flatten)]
        job: JobArgs,

        /// Write <name>.job next to the input instead of printing
        #[arg(long)]
        write: bool,
    },

    /// Render the batch script and submit it with sbatch
    Submit {
        #[command(flatten)]
        job: JobArgs,
    },

    /// Run orca directly in the current allocation
    Run {
        #[command(flatten)]
        job: JobArgs,

        /// Skip the empty-file sweep after the run
        #[arg(long)]
        keep_empty: bool,
    },

    /// Delete zero-byte files under a directory
    Clean {
        /// Directory to sweep
        #[arg(default_value = ".")]
        dir: Utf8PathBuf,
    },
}

/// Job parameters shared by script/submit/run.
///
/// Precedence: site defaults, then a `--job-file` if given, then
/// individual flags.
#[derive(clap::Args, Debug)]
pub struct JobArgs {
    /// ORCA input file (<name>.inp)
    pub input: Utf8PathBuf,

    /// Saved job file with submission parameters
    #[arg(long)]
    pub job_file: Option<Utf8PathBuf>,

    /// Job name (defaults to the input file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Project id exported as PROJECT
    #[arg(long)]
    pub account: Option<String>,

    /// Environment module providing the orca binary
    #[arg(long)]
    pub module: Option<String>,

    /// Node count
    #[arg(long)]
    pub nodes: Option<u32>,

    /// Task count
    #[arg(long)]
    pub ntasks: Option<u32>,

    /// Cores per task
    #[arg(long)]
    pub cpus_per_task: Option<u32>,

    /// Memory request (SLURM format, e.g. 64G)
    #[arg(long)]
    pub mem: Option<Memory>,

    /// Wall-clock limit (HH:MM:SS)
    #[arg(long)]
    pub time: Option<WallTime>,

    /// Partition list (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub partition: Option<Vec<String>>,

    /// Quality-of-service tier
    #[arg(long)]
    pub qos: Option<String>,
}

impl JobArgs {
    /// Build the job spec this invocation describes.
    pub fn to_spec(&self) -> Result<JobSpec, CliError> {
        let mut spec = match &self.job_file {
            Some(path) => {
                let mut saved = jobfile::load(path)?;
                // The input on the command line wins over the saved one
                let fresh = JobSpec::for_input(self.input.clone())?;
                saved.input = fresh.input;
                saved.name = fresh.name;
                saved
            }
            None => JobSpec::for_input(self.input.clone())?,
        };

        if let Some(name) = &self.name {
            spec.name = name.clone();
        }
        if let Some(account) = &self.account {
            spec.account = account.clone();
        }
        if let Some(module) = &self.module {
            spec.module = module.clone();
        }
        if let Some(nodes) = self.nodes {
            spec.resources.nodes = nodes;
        }
        if let Some(ntasks) = self.ntasks {
            spec.resources.ntasks = ntasks;
        }
        if let Some(cpus) = self.cpus_per_task {
            spec.resources.cpus_per_task = cpus;
        }
        if let Some(mem) = self.mem {
            spec.resources.mem = mem;
        }
        if let Some(time) = self.time {
            spec.resources.time = time;
        }
        if let Some(partitions) = &self.partition {
            spec.resources.partitions = partitions.clone();
        }
        if let Some(qos) = &self.qos {
            spec.resources.qos = qos.clone();
        }

        Ok(spec)
    }
}
