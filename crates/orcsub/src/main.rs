//! orcsub - submit and run ORCA jobs under SLURM.

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use orcsub_cli::{Args, Command};
use orcsub_runner::{run, sweep_empty_files};
use orcsub_slurm::{batch_script, submit};
use std::fs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Script { job, write } => {
            let spec = job.to_spec().into_diagnostic()?;
            let script = batch_script(&spec);
            if write {
                let path = spec.workdir().join(spec.script_file());
                fs::write(&path, script).into_diagnostic()?;
                println!("{path}");
            } else {
                print!("{script}");
            }
        }

        Command::Submit { job } => {
            let spec = job.to_spec().into_diagnostic()?;
            let job_id = submit(&spec).await.into_diagnostic()?;
            println!("Submitted batch job {job_id}");
        }

        Command::Run { job, keep_empty } => {
            let spec = job.to_spec().into_diagnostic()?;
            let report = run(&spec).await.into_diagnostic()?;
            info!(
                input = %report.input,
                log = %report.log,
                elapsed_secs = report.elapsed.as_secs(),
                "run finished"
            );

            // The sweep happens whether or not orca succeeded, matching
            // the submission scripts this replaces.
            if keep_empty {
                warn!("skipping empty-file sweep");
            } else {
                let swept = sweep_empty_files(&spec.workdir()).into_diagnostic()?;
                info!(removed = swept.removed.len(), "swept empty files");
            }

            if !report.success() {
                std::process::exit(report.exit_code);
            }
        }

        Command::Clean { dir } => {
            let report = sweep_empty_files(&dir).into_diagnostic()?;
            for path in &report.removed {
                println!("{path}");
            }
            info!(removed = report.removed.len(), dir = %dir, "swept empty files");
        }
    }

    Ok(())
}
