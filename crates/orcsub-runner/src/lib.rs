//! In-allocation execution for orcsub.
//!
//! Runs the orca binary over one input with the same observable contract
//! as the batch script body, then sweeps zero-byte files.

pub mod cleanup;
pub mod run;

pub use cleanup::{sweep_empty_files, CleanupError, CleanupReport};
pub use run::{orca_binary, run, run_with_binary, RunError, RunReport};

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use orcsub_core::JobSpec;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_then_sweep_end_to_end() {
        // The post-run state the whole tool exists for: log kept, input
        // kept, stale empty file gone.
        let temp = TempDir::new().unwrap();
        let dir = Utf8Path::from_path(temp.path()).unwrap();

        let binary = dir.join("orca");
        fs::write(&binary, "#!/bin/sh\necho \"FINAL SINGLE POINT ENERGY -230.1\"\n").unwrap();
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();

        fs::write(dir.join("name.inp"), "! wB97X-D3\n").unwrap();
        fs::write(dir.join("stale.tmp"), "").unwrap();

        let spec = JobSpec::for_input(dir.join("name.inp")).unwrap();
        let report = run_with_binary(&spec, &binary).await.unwrap();
        assert!(report.success());

        let swept = sweep_empty_files(&spec.workdir()).unwrap();
        assert_eq!(swept.removed, vec![dir.join("stale.tmp")]);

        assert!(dir.join("name.inp").exists());
        let log = fs::read_to_string(dir.join("name.log")).unwrap();
        assert!(log.contains("FINAL SINGLE POINT ENERGY"));
    }
}
