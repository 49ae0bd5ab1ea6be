//! Batch script generation.

use crate::directives::directives;
use orcsub_core::JobSpec;

/// Render the full submission script for a job.
///
/// The body reproduces the submission scripts this tool replaces: export
/// the project id, load the module, run orca with stdout captured to the
/// log (stderr stays on the scheduler's per-job error file), then sweep
/// zero-byte files from the working directory.
pub fn batch_script(spec: &JobSpec) -> String {
    let mut lines = vec!["#!/bin/bash".to_string()];
    lines.extend(directives(spec));
    lines.push(String::new());
    lines.push(format!("export PROJECT={}", spec.account));
    lines.push(format!("module load {}", spec.module));
    lines.push(String::new());
    lines.push(format!(
        "time \"$ORCA_ROOT\"/orca {} > {}",
        spec.input_name(),
        spec.log_file()
    ));
    lines.push("find . -type f -size 0 -delete".to_string());
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_shape() {
        let spec = JobSpec::for_input("name.inp").unwrap();
        let script = batch_script(&spec);

        assert!(script.starts_with("#!/bin/bash\n"));
        assert!(script.contains("#SBATCH --job-name=name"));
        assert!(script.contains("time \"$ORCA_ROOT\"/orca name.inp > name.log"));
        assert!(script.contains("find . -type f -size 0 -delete"));
        assert!(script.ends_with('\n'));
    }

    #[test]
    fn test_project_exported_before_module_load() {
        let spec = JobSpec::for_input("name.inp").unwrap();
        let script = batch_script(&spec);

        let export = script
            .find("export PROJECT=p2015120004")
            .expect("export line");
        let module = script.find("module load orca/4.0.1.2").expect("module line");
        assert!(export < module);
    }

    #[test]
    fn test_invocation_uses_file_names_not_paths() {
        // The script runs in the submit directory, so the command line
        // carries bare file names even for nested inputs.
        let spec = JobSpec::for_input("calcs/benzene.inp").unwrap();
        let script = batch_script(&spec);
        assert!(script.contains("\"$ORCA_ROOT\"/orca benzene.inp > benzene.log"));
    }

    #[test]
    fn test_directives_precede_body() {
        let spec = JobSpec::for_input("name.inp").unwrap();
        let script = batch_script(&spec);
        let last_directive = script.rfind("#SBATCH").unwrap();
        let body = script.find("export PROJECT").unwrap();
        assert!(last_directive < body);
    }
}
