//! Render and parse `#SBATCH` directive blocks.

use once_cell::sync::Lazy;
use orcsub_core::JobSpec;
use regex::Regex;

/// Ordered directive lines for a job.
///
/// The order matches the submission scripts this tool replaces: name and
/// error pattern first, then the allocation shape, then placement.
pub fn directives(spec: &JobSpec) -> Vec<String> {
    let res = &spec.resources;
    vec![
        format!("#SBATCH --job-name={}", spec.name),
        format!("#SBATCH --error={}", spec.error_pattern()),
        format!("#SBATCH --nodes={}", res.nodes),
        format!("#SBATCH --ntasks={}", res.ntasks),
        format!("#SBATCH --cpus-per-task={}", res.cpus_per_task),
        format!("#SBATCH --mem={}", res.mem),
        format!("#SBATCH --time={}", res.time),
        format!("#SBATCH --partition={}", res.partitions.join(",")),
        format!("#SBATCH --qos={}", res.qos),
    ]
}

/// Long-option directive, `=` or whitespace separated.
static DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#SBATCH\s+--([A-Za-z][A-Za-z0-9-]*)(?:[=\s]+(\S.*?))?\s*$").unwrap());

/// Recover (key, value) pairs from the `#SBATCH` lines of a script.
///
/// Non-directive lines are ignored; flag-style directives without a value
/// yield an empty string.
pub fn parse_directives(script: &str) -> Vec<(String, String)> {
    script
        .lines()
        .filter_map(|line| DIRECTIVE.captures(line.trim()))
        .map(|caps| {
            let key = caps[1].to_string();
            let value = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
            (key, value)
        })
        .collect()
}
