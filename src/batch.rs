use crate::core::config::VacuumConfig;
use crate::core::structure::Axis;
use crate::io::{parser, writer};
use anyhow::{Context, Result};
use glob::glob;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Vacuum adjustment applied to every file of a batch.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub axis: Axis,
    pub new_vacuum: f64,
    pub config: VacuumConfig,
    pub overwrite: bool,
    /// Appended to each input file name to form the output name.
    pub suffix: String,
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub input: PathBuf,
    pub result: Result<PathBuf>,
}

/// Expands a glob pattern into matching files, sorted.
pub fn collect_inputs(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in glob(pattern).with_context(|| format!("Invalid glob pattern '{}'", pattern))? {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable path: {}", e),
        }
    }
    paths.sort();
    Ok(paths)
}

pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    input.with_file_name(name)
}

fn process_one(input: &Path, job: &BatchJob) -> Result<PathBuf> {
    let structure = parser::from_poscar(input)?;
    let (adjusted, report) = crate::adjust_vacuum(structure, job.axis, job.new_vacuum, &job.config)
        .with_context(|| format!("Vacuum adjustment failed for {:?}", input))?;

    let output = output_path(input, &job.suffix);
    writer::to_poscar(&adjusted, &output, job.overwrite)?;
    info!(
        input = %input.display(),
        before = report.initial_vacuum,
        after = report.final_vacuum,
        "adjusted"
    );
    Ok(output)
}

/// Adjusts every input independently and in parallel. A failure on one file
/// does not stop the others.
pub fn run_batch(inputs: &[PathBuf], job: &BatchJob) -> Vec<BatchOutcome> {
    inputs
        .par_iter()
        .map(|input| BatchOutcome {
            input: input.clone(),
            result: process_one(input, job),
        })
        .collect()
}
