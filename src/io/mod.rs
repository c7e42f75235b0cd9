pub mod parser;
pub mod writer;

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// File names tried, in order, when no input path is given.
pub const DEFAULT_STRUCTURE_FILES: [&str; 2] = ["POSCAR", "CONTCAR"];

/// Returns `explicit` if given and present, otherwise the first of
/// POSCAR/CONTCAR found in `dir`.
pub fn locate_structure_file(explicit: Option<&Path>, dir: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("The file {:?} does not exist.", path);
        }
        return Ok(path.to_path_buf());
    }

    DEFAULT_STRUCTURE_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No POSCAR or CONTCAR found in {:?}. Please specify the input path.",
                dir
            )
        })
}
