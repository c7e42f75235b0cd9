use crate::core::structure::Structure;
use anyhow::{bail, Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;

/// Consecutive runs of identical element labels, in file order.
fn species_runs(structure: &Structure) -> Vec<(&str, usize)> {
    let mut runs: Vec<(&str, usize)> = Vec::new();
    for atom in &structure.atoms {
        match runs.last_mut() {
            Some((element, count)) if *element == atom.element => *count += 1,
            _ => runs.push((atom.element.as_str(), 1)),
        }
    }
    runs
}

fn flag(b: bool) -> &'static str {
    if b { "T" } else { "F" }
}

/// POSCAR rendering of a structure: VASP 5 layout with Direct coordinates.
///
/// Atom order is kept as is; non-adjacent atoms of the same element produce
/// separate species entries.
pub struct Poscar<'a>(pub &'a Structure);

impl fmt::Display for Poscar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let structure = self.0;
        let comment = if structure.comment.is_empty() { "Generated by slab-vacuum" } else { structure.comment.as_str() };

        writeln!(f, "{}", comment)?;
        writeln!(f, "{:>19.14}", 1.0)?;
        for col in 0..3 {
            let v = structure.lattice.matrix.column(col);
            writeln!(f, " {:>21.16} {:>21.16} {:>21.16}", v[0], v[1], v[2])?;
        }

        let runs = species_runs(structure);
        let names: Vec<String> = runs.iter().map(|(e, _)| format!("{:>4}", e)).collect();
        let counts: Vec<String> = runs.iter().map(|(_, n)| format!("{:>4}", n)).collect();
        writeln!(f, "{}", names.join(" "))?;
        writeln!(f, "{}", counts.join(" "))?;

        let selective = structure.has_selective_dynamics();
        if selective {
            writeln!(f, "Selective dynamics")?;
        }
        writeln!(f, "Direct")?;

        for atom in &structure.atoms {
            let frac = structure.lattice.to_fractional(&atom.position);
            write!(f, " {:>19.16} {:>19.16} {:>19.16}", frac.x, frac.y, frac.z)?;
            if selective {
                let flags = atom.selective_dynamics.unwrap_or([true; 3]);
                write!(f, " {:>3} {:>3} {:>3}", flag(flags[0]), flag(flags[1]), flag(flags[2]))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Serializes a structure as POSCAR text.
pub fn format_poscar(structure: &Structure) -> String {
    Poscar(structure).to_string()
}

/// Writes `structure` to `path` as POSCAR. An existing file is only replaced
/// when `overwrite` is set.
pub fn to_poscar(structure: &Structure, path: &Path, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        bail!(
            "The file {:?} already exists. Use --overwrite to replace it.",
            path
        );
    }
    fs::write(path, format_poscar(structure))
        .with_context(|| format!("Could not write POSCAR file: {:?}", path))
}
