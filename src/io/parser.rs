use crate::core::structure::{Atom, Lattice, Structure};
use anyhow::{anyhow, bail, Context, Result};
use nalgebra::Vector3;
use std::fs;
use std::path::Path;

/// Parses a float field, naming the line it came from on failure.
fn parse_float(s: &str, line_no: usize) -> Result<f64> {
    s.parse::<f64>()
        .with_context(|| format!("Line {}: failed to parse '{}' as float", line_no, s))
}

fn parse_vector(line: &str, line_no: usize) -> Result<Vector3<f64>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        bail!("Line {}: expected three numbers, found '{}'", line_no, line);
    }
    Ok(Vector3::new(
        parse_float(parts[0], line_no)?,
        parse_float(parts[1], line_no)?,
        parse_float(parts[2], line_no)?,
    ))
}

/// Cursor over trimmed lines that reports 1-based line numbers.
struct LineReader<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineReader<'a> {
    fn new(contents: &'a str) -> Self {
        Self {
            lines: contents.lines().map(str::trim).collect(),
            pos: 0,
        }
    }

    fn next(&mut self, what: &str) -> Result<(usize, &'a str)> {
        let line = self
            .lines
            .get(self.pos)
            .copied()
            .ok_or_else(|| anyhow!("Unexpected end of file while reading {}", what))?;
        self.pos += 1;
        Ok((self.pos, line))
    }
}

fn starts_with_any(line: &str, chars: &[char]) -> bool {
    line.chars().next().map_or(false, |c| chars.contains(&c))
}

fn parse_flag(s: &str, line_no: usize) -> Result<bool> {
    match s {
        "T" | "t" => Ok(true),
        "F" | "f" => Ok(false),
        _ => bail!("Line {}: invalid selective dynamics flag '{}'", line_no, s),
    }
}

/// Reads a POSCAR/CONTCAR file into a Structure with Cartesian positions.
pub fn from_poscar(path: &Path) -> Result<Structure> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Could not read POSCAR file: {:?}", path))?;
    parse_poscar(&contents).with_context(|| format!("Invalid POSCAR file: {:?}", path))
}

/// Parses POSCAR text (VASP 4 or 5 layout).
///
/// A negative scale factor is taken as the target cell volume. Files without a
/// species line get placeholder labels `X1`, `X2`, ...
pub fn parse_poscar(contents: &str) -> Result<Structure> {
    let mut reader = LineReader::new(contents);

    // 1. Header
    let (_, comment) = reader.next("comment")?;

    let (line_no, scale_line) = reader.next("scale factor")?;
    let scale_token = scale_line
        .split_whitespace()
        .next()
        .ok_or_else(|| anyhow!("Line {}: missing scale factor", line_no))?;
    let scale = parse_float(scale_token, line_no)?;
    if scale == 0.0 {
        bail!("Line {}: scale factor cannot be zero", line_no);
    }

    // 2. Lattice (rows in the file, columns in the matrix)
    let mut vectors = [Vector3::zeros(); 3];
    for v in vectors.iter_mut() {
        let (line_no, line) = reader.next("lattice vectors")?;
        *v = parse_vector(line, line_no)?;
    }
    let raw = Lattice::from_vectors(vectors[0], vectors[1], vectors[2])
        .context("Invalid lattice vectors")?;
    let factor = if scale > 0.0 {
        scale
    } else {
        (-scale / raw.matrix.determinant().abs()).cbrt()
    };
    let lattice = Lattice::new(raw.matrix * factor).context("Invalid scaled lattice")?;

    // 3. Species & counts
    let (line_no, line) = reader.next("species or counts")?;
    let starts_alpha = line.chars().next().map_or(false, char::is_alphabetic);
    let (species, counts_line, counts_line_no): (Option<Vec<String>>, &str, usize) = if starts_alpha {
        let names = line.split_whitespace().map(|s| s.to_string()).collect();
        let (n, counts) = reader.next("atom counts")?;
        (Some(names), counts, n)
    } else {
        (None, line, line_no)
    };

    let counts: Vec<usize> = counts_line
        .split_whitespace()
        .map(|s| {
            s.parse::<usize>()
                .with_context(|| format!("Line {}: invalid atom count '{}'", counts_line_no, s))
        })
        .collect::<Result<_>>()?;
    if counts.is_empty() {
        bail!("Line {}: no atom counts found", counts_line_no);
    }

    let species: Vec<String> = match species {
        Some(names) => {
            if names.len() != counts.len() {
                bail!(
                    "Line {}: {} species but {} counts",
                    counts_line_no,
                    names.len(),
                    counts.len()
                );
            }
            names
        }
        None => (1..=counts.len()).map(|k| format!("X{}", k)).collect(),
    };

    // 4. Coordinate mode
    let (_, mut mode_line) = reader.next("coordinate mode")?;
    let selective = starts_with_any(mode_line, &['S', 's']);
    if selective {
        mode_line = reader.next("coordinate mode")?.1;
    }
    let cartesian = starts_with_any(mode_line, &['C', 'c', 'K', 'k']);

    // 5. Positions
    let total: usize = counts.iter().sum();
    let mut atoms = Vec::with_capacity(total);
    for (element, &count) in species.iter().zip(&counts) {
        for _ in 0..count {
            let (line_no, line) = reader.next("atom positions")?;
            let raw_pos = parse_vector(line, line_no)?;
            let position = if cartesian {
                raw_pos * factor
            } else {
                lattice.to_cartesian(&raw_pos)
            };

            let selective_dynamics = if selective {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() < 6 {
                    bail!("Line {}: missing selective dynamics flags", line_no);
                }
                Some([
                    parse_flag(parts[3], line_no)?,
                    parse_flag(parts[4], line_no)?,
                    parse_flag(parts[5], line_no)?,
                ])
            } else {
                None
            };

            atoms.push(Atom {
                element: element.clone(),
                position,
                selective_dynamics,
            });
        }
    }

    if atoms.is_empty() {
        return Err(anyhow!("No atoms found in POSCAR file."));
    }

    Ok(Structure {
        comment: comment.to_string(),
        lattice,
        atoms,
    })
}
