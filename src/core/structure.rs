use crate::core::error::{Result, VacuumError};
use nalgebra::{Matrix3, Vector3};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// AXIS
// ============================================================================

/// One of the three cell directions. Selects the diagonal cell entry and the
/// position column an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Axis {
    type Err = VacuumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(VacuumError::InvalidAxis(s.to_string())),
        }
    }
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Cell vectors stored as the columns of `matrix`.
#[derive(Debug, Clone)]
pub struct Lattice {
    pub matrix: Matrix3<f64>,
    pub reciprocal_matrix: Matrix3<f64>,
}

impl Lattice {
    pub fn new(matrix: Matrix3<f64>) -> Result<Self> {
        if matrix.determinant().abs() < 1e-6 {
            return Err(VacuumError::DegenerateLattice);
        }
        let reciprocal_matrix = matrix
            .try_inverse()
            .ok_or(VacuumError::DegenerateLattice)?
            .transpose();
        Ok(Self {
            matrix,
            reciprocal_matrix,
        })
    }

    /// Builds a lattice from the three cell vectors `a`, `b`, `c`.
    pub fn from_vectors(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> Result<Self> {
        Self::new(Matrix3::from_columns(&[a, b, c]))
    }

    /// Orthorhombic box with the given edge lengths.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Result<Self> {
        Self::new(Matrix3::from_diagonal(&Vector3::new(a, b, c)))
    }

    pub fn vector(&self, axis: Axis) -> Vector3<f64> {
        self.matrix.column(axis.index()).into_owned()
    }

    /// Diagonal cell entry for `axis`, the only cell length the vacuum engine reads.
    pub fn axis_length(&self, axis: Axis) -> f64 {
        self.matrix[(axis.index(), axis.index())]
    }

    /// Rewrites the diagonal entry for `axis` and refreshes the reciprocal matrix.
    pub fn set_axis_length(&mut self, axis: Axis, length: f64) -> Result<()> {
        let mut matrix = self.matrix;
        matrix[(axis.index(), axis.index())] = length;
        *self = Self::new(matrix)?;
        Ok(())
    }

    /// True when the cell vector for `axis` has no off-axis component.
    pub fn is_axis_aligned(&self, axis: Axis) -> bool {
        let v = self.vector(axis);
        (0..3)
            .filter(|&i| i != axis.index())
            .all(|i| v[i].abs() < 1e-10)
    }

    pub fn to_cartesian(&self, frac: &Vector3<f64>) -> Vector3<f64> { self.matrix * frac }
    pub fn to_fractional(&self, cart: &Vector3<f64>) -> Vector3<f64> { self.reciprocal_matrix.transpose() * cart }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: String,
    /// Cartesian position in Å.
    pub position: Vector3<f64>,
    /// Per-direction "may move" flags carried through from the input file.
    pub selective_dynamics: Option<[bool; 3]>,
}

impl Atom {
    pub fn new(element: impl Into<String>, position: Vector3<f64>) -> Self {
        Self {
            element: element.into(),
            position,
            selective_dynamics: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Structure {
    pub comment: String,
    pub lattice: Lattice,
    pub atoms: Vec<Atom>,
}

impl Structure {
    pub fn new(lattice: Lattice, atoms: Vec<Atom>) -> Self {
        Self {
            comment: String::new(),
            lattice,
            atoms,
        }
    }

    /// Coordinates of every atom along `axis`, in file order.
    pub fn axis_coordinates(&self, axis: Axis) -> Vec<f64> {
        self.atoms.iter().map(|a| a.position[axis.index()]).collect()
    }

    /// Adds `shift` to every atom's coordinate along `axis`.
    pub fn translate_along(&mut self, axis: Axis, shift: f64) {
        for atom in &mut self.atoms {
            atom.position[axis.index()] += shift;
        }
    }

    pub fn has_selective_dynamics(&self) -> bool {
        self.atoms.iter().any(|a| a.selective_dynamics.is_some())
    }
}
