use crate::core::error::{Result, VacuumError};
use crate::core::structure::{Axis, Structure};
use crate::core::EPSILON;

/// An empty interval between two neighbouring atoms along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gap {
    /// Coordinate of the atom below the gap.
    pub lower: f64,
    /// Coordinate of the atom above the gap. For the wrap gap this lies one
    /// cell length above the lowest atom.
    pub upper: f64,
    /// Size of the gap in Å.
    pub size: f64,
    /// True for the gap running through the periodic boundary.
    pub wraps: bool,
}

/// Atom coordinates along one cell axis, sorted, together with the axis cell length.
///
/// The axis is treated as a ring of circumference `cell_length`: the n sorted
/// coordinates produce n-1 interior gaps plus one wrap gap from the highest
/// atom back round to the lowest.
#[derive(Debug, Clone)]
pub struct AxisCoordinateSet {
    axis: Axis,
    coords: Vec<f64>,
    cell_length: f64,
}

impl AxisCoordinateSet {
    pub fn new(structure: &Structure, axis: Axis) -> Result<Self> {
        Self::from_coordinates(
            structure.axis_coordinates(axis),
            structure.lattice.axis_length(axis),
            axis,
        )
    }

    pub fn from_coordinates(mut coords: Vec<f64>, cell_length: f64, axis: Axis) -> Result<Self> {
        if coords.is_empty() {
            return Err(VacuumError::InsufficientAtoms { required: 1, found: 0 });
        }
        coords.sort_by(|a, b| a.total_cmp(b));

        let set = Self { axis, coords, cell_length };
        if set.cell_length - set.span() < -EPSILON {
            return Err(VacuumError::SpanExceedsCell {
                axis: axis.to_string(),
                span: set.span(),
                cell_length,
            });
        }
        Ok(set)
    }

    pub fn axis(&self) -> Axis { self.axis }
    pub fn coordinates(&self) -> &[f64] { &self.coords }
    pub fn cell_length(&self) -> f64 { self.cell_length }
    pub fn len(&self) -> usize { self.coords.len() }
    pub fn is_empty(&self) -> bool { self.coords.is_empty() }

    pub fn min(&self) -> f64 {
        self.coords[0]
    }

    pub fn max(&self) -> f64 {
        self.coords[self.coords.len() - 1]
    }

    pub fn span(&self) -> f64 {
        self.max() - self.min()
    }

    pub fn mean(&self) -> f64 {
        self.coords.iter().sum::<f64>() / self.coords.len() as f64
    }

    pub fn median(&self) -> f64 {
        let n = self.coords.len();
        if n % 2 == 1 {
            self.coords[n / 2]
        } else {
            0.5 * (self.coords[n / 2 - 1] + self.coords[n / 2])
        }
    }

    /// Gap from the highest atom, through the periodic boundary, back to the lowest.
    /// Rounding noise below zero is clamped away.
    pub fn wrap_gap(&self) -> Gap {
        let size = (self.cell_length - self.span()).max(0.0);
        Gap {
            lower: self.max(),
            upper: self.min() + self.cell_length,
            size,
            wraps: true,
        }
    }

    /// Interior gaps in ascending coordinate order, followed by exactly one wrap gap.
    pub fn gaps(&self) -> Vec<Gap> {
        let mut gaps: Vec<Gap> = self
            .coords
            .windows(2)
            .map(|w| Gap {
                lower: w[0],
                upper: w[1],
                size: w[1] - w[0],
                wraps: false,
            })
            .collect();
        gaps.push(self.wrap_gap());
        gaps
    }
}
