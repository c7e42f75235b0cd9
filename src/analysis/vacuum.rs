use crate::analysis::axis::{AxisCoordinateSet, Gap};
use crate::core::config::VacuumConfig;
use crate::core::error::{Result, VacuumError};
use crate::core::structure::{Axis, Structure};
use crate::core::EPSILON;
use std::fmt;
use tracing::warn;

/// Where the single vacuum layer sits relative to the atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VacuumPosition {
    /// The empty space above the cluster covers most of the cell.
    Top,
    /// The cluster starts close to the cell origin.
    Bottom,
    /// The vacuum lies inside the coordinate range; the atoms straddle the
    /// periodic boundary.
    Middle,
    /// The vacuum is divided between both ends of the cell.
    Split,
}

impl fmt::Display for VacuumPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VacuumPosition::Top => "top",
            VacuumPosition::Bottom => "bottom",
            VacuumPosition::Middle => "middle",
            VacuumPosition::Split => "split",
        })
    }
}

/// Read-only interpretation of the gap sequence along one axis as vacuum layers.
///
/// The analyzer takes a snapshot of the coordinates when it is built; rebuild
/// it after the structure is mutated.
#[derive(Debug, Clone)]
pub struct VacuumGapAnalyzer {
    coords: AxisCoordinateSet,
    config: VacuumConfig,
}

impl VacuumGapAnalyzer {
    pub fn new(structure: &Structure, axis: Axis, config: &VacuumConfig) -> Result<Self> {
        Self::from_coordinate_set(AxisCoordinateSet::new(structure, axis)?, config)
    }

    pub fn from_coordinate_set(coords: AxisCoordinateSet, config: &VacuumConfig) -> Result<Self> {
        if !(config.threshold > 0.0) {
            return Err(VacuumError::InvalidThreshold(config.threshold));
        }
        Ok(Self {
            coords,
            config: config.clone(),
        })
    }

    pub fn coordinates(&self) -> &AxisCoordinateSet {
        &self.coords
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// All gaps, interior and wrap, larger than the threshold.
    pub fn vacuum_gaps(&self) -> Vec<Gap> {
        self.coords
            .gaps()
            .into_iter()
            .filter(|g| g.size - self.config.threshold > EPSILON)
            .collect()
    }

    /// Number of gaps larger than the threshold. Zero is a valid answer for bulk
    /// structures.
    pub fn count_vacuum_layers(&self) -> usize {
        self.vacuum_gaps().len()
    }

    /// Cell length minus the atom span along the axis, i.e. the wrap gap.
    ///
    /// Interior voids are never included, even when they are over threshold.
    pub fn measure_thickness(&self) -> f64 {
        self.coords.wrap_gap().size
    }

    /// Same value as [`measure_thickness`](Self::measure_thickness), warning
    /// when the vacuum is thin or fills nearly the whole cell.
    pub fn vacuum_thickness(&self) -> f64 {
        let thickness = self.measure_thickness();
        let cell_length = self.coords.cell_length();
        let axis = self.coords.axis();

        if thickness <= self.config.thin_vacuum_warning {
            warn!(%axis, thickness, "The vacuum layer thickness along the {}-axis is only {:.4} Å.", axis, thickness);
        }
        if thickness >= cell_length * self.config.dominant_vacuum_ratio {
            warn!(
                %axis,
                thickness,
                cell_length,
                "The vacuum layer thickness along the {}-axis is very close to the cell dimension. Please double-check your structure.",
                axis
            );
        }
        thickness
    }

    /// The one gap over threshold, or the error describing why there is not exactly one.
    pub fn vacuum_gap(&self) -> Result<Gap> {
        let mut gaps = self.vacuum_gaps();
        match gaps.len() {
            1 => Ok(gaps.remove(0)),
            0 => Err(VacuumError::NoVacuumLayer {
                axis: self.coords.axis().to_string(),
                threshold: self.config.threshold,
            }),
            count => Err(VacuumError::MultipleVacuumLayers {
                axis: self.coords.axis().to_string(),
                count,
                threshold: self.config.threshold,
            }),
        }
    }

    /// Classifies the single vacuum layer as top, bottom, middle or split.
    ///
    /// An interior vacuum gap always means the cluster wraps through the cell
    /// boundary (`Middle`). For the wrap gap the end gaps decide: `Top` takes
    /// precedence over `Bottom`, then `Split` when both ends hold at least
    /// `split_threshold`, else `Middle`.
    pub fn locate_vacuum_position(&self) -> Result<VacuumPosition> {
        let gap = self.vacuum_gap()?;
        if !gap.wraps {
            return Ok(VacuumPosition::Middle);
        }

        let cell_length = self.coords.cell_length();
        let bottom_gap = self.coords.min();
        let top_gap = cell_length - self.coords.max();

        if top_gap >= self.config.upper_fraction * cell_length - EPSILON {
            return Ok(VacuumPosition::Top);
        }
        if bottom_gap <= self.config.lower_fraction * cell_length + EPSILON {
            return Ok(VacuumPosition::Bottom);
        }
        let split = self.config.split_threshold - EPSILON;
        if top_gap >= split && bottom_gap >= split {
            warn!(
                top_gap,
                bottom_gap,
                "Vacuum layer is split between the top and bottom of the cell. Top gap: {:.4} Å, bottom gap: {:.4} Å.",
                top_gap,
                bottom_gap
            );
            return Ok(VacuumPosition::Split);
        }
        Ok(VacuumPosition::Middle)
    }
}
