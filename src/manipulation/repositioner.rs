use crate::analysis::axis::{AxisCoordinateSet, Gap};
use crate::analysis::vacuum::VacuumGapAnalyzer;
use crate::core::config::VacuumConfig;
use crate::core::error::{Result, VacuumError};
use crate::core::structure::{Axis, Structure};
use crate::core::EPSILON;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Target placement of the atom cluster along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    /// Highest atom touches the upper cell boundary.
    Top,
    /// Lowest atom sits at the cell origin.
    Bottom,
    /// Mean coordinate sits at half the cell length.
    Center,
}

impl PlacementMode {
    pub fn label(self) -> &'static str {
        match self {
            PlacementMode::Top => "top",
            PlacementMode::Bottom => "bottom",
            PlacementMode::Center => "center",
        }
    }

    /// Shift that moves coordinates already forming one contiguous block into place.
    fn shift_for(self, coords: &AxisCoordinateSet) -> f64 {
        match self {
            PlacementMode::Top => coords.cell_length() - coords.max(),
            PlacementMode::Bottom => -coords.min(),
            PlacementMode::Center => coords.cell_length() / 2.0 - coords.mean(),
        }
    }
}

impl fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlacementMode {
    type Err = VacuumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "max_bound" => Ok(PlacementMode::Top),
            "bottom" | "min_bound" => Ok(PlacementMode::Bottom),
            "center" | "centre" => Ok(PlacementMode::Center),
            _ => Err(VacuumError::InvalidMode(s.to_string())),
        }
    }
}

/// Which of the two translation strategies was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositionPath {
    /// The cluster was already contiguous; a single shift was applied.
    Continuous,
    /// The cluster wrapped through the boundary and was folded back together first.
    Rejoined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepositionReport {
    pub mode: PlacementMode,
    pub path: RepositionPath,
    /// Shift applied to every atom after any folding.
    pub shift: f64,
    /// Number of atoms moved down by one cell length to rejoin the cluster.
    pub folded_atoms: usize,
}

/// Translates every atom along one axis without changing interatomic distances
/// or the cell.
pub struct StructureRepositioner<'a> {
    structure: &'a mut Structure,
    axis: Axis,
    config: VacuumConfig,
}

impl<'a> StructureRepositioner<'a> {
    pub fn new(structure: &'a mut Structure, axis: Axis, config: &VacuumConfig) -> Result<Self> {
        if !(config.threshold > 0.0) {
            return Err(VacuumError::InvalidThreshold(config.threshold));
        }
        if !structure.lattice.is_axis_aligned(axis) {
            warn!(
                %axis,
                "The cell vector along the {} axis is not parallel to the {}-axis. Proceed with caution.",
                axis,
                axis
            );
        }
        Ok(Self {
            structure,
            axis,
            config: config.clone(),
        })
    }

    /// Moves the atoms to `mode`. A vacuum inside the coordinate range (a
    /// `Middle` cluster wrapped through the boundary) is rejoined first; every
    /// other placement is a single shift.
    ///
    /// A structure without any vacuum layer is moved as one block. More than
    /// one vacuum layer is an error since the cluster boundary is ambiguous.
    pub fn reposition(&mut self, mode: PlacementMode) -> Result<RepositionReport> {
        let analyzer = VacuumGapAnalyzer::new(&*self.structure, self.axis, &self.config)?;

        let gap = match analyzer.vacuum_gap() {
            Ok(gap) => gap,
            Err(VacuumError::NoVacuumLayer { .. }) => {
                warn!(
                    axis = %self.axis,
                    "No vacuum layer found along the {}-axis; moving atoms as a single block.",
                    self.axis
                );
                return self.shift_continuous(mode);
            }
            Err(e) => return Err(e),
        };

        let position = analyzer.locate_vacuum_position()?;
        debug!(axis = %self.axis, %position, %mode, "repositioning atoms");

        // Only an interior vacuum gap splits the cluster across the boundary.
        if gap.wraps {
            self.shift_continuous(mode)
        } else {
            self.rejoin_and_shift(&gap, mode)
        }
    }

    /// Applies the placement shift assuming the atoms already form one block.
    /// Repeating the same mode afterwards yields a zero shift.
    pub fn shift_continuous(&mut self, mode: PlacementMode) -> Result<RepositionReport> {
        let coords = AxisCoordinateSet::new(&*self.structure, self.axis)?;
        let shift = mode.shift_for(&coords);
        self.structure.translate_along(self.axis, shift);

        Ok(RepositionReport {
            mode,
            path: RepositionPath::Continuous,
            shift,
            folded_atoms: 0,
        })
    }

    /// Folds every atom above the vacuum gap down by one cell length so the
    /// cluster is contiguous, then places it. Each atom ends up congruent,
    /// modulo the cell length, to its original position plus the shift.
    fn rejoin_and_shift(&mut self, gap: &Gap, mode: PlacementMode) -> Result<RepositionReport> {
        let idx = self.axis.index();
        let cell_length = self.structure.lattice.axis_length(self.axis);
        let fold_above = gap.lower + EPSILON;

        let mut folded_atoms = 0;
        for atom in &mut self.structure.atoms {
            if atom.position[idx] > fold_above {
                atom.position[idx] -= cell_length;
                folded_atoms += 1;
            }
        }
        debug!(axis = %self.axis, folded_atoms, "rejoined cluster across the periodic boundary");

        let coords = AxisCoordinateSet::new(&*self.structure, self.axis)?;
        let shift = mode.shift_for(&coords);
        self.structure.translate_along(self.axis, shift);

        Ok(RepositionReport {
            mode,
            path: RepositionPath::Rejoined,
            shift,
            folded_atoms,
        })
    }
}
