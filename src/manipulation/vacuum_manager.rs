use crate::analysis::vacuum::{VacuumGapAnalyzer, VacuumPosition};
use crate::core::config::VacuumConfig;
use crate::core::error::{Result, VacuumError};
use crate::core::structure::{Axis, Structure};
use crate::manipulation::repositioner::{PlacementMode, StructureRepositioner};
use std::fmt;
use tracing::{info, warn};

/// Outcome of a vacuum adjustment, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentReport {
    pub axis: Axis,
    pub initial_vacuum: f64,
    pub final_vacuum: f64,
    pub cell_length: f64,
}

impl fmt::Display for AdjustmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "--- Vacuum Adjustment Report ---\n\
             • Axis:            {}\n\
             • Initial Vacuum:  {:.4} Å\n\
             • Final Vacuum:    {:.4} Å\n\
             • Cell Length:     {:.4} Å",
            self.axis, self.initial_vacuum, self.final_vacuum, self.cell_length
        )
    }
}

/// Owns a structure and manages its vacuum layer along one axis.
pub struct VacuumLayerManager {
    structure: Structure,
    axis: Axis,
    config: VacuumConfig,
    initial_vacuum: f64,
}

impl VacuumLayerManager {
    pub fn new(structure: Structure, axis: Axis, config: VacuumConfig) -> Result<Self> {
        config.validate()?;
        let initial_vacuum = VacuumGapAnalyzer::new(&structure, axis, &config)?.vacuum_thickness();
        Ok(Self {
            structure,
            axis,
            config,
            initial_vacuum,
        })
    }

    pub fn axis(&self) -> Axis { self.axis }
    pub fn config(&self) -> &VacuumConfig { &self.config }
    pub fn structure(&self) -> &Structure { &self.structure }
    pub fn into_structure(self) -> Structure { self.structure }

    /// Vacuum thickness recorded when the manager was created.
    pub fn initial_vacuum(&self) -> f64 {
        self.initial_vacuum
    }

    fn analyzer(&self) -> Result<VacuumGapAnalyzer> {
        VacuumGapAnalyzer::new(&self.structure, self.axis, &self.config)
    }

    pub fn vacuum_thickness(&self) -> Result<f64> {
        Ok(self.analyzer()?.vacuum_thickness())
    }

    pub fn count_vacuum_layers(&self) -> Result<usize> {
        Ok(self.analyzer()?.count_vacuum_layers())
    }

    pub fn locate_vacuum_position(&self) -> Result<VacuumPosition> {
        self.analyzer()?.locate_vacuum_position()
    }

    /// Fails unless exactly one vacuum layer is present.
    pub fn ensure_single_vacuum_layer(&self) -> Result<()> {
        self.analyzer()?.vacuum_gap().map(|_| ())
    }

    /// Resizes the cell along the axis so the vacuum is `new_vacuum` Å thick and
    /// leaves the atoms centered.
    ///
    /// Atoms are first moved to the bottom, which also rejoins a cluster
    /// wrapped through the boundary; only then is the cell length changed.
    /// The work happens on a copy, so on error the structure is untouched.
    pub fn adjust_vacuum_thickness(&mut self, new_vacuum: f64) -> Result<AdjustmentReport> {
        if !(new_vacuum > 0.0) {
            return Err(VacuumError::InvalidVacuum(new_vacuum));
        }
        if new_vacuum <= self.config.small_vacuum_warning {
            warn!(new_vacuum, "Small vacuum thickness of {} Å requested.", new_vacuum);
        }
        self.ensure_single_vacuum_layer()?;

        let before = self.analyzer()?.measure_thickness();
        let mut staged = self.structure.clone();

        StructureRepositioner::new(&mut staged, self.axis, &self.config)?
            .reposition(PlacementMode::Bottom)?;
        let max_after_bottom = staged
            .axis_coordinates(self.axis)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max);

        let cell_length = max_after_bottom + new_vacuum;
        staged.lattice.set_axis_length(self.axis, cell_length)?;

        // Cluster is contiguous here; center it as one block.
        StructureRepositioner::new(&mut staged, self.axis, &self.config)?
            .shift_continuous(PlacementMode::Center)?;

        let final_vacuum = VacuumGapAnalyzer::new(&staged, self.axis, &self.config)?.measure_thickness();
        self.structure = staged;

        warn!(
            axis = %self.axis,
            "Vacuum layer adjusted. Atoms have been centered along the {}-axis.",
            self.axis
        );
        info!(axis = %self.axis, before, after = final_vacuum, cell_length, "vacuum thickness adjusted");

        Ok(AdjustmentReport {
            axis: self.axis,
            initial_vacuum: before,
            final_vacuum,
            cell_length,
        })
    }
}
