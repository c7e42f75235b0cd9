// ============================================================================
// MODULE DECLARATIONS
// ============================================================================
pub mod analysis;
pub mod batch;
pub mod core;
pub mod io;
pub mod manipulation;

// ============================================================================
// RE-EXPORTS (Public API)
// ============================================================================
pub use crate::core::config::VacuumConfig;
pub use crate::core::error::VacuumError;
pub use crate::core::structure::{Atom, Axis, Lattice, Structure};
pub use crate::io::{parser, writer};

pub use crate::analysis::axis::{AxisCoordinateSet, Gap};
pub use crate::analysis::vacuum::{VacuumGapAnalyzer, VacuumPosition};
pub use crate::manipulation::repositioner::{
    PlacementMode, RepositionPath, RepositionReport, StructureRepositioner,
};
pub use crate::manipulation::vacuum_manager::{AdjustmentReport, VacuumLayerManager};

use std::fmt;

// ============================================================================
// HIGH-LEVEL INTERFACE
// ============================================================================

/// Read-only description of the vacuum along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct VacuumSummary {
    pub axis: Axis,
    pub atom_count: usize,
    pub cell_length: f64,
    pub layer_count: usize,
    pub thickness: f64,
    /// Only known when exactly one vacuum layer is present.
    pub position: Option<VacuumPosition>,
}

impl fmt::Display for VacuumSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self
            .position
            .map(|p| p.to_string())
            .unwrap_or_else(|| "undetermined".to_string());
        write!(
            f,
            "--- Vacuum Report ({}-axis) ---\n\
             • Atoms:           {}\n\
             • Cell Length:     {:.4} Å\n\
             • Vacuum Layers:   {}\n\
             • Thickness:       {:.4} Å\n\
             • Position:        {}",
            self.axis, self.atom_count, self.cell_length, self.layer_count, self.thickness, position
        )
    }
}

/// Measures the vacuum along `axis` without touching the structure.
pub fn inspect_vacuum(structure: &Structure, axis: Axis, config: &VacuumConfig) -> Result<VacuumSummary, VacuumError> {
    config.validate()?;
    let analyzer = VacuumGapAnalyzer::new(structure, axis, config)?;
    let layer_count = analyzer.count_vacuum_layers();
    let position = if layer_count == 1 {
        Some(analyzer.locate_vacuum_position()?)
    } else {
        None
    };

    Ok(VacuumSummary {
        axis,
        atom_count: structure.atoms.len(),
        cell_length: analyzer.coordinates().cell_length(),
        layer_count,
        thickness: analyzer.vacuum_thickness(),
        position,
    })
}

/// Resizes the vacuum along `axis` to `new_vacuum` Å and returns the new
/// structure with its report.
pub fn adjust_vacuum(
    structure: Structure,
    axis: Axis,
    new_vacuum: f64,
    config: &VacuumConfig,
) -> Result<(Structure, AdjustmentReport), VacuumError> {
    let mut manager = VacuumLayerManager::new(structure, axis, config.clone())?;
    let report = manager.adjust_vacuum_thickness(new_vacuum)?;
    Ok((manager.into_structure(), report))
}

/// Moves the atoms along `axis` to `mode`, in place.
pub fn reposition_atoms(
    structure: &mut Structure,
    axis: Axis,
    mode: PlacementMode,
    config: &VacuumConfig,
) -> Result<RepositionReport, VacuumError> {
    config.validate()?;
    StructureRepositioner::new(structure, axis, config)?.reposition(mode)
}
