use slab_vacuum_tool::{
    adjust_vacuum, inspect_vacuum, parser, reposition_atoms, writer, Axis, PlacementMode,
    VacuumConfig, VacuumError, VacuumPosition,
};
use std::path::PathBuf;

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("sample_inputs").join(name)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_inspect_all_samples() {
    // (file, axis, layers, thickness, position)
    let cases = vec![
        ("POSCAR_graphene_z", Axis::Z, 1, 20.0, Some(VacuumPosition::Top)),
        ("POSCAR_five_layers", Axis::Z, 1, 12.0, Some(VacuumPosition::Bottom)),
        ("POSCAR_split_slab", Axis::Z, 1, 2.0, Some(VacuumPosition::Middle)),
        ("POSCAR_two_slabs", Axis::Z, 2, 11.0, None),
        ("POSCAR_bulk", Axis::Z, 0, 1.5, None),
        ("POSCAR_slab_x", Axis::X, 1, 20.5, Some(VacuumPosition::Split)),
    ];

    let config = VacuumConfig::default();
    for (name, axis, layers, thickness, position) in cases {
        let path = sample(name);
        println!("Testing: {:?}", path);
        assert!(path.exists(), "Test file not found: {:?}", path);

        let structure = parser::from_poscar(&path).expect("Failed to parse POSCAR");
        let summary = inspect_vacuum(&structure, axis, &config).expect("Failed to inspect vacuum");

        assert_eq!(summary.layer_count, layers, "layer count for {}", name);
        assert_close(summary.thickness, thickness);
        assert_eq!(summary.position, position, "position for {}", name);
        assert!(!summary.to_string().is_empty());
    }
}

#[test]
fn test_adjust_single_layer_samples() {
    let inputs = vec![
        ("POSCAR_graphene_z", Axis::Z),
        ("POSCAR_five_layers", Axis::Z),
        ("POSCAR_split_slab", Axis::Z),
        ("POSCAR_slab_x", Axis::X),
    ];
    let config = VacuumConfig::default();

    for (name, axis) in inputs {
        let structure = parser::from_poscar(&sample(name)).expect("Failed to parse POSCAR");
        let n_atoms = structure.atoms.len();

        let (adjusted, report) =
            adjust_vacuum(structure, axis, 15.0, &config).expect("Failed to adjust vacuum");

        assert_eq!(adjusted.atoms.len(), n_atoms);
        assert_close(report.final_vacuum, 15.0);

        let summary = inspect_vacuum(&adjusted, axis, &config).unwrap();
        assert_close(summary.thickness, 15.0);
        assert_close(summary.cell_length, report.cell_length);
        println!("{}", report);
    }
}

#[test]
fn test_multi_layer_and_bulk_samples_are_refused() {
    let config = VacuumConfig::default();

    let two = parser::from_poscar(&sample("POSCAR_two_slabs")).unwrap();
    let err = adjust_vacuum(two, Axis::Z, 15.0, &config).unwrap_err();
    assert!(matches!(err, VacuumError::MultipleVacuumLayers { count: 2, .. }));

    let bulk = parser::from_poscar(&sample("POSCAR_bulk")).unwrap();
    let err = adjust_vacuum(bulk, Axis::Z, 15.0, &config).unwrap_err();
    assert!(matches!(err, VacuumError::NoVacuumLayer { .. }));
}

#[test]
fn test_adjusted_structure_survives_write_and_read() {
    let dir = tempfile::tempdir().unwrap();
    let config = VacuumConfig::default();

    let structure = parser::from_poscar(&sample("POSCAR_split_slab")).unwrap();
    let (adjusted, _) = adjust_vacuum(structure, Axis::Z, 10.0, &config).unwrap();

    let out = dir.path().join("POSCAR_vacuum_adjusted");
    writer::to_poscar(&adjusted, &out, false).unwrap();
    let reread = parser::from_poscar(&out).unwrap();

    assert_eq!(reread.comment, adjusted.comment);
    assert_eq!(reread.atoms.len(), 4);
    for (a, b) in reread.atoms.iter().zip(&adjusted.atoms) {
        assert_eq!(a.element, b.element);
        assert_eq!(a.selective_dynamics, b.selective_dynamics);
        assert!((a.position - b.position).norm() < 1e-8);
    }
    assert_close(inspect_vacuum(&reread, Axis::Z, &config).unwrap().thickness, 10.0);

    // Second write without overwrite must be refused.
    assert!(writer::to_poscar(&adjusted, &out, false).is_err());
    assert!(writer::to_poscar(&adjusted, &out, true).is_ok());
}

#[test]
fn test_reposition_split_sample_to_top() {
    let config = VacuumConfig::default();
    let mut structure = parser::from_poscar(&sample("POSCAR_split_slab")).unwrap();

    let report = reposition_atoms(&mut structure, Axis::Z, PlacementMode::Top, &config).unwrap();
    assert_eq!(report.folded_atoms, 2);
    assert_close(report.shift, 18.0);

    let z: Vec<f64> = structure.axis_coordinates(Axis::Z);
    for (actual, expected) in z.iter().zip([19.0, 20.0, 16.0, 17.0]) {
        assert_close(*actual, expected);
    }
}
