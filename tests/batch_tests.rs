use slab_vacuum_tool::batch::{collect_inputs, output_path, run_batch, BatchJob};
use slab_vacuum_tool::io::locate_structure_file;
use slab_vacuum_tool::{inspect_vacuum, parser, Axis, VacuumConfig};
use std::fs;
use std::path::{Path, PathBuf};

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("sample_inputs").join(name)
}

fn stage(dir: &Path, sample_name: &str, run: &str) -> PathBuf {
    let run_dir = dir.join(run);
    fs::create_dir_all(&run_dir).unwrap();
    let target = run_dir.join("POSCAR");
    fs::copy(sample(sample_name), &target).unwrap();
    target
}

#[test]
fn batch_adjusts_each_file_independently() {
    let dir = tempfile::tempdir().unwrap();
    stage(dir.path(), "POSCAR_five_layers", "run_a");
    stage(dir.path(), "POSCAR_split_slab", "run_b");
    stage(dir.path(), "POSCAR_two_slabs", "run_c");

    let pattern = format!("{}/*/POSCAR", dir.path().display());
    let inputs = collect_inputs(&pattern).unwrap();
    assert_eq!(inputs.len(), 3);

    let job = BatchJob {
        axis: Axis::Z,
        new_vacuum: 12.5,
        config: VacuumConfig::default(),
        overwrite: false,
        suffix: "_vacuum_adjusted".to_string(),
    };
    let outcomes = run_batch(&inputs, &job);
    assert_eq!(outcomes.len(), 3);

    for outcome in &outcomes {
        let run = outcome.input.parent().unwrap().file_name().unwrap().to_string_lossy().to_string();
        match run.as_str() {
            "run_c" => assert!(outcome.result.is_err(), "two-slab input should fail"),
            _ => {
                let out = outcome.result.as_ref().expect("adjustment should succeed");
                assert!(out.ends_with("POSCAR_vacuum_adjusted"));
                let adjusted = parser::from_poscar(out).unwrap();
                let summary = inspect_vacuum(&adjusted, Axis::Z, &job.config).unwrap();
                assert!((summary.thickness - 12.5).abs() < 1e-6);
            }
        }
    }

    // Re-running without overwrite refuses to replace the outputs.
    let rerun = run_batch(&inputs, &job);
    assert!(rerun.iter().all(|o| o.result.is_err()));
}

#[test]
fn output_name_appends_suffix() {
    let out = output_path(Path::new("calc/POSCAR"), "_vacuum_adjusted");
    assert_eq!(out, PathBuf::from("calc/POSCAR_vacuum_adjusted"));
}

#[test]
fn structure_file_falls_back_to_contcar() {
    let dir = tempfile::tempdir().unwrap();
    assert!(locate_structure_file(None, dir.path()).is_err());

    let contcar = dir.path().join("CONTCAR");
    fs::copy(sample("POSCAR_bulk"), &contcar).unwrap();
    assert_eq!(locate_structure_file(None, dir.path()).unwrap(), contcar);

    let poscar = dir.path().join("POSCAR");
    fs::copy(sample("POSCAR_bulk"), &poscar).unwrap();
    assert_eq!(locate_structure_file(None, dir.path()).unwrap(), poscar);

    let missing = dir.path().join("nope");
    assert!(locate_structure_file(Some(&missing), dir.path()).is_err());
}
