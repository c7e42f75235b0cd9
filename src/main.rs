use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slab_vacuum_tool::batch::{self, BatchJob};
use slab_vacuum_tool::io::locate_structure_file;
use slab_vacuum_tool::{
    adjust_vacuum, inspect_vacuum, parser, reposition_atoms, writer, Axis, PlacementMode,
    VacuumConfig,
};

#[derive(Parser)]
#[command(author, version, about = "Slab vacuum layer inspection and adjustment")]
struct Cli {
    /// Minimum gap (Å) counted as a vacuum layer.
    #[arg(long, global = true, default_value_t = 5.0)]
    threshold: f64,

    /// Replace output files that already exist.
    #[arg(long, global = true)]
    overwrite: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reports vacuum layer count, thickness and position.
    Info {
        /// Structure file (defaults to POSCAR, then CONTCAR, in the working directory).
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long, default_value = "z")]
        axis: Axis,
    },

    /// Sets the vacuum thickness along an axis and centers the atoms.
    Adjust {
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        axis: Axis,

        /// New vacuum thickness in Å.
        #[arg(short = 'n', long = "new-vacuum")]
        new_vacuum: f64,
    },

    /// Moves atoms to the top, bottom or center of the cell along an axis.
    Reposition {
        /// top, bottom or center.
        mode: PlacementMode,

        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, default_value = "z")]
        axis: Axis,
    },

    /// Adjusts the vacuum of every file matching a glob pattern.
    Batch {
        /// Glob pattern, e.g. "runs/*/POSCAR".
        pattern: String,

        #[arg(short, long)]
        axis: Axis,

        #[arg(short = 'n', long = "new-vacuum")]
        new_vacuum: f64,

        #[arg(long, default_value = "_vacuum_adjusted")]
        suffix: String,
    },
}

fn input_path(input: Option<PathBuf>) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    locate_structure_file(input.as_deref(), &cwd)
}

fn default_output(input: &Path, name: String) -> PathBuf {
    input.with_file_name(name)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let start_time = Instant::now();

    let config = VacuumConfig::with_threshold(cli.threshold);

    match cli.command {
        Commands::Info { input, axis } => {
            let input = input_path(input)?;
            println!("Reading structure from {:?}...", input);
            let structure = parser::from_poscar(&input)?;

            let summary = inspect_vacuum(&structure, axis, &config)?;
            println!("{}", summary);
        }

        Commands::Adjust { input, output, axis, new_vacuum } => {
            let input = input_path(input)?;
            println!("Reading structure from {:?}...", input);
            let structure = parser::from_poscar(&input)?;
            println!("-> Loaded {} atoms.", structure.atoms.len());

            let (adjusted, report) = adjust_vacuum(structure, axis, new_vacuum, &config)?;
            println!(
                "Current vacuum thickness along the {}-axis is {:.4} Å.",
                axis, report.initial_vacuum
            );
            println!("{}", report);

            let output = output.unwrap_or_else(|| default_output(&input, "POSCAR_vacuum_adjusted".into()));
            println!("Writing output to {:?}...", output);
            writer::to_poscar(&adjusted, &output, cli.overwrite)?;
        }

        Commands::Reposition { mode, input, output, axis } => {
            let input = input_path(input)?;
            println!("Reading structure from {:?}...", input);
            let mut structure = parser::from_poscar(&input)?;

            let report = reposition_atoms(&mut structure, axis, mode, &config)?;
            println!(
                "Moved atoms to {} along the {}-axis (shift {:.4} Å, {} atoms folded).",
                report.mode, axis, report.shift, report.folded_atoms
            );

            let output = output.unwrap_or_else(|| {
                default_output(&input, format!("POSCAR_repositioned_{}_{}", mode, axis))
            });
            println!("Writing output to {:?}...", output);
            writer::to_poscar(&structure, &output, cli.overwrite)?;
        }

        Commands::Batch { pattern, axis, new_vacuum, suffix } => {
            let inputs = batch::collect_inputs(&pattern)?;
            if inputs.is_empty() {
                anyhow::bail!("No files match '{}'.", pattern);
            }
            println!("Adjusting {} structures...", inputs.len());

            let job = BatchJob {
                axis,
                new_vacuum,
                config,
                overwrite: cli.overwrite,
                suffix,
            };
            let outcomes = batch::run_batch(&inputs, &job);

            let mut failures = 0;
            for outcome in &outcomes {
                match &outcome.result {
                    Ok(path) => println!("  ok    {:?} -> {:?}", outcome.input, path),
                    Err(e) => {
                        failures += 1;
                        println!("  fail  {:?}: {:#}", outcome.input, e);
                    }
                }
            }
            if failures > 0 {
                anyhow::bail!("{} of {} structures failed.", failures, outcomes.len());
            }
        }
    }

    println!("Done in {:.2?}", start_time.elapsed());
    Ok(())
}
