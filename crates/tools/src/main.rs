use anyhow::{Context, Result, bail};
use clap::Parser;
use floorplan_core::mapgen::SeedChoice;
use floorplan_core::{FloorPlan, FloorPlanGenerator, GeneratorConfig};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Generate and print a multi-floor floor plan", long_about = None)]
struct Args {
    /// TOML generator configuration; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Pin the run seed, overriding the configuration
    #[arg(short, long)]
    seed: Option<i64>,
    /// Override the number of floors
    #[arg(long)]
    floors: Option<usize>,
    /// Print only this floor
    #[arg(long)]
    floor: Option<usize>,
    /// Write the full plan as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}

fn load_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(floors) = args.floors {
        config.num_floors = floors;
    }
    Ok(config)
}

fn print_floor(plan: &FloorPlan, floor: usize) {
    let layout = plan.floor(floor);
    println!(
        "Floor {floor}: {} master rooms, {} rooms, {} doors",
        layout.master_rooms.len(),
        layout.rooms.len(),
        layout.doors.len()
    );
    print!("{}", plan.render_ascii(floor));
    println!();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = load_config(&args)?;
    let generator = FloorPlanGenerator::new(config).context("Invalid generator configuration")?;
    let plan = generator.generate();

    match args.floor {
        Some(floor) if floor >= plan.floor_count() => {
            bail!("Floor {floor} does not exist; the plan has {} floors", plan.floor_count());
        }
        Some(floor) => print_floor(&plan, floor),
        None => (0..plan.floor_count()).for_each(|floor| print_floor(&plan, floor)),
    }

    match generator.seed() {
        SeedChoice::Configured(seed) => println!("Seed: {seed}"),
        SeedChoice::Generated(seed) => println!("Seed: {seed} (generated; pass --seed {seed} to replay)"),
    }
    println!("Fingerprint: {:016x}", plan.fingerprint());

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&plan).context("Failed to serialize floor plan")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write JSON export: {}", path.display()))?;
        info!(path = %path.display(), "wrote JSON export");
    }

    Ok(())
}
