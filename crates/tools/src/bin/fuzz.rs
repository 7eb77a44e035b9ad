use anyhow::{Context, Result, ensure};
use clap::Parser;
use floorplan_core::mapgen::{FloorPlan, rectangles_intersect};
use floorplan_core::{FloorPlanGenerator, GeneratorConfig, MasterRoomConfig};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
}

fn range(rng: &mut ChaCha8Rng, min: i32, max: i32) -> i32 {
    min + (rng.next_u64() % (max - min + 1) as u64) as i32
}

/// One or two master rooms, one per half of the map so they never overlap.
fn random_config(rng: &mut ChaCha8Rng) -> GeneratorConfig {
    let map_size = 2 * range(rng, 12, 32);
    let half = map_size / 2;

    let mut master_rooms = Vec::new();
    for left in [-half, 0] {
        if left == 0 && rng.next_u64() % 2 == 0 {
            break;
        }
        let width = range(rng, 3, half);
        let height = range(rng, 3, map_size);
        master_rooms.push(MasterRoomConfig {
            x: left + range(rng, 0, half - width),
            y: -half + range(rng, 0, map_size - height),
            width,
            height,
        });
    }

    GeneratorConfig {
        seed: (rng.next_u64() >> 1).max(1) as i64,
        num_floors: range(rng, 1, 3) as usize,
        map_size: map_size as usize,
        rooms_per_floor: range(rng, 1, 8) as usize,
        seed_attempts: 500,
        master_rooms,
        ..GeneratorConfig::default()
    }
}

fn check_invariants(plan: &FloorPlan) -> Result<()> {
    for floor in 0..plan.floor_count() {
        let layout = plan.floor(floor);

        for (index, room) in layout.rooms.iter().enumerate() {
            let master = layout.master_of(room);
            ensure!(
                master.rect.contains_rect(room.rect),
                "floor {floor}: room {index} {room:?} escaped {master:?}"
            );
            for other in &layout.rooms[index + 1..] {
                ensure!(
                    !rectangles_intersect(room.rect, other.rect, false)
                        || !rectangles_intersect(other.rect, room.rect, false),
                    "floor {floor}: {room:?} overlaps {other:?}"
                );
            }
        }

        for tile in plan.grid().floor_tiles(floor) {
            ensure!(
                tile.solid == tile.surface.name.is_wall_or_corner(),
                "floor {floor}: solidity disagrees with surface at {:?}",
                tile.position
            );
        }

        ensure!(
            layout.doors.len() == layout.regions.len(),
            "floor {floor}: {} doors but {} regions",
            layout.doors.len(),
            layout.regions.len()
        );
        for region in &layout.regions {
            let door = layout.door(region.door);
            ensure!(
                region.rect.contains_cell(door.position.x, door.position.y),
                "floor {floor}: region {region:?} misses its door"
            );
            let tile = plan.get_tile(door.position.x, door.position.y, floor);
            ensure!(
                !tile.solid && tile.surface.name.as_str() == door.frame_name(),
                "floor {floor}: door {door:?} has no open frame"
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).compact().try_init();

    let args = Args::parse();
    println!("Starting floor-plan fuzz on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for run in 0..args.runs {
        let config = random_config(&mut rng);
        debug!(run, seed = config.seed, map_size = config.map_size, "fuzz case");

        let generator = FloorPlanGenerator::new(config.clone())
            .with_context(|| format!("run {run} drew an invalid config: {config:?}"))?;
        let plan = generator.generate();
        check_invariants(&plan).with_context(|| format!("run {run} with config {config:?}"))?;
        ensure!(
            generator.generate().fingerprint() == plan.fingerprint(),
            "run {run}: regenerating seed {} changed the plan",
            config.seed
        );
    }

    info!(runs = args.runs, "fuzz finished");
    println!("Fuzzing completed successfully.");
    Ok(())
}
