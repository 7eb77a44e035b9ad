//! High-level floor-plan orchestration: one seeded stream, one grid, every floor.

use tracing::info;

use crate::config::{ConfigError, GeneratorConfig};

use super::grid::TileGrid;
use super::model::FloorPlan;
use super::seed::{RandomStream, SeedChoice, resolve_seed};

mod pipeline;

use pipeline::{FloorContext, generate_floor};

/// Owns a validated configuration and the resolved run seed.
///
/// Generation cannot fail once construction succeeds.
#[derive(Clone, Debug)]
pub struct FloorPlanGenerator {
    config: GeneratorConfig,
    seed: SeedChoice,
}

impl FloorPlanGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = resolve_seed(config.seed);
        Ok(Self { config, seed })
    }

    pub fn seed(&self) -> SeedChoice {
        self.seed
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self) -> FloorPlan {
        let mut stream = RandomStream::new(self.seed.value());
        let mut grid = TileGrid::new(self.config.map_size, self.config.num_floors);

        let floors = (0..self.config.num_floors)
            .map(|floor| {
                generate_floor(&mut FloorContext {
                    config: &self.config,
                    stream: &mut stream,
                    grid: &mut grid,
                    floor,
                })
            })
            .collect();

        let plan = FloorPlan::new(self.seed.value(), grid, floors);
        info!(
            seed = plan.seed(),
            generated_seed = matches!(self.seed, SeedChoice::Generated(_)),
            floors = plan.floor_count(),
            fingerprint = plan.fingerprint(),
            "floor plan generated"
        );
        plan
    }
}
