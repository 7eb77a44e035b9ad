pub mod config;
pub mod mapgen;
pub mod types;

pub use config::{ConfigError, GeneratorConfig, MasterRoomConfig};
pub use mapgen::{FloorPlan, FloorPlanGenerator, generate_floor_plan};
pub use types::*;
