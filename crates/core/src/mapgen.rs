//! Procedural floor-plan generation split into coherent submodules.
//!
//! Each floor runs the same pipeline: master rooms are placed from
//! configuration, rooms are seeded inside them by rejection sampling and grown
//! one cell at a time until they stop, the result is rasterized into the tile
//! grid, and finally doors are cut into room walls.

pub mod geometry;
pub mod grid;
pub mod model;
pub mod seed;

mod doors;
mod generator;
mod layout;
mod raster;

pub use doors::{classify_door, door_position, door_region};
pub use generator::FloorPlanGenerator;
pub use geometry::{Rect, rect_intersects_room, rectangles_intersect, room_is_clear};
pub use grid::{Surface, Tile, TileGrid};
pub use model::{Door, FloorLayout, FloorPlan, MasterRoom, Region, Room};
pub use seed::{RandomStream, SeedChoice};

use crate::config::{ConfigError, GeneratorConfig};

pub fn generate_floor_plan(config: GeneratorConfig) -> Result<FloorPlan, ConfigError> {
    Ok(FloorPlanGenerator::new(config)?.generate())
}
