//! Per-floor construction: masters, seeding, growth, rasterization, doors.

use tracing::{debug, info_span};

use crate::config::GeneratorConfig;
use crate::types::MasterRoomId;

use super::super::doors::place_doors;
use super::super::grid::TileGrid;
use super::super::layout::{
    SeedingRules, extend_rooms, place_master_rooms, rooms_for_master, seed_rooms,
};
use super::super::model::FloorLayout;
use super::super::raster::rasterize_floor;
use super::super::seed::RandomStream;

pub(super) struct FloorContext<'a> {
    pub(super) config: &'a GeneratorConfig,
    pub(super) stream: &'a mut RandomStream,
    pub(super) grid: &'a mut TileGrid,
    pub(super) floor: usize,
}

pub(super) fn generate_floor(context: &mut FloorContext<'_>) -> FloorLayout {
    let span = info_span!("floor", index = context.floor);
    let _entered = span.enter();

    let mut layout =
        FloorLayout { master_rooms: place_master_rooms(context.config), ..FloorLayout::default() };

    // Every floor replays the run seed, so identical configs give identical floors.
    context.stream.reseed();

    let floor_target = context.config.room_count(context.floor);
    let master_count = layout.master_rooms.len();
    for (index, master) in layout.master_rooms.iter().enumerate() {
        let rules = SeedingRules {
            target: rooms_for_master(floor_target, master_count, index),
            min_room_size: context.config.min_room_size,
            attempts: context.config.seed_attempts,
        };
        let placed = seed_rooms(context.stream, MasterRoomId(index), master, rules, &mut layout.rooms);
        if placed < rules.target {
            debug!(master = index, placed, target = rules.target, "master room under-filled");
        }
    }

    let passes =
        extend_rooms(&layout.master_rooms, &mut layout.rooms, context.config.extension_passes);

    rasterize_floor(context.grid, context.floor, &layout, &context.config.tile_set);
    place_doors(context.stream, context.floor, &mut layout, context.grid);

    debug!(
        masters = layout.master_rooms.len(),
        rooms = layout.rooms.len(),
        doors = layout.doors.len(),
        passes,
        "floor generated"
    );
    layout
}
