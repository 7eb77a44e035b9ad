//! Door placement, exterior/interior classification, and walkable door regions.

use crate::types::{DoorId, DoorKind, RoomId, TilePos, Wall};

use super::geometry::Rect;
use super::grid::{Surface, TileGrid};
use super::model::{Door, FloorLayout, Region};
use super::seed::RandomStream;

const MAX_DOORS_PER_ROOM: i32 = 3;

/// Draws 0 to 3 doors for every room on `floor` and stamps their frames into
/// the grid. Must run after rasterization so frames replace wall tiles.
///
/// Doors are not de-duplicated and floors are not checked for connectivity: a
/// room may end up with no door, or with two doors on the same wall midpoint.
pub(super) fn place_doors(
    stream: &mut RandomStream,
    floor: usize,
    layout: &mut FloorLayout,
    grid: &mut TileGrid,
) {
    for index in 0..layout.rooms.len() {
        let count = stream.range_inclusive(0, MAX_DOORS_PER_ROOM);
        for _ in 0..count {
            let wall = stream.pick(&Wall::ALL);
            place_door(floor, layout, grid, RoomId(index), wall);
        }
    }
}

pub(super) fn place_door(
    floor: usize,
    layout: &mut FloorLayout,
    grid: &mut TileGrid,
    room: RoomId,
    wall: Wall,
) -> DoorId {
    let room_rect = layout.room(room).rect;
    let master_rect = layout.master_of(layout.room(room)).rect;

    let (x, y) = door_position(room_rect, wall);
    let position = TilePos::new(x, y, floor);
    let kind = classify_door(master_rect, wall, x, y);
    let door = Door { position, kind, wall, rotation: wall.rotation(), room };

    grid.set_surface(position, Surface::new(door.kind_name(), kind.frame(), door.rotation), false);

    let id = DoorId(layout.doors.len());
    layout.doors.push(door);
    layout.regions.push(Region { rect: door_region(x, y, wall), door: id });
    id
}

/// Midpoint of the chosen wall, truncating odd lengths toward the origin corner.
pub fn door_position(room: Rect, wall: Wall) -> (i32, i32) {
    match wall {
        Wall::PosX => (room.last_x(), room.y + room.height / 2),
        Wall::NegX => (room.x, room.y + room.height / 2),
        Wall::PosY => (room.x + room.width / 2, room.last_y()),
        Wall::NegY => (room.x + room.width / 2, room.y),
    }
}

/// Exterior when the door sits on the master room's boundary on the same side.
pub fn classify_door(master: Rect, wall: Wall, x: i32, y: i32) -> DoorKind {
    let on_boundary = match wall {
        Wall::PosX => x == master.last_x(),
        Wall::NegX => x == master.x,
        Wall::PosY => y == master.last_y(),
        Wall::NegY => y == master.y,
    };
    if on_boundary { DoorKind::Exterior } else { DoorKind::Interior }
}

/// Three cells centred on the door, crossing its wall.
pub fn door_region(x: i32, y: i32, wall: Wall) -> Rect {
    if wall.runs_along_x() { Rect::new(x, y - 1, 1, 3) } else { Rect::new(x - 1, y, 3, 1) }
}
