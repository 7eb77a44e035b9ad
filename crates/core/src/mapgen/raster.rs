//! Writes one floor's registries into the tile grid.

use crate::types::{Rotation, SurfaceName, TilePos};

use super::geometry::Rect;
use super::grid::{Surface, TileGrid};
use super::model::FloorLayout;

#[derive(Clone, Copy)]
struct OutlineNames {
    wall: SurfaceName,
    corner: SurfaceName,
}

const MASTER_OUTLINE: OutlineNames =
    OutlineNames { wall: SurfaceName::Wall, corner: SurfaceName::Corner };
const ROOM_OUTLINE: OutlineNames =
    OutlineNames { wall: SurfaceName::IntWall, corner: SurfaceName::IntCorner };

/// Floor fill, then master outlines, then room outlines. Later writes win, so
/// a room edge lying on its master's boundary ends up as an interior wall.
pub(super) fn rasterize_floor(
    grid: &mut TileGrid,
    floor: usize,
    layout: &FloorLayout,
    tile_set: &str,
) {
    for master in &layout.master_rooms {
        fill_interior(grid, floor, master.rect, tile_set);
    }
    for master in &layout.master_rooms {
        outline(grid, floor, master.rect, tile_set, MASTER_OUTLINE);
    }
    for room in &layout.rooms {
        outline(grid, floor, room.rect, tile_set, ROOM_OUTLINE);
    }
}

fn fill_interior(grid: &mut TileGrid, floor: usize, rect: Rect, tile_set: &str) {
    for y in rect.y..rect.max_y() {
        for x in rect.x..rect.max_x() {
            let pos = TilePos::new(x, y, floor);
            grid.set_surface(pos, Surface::new(tile_set, SurfaceName::Floor, Rotation::Deg0), false);
            grid.set_ceiling(pos, Surface::new(tile_set, SurfaceName::Ceiling, Rotation::Deg0));
        }
    }
}

fn outline(grid: &mut TileGrid, floor: usize, rect: Rect, tile_set: &str, names: OutlineNames) {
    for y in rect.y..rect.max_y() {
        for x in rect.x..rect.max_x() {
            let Some((name, rotation)) = boundary_surface(rect, x, y, names) else {
                continue;
            };
            let pos = TilePos::new(x, y, floor);
            grid.set_surface(pos, Surface::new(tile_set, name, rotation), true);
            grid.set_ceiling(pos, Surface::new(tile_set, SurfaceName::FloorEdge, rotation));
        }
    }
}

/// Name and facing of the outline piece at `(x, y)`, or `None` for interior cells.
fn boundary_surface(
    rect: Rect,
    x: i32,
    y: i32,
    names: OutlineNames,
) -> Option<(SurfaceName, Rotation)> {
    let min_x = x == rect.x;
    let max_x = x == rect.last_x();
    let min_y = y == rect.y;
    let max_y = y == rect.last_y();

    let corner = match (min_x, max_x, min_y, max_y) {
        (true, _, _, true) => Some(Rotation::Deg0),
        (true, _, true, _) => Some(Rotation::Deg90),
        (_, true, true, _) => Some(Rotation::Deg180),
        (_, true, _, true) => Some(Rotation::Deg270),
        _ => None,
    };
    if let Some(rotation) = corner {
        return Some((names.corner, rotation));
    }

    let edge = if min_y {
        Rotation::Deg180
    } else if max_y {
        Rotation::Deg0
    } else if min_x {
        Rotation::Deg90
    } else if max_x {
        Rotation::Deg270
    } else {
        return None;
    };
    Some((names.wall, edge))
}
