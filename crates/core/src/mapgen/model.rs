//! Public data models for generated floor plans: rooms, doors, regions, and the tile grid.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{DoorId, DoorKind, MasterRoomId, Rotation, RoomId, SurfaceName, TilePos, Wall};

use super::geometry::Rect;
use super::grid::{Tile, TileGrid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterRoom {
    pub rect: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub rect: Rect,
    pub master: MasterRoomId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub position: TilePos,
    pub kind: DoorKind,
    pub wall: Wall,
    pub rotation: Rotation,
    pub room: RoomId,
}

impl Door {
    pub fn kind_name(&self) -> &'static str {
        self.kind.kind_name()
    }

    pub fn frame_name(&self) -> &'static str {
        self.kind.frame().as_str()
    }
}

/// Walkable probe rectangle straddling a door opening.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub rect: Rect,
    pub door: DoorId,
}

/// Registries for a single floor. Ids index into the matching `Vec`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorLayout {
    pub master_rooms: Vec<MasterRoom>,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    pub regions: Vec<Region>,
}

impl FloorLayout {
    pub fn master(&self, id: MasterRoomId) -> &MasterRoom {
        &self.master_rooms[id.0]
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    pub fn door(&self, id: DoorId) -> &Door {
        &self.doors[id.0]
    }

    pub fn master_of(&self, room: &Room) -> &MasterRoom {
        self.master(room.master)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorPlan {
    seed: u64,
    grid: TileGrid,
    floors: Vec<FloorLayout>,
}

impl FloorPlan {
    pub(super) fn new(seed: u64, grid: TileGrid, floors: Vec<FloorLayout>) -> Self {
        Self { seed, grid, floors }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn floors(&self) -> &[FloorLayout] {
        &self.floors
    }

    pub fn floor(&self, floor: usize) -> &FloorLayout {
        &self.floors[floor]
    }

    pub fn rooms(&self, floor: usize) -> &[Room] {
        &self.floors[floor].rooms
    }

    pub fn master_rooms(&self, floor: usize) -> &[MasterRoom] {
        &self.floors[floor].master_rooms
    }

    pub fn doors(&self, floor: usize) -> &[Door] {
        &self.floors[floor].doors
    }

    pub fn regions(&self, floor: usize) -> &[Region] {
        &self.floors[floor].regions
    }

    pub fn get_tile(&self, x: i32, y: i32, floor: usize) -> &Tile {
        self.grid.get(x, y, floor)
    }

    pub fn get_tile_at(&self, x: f64, y: f64, floor: usize) -> &Tile {
        self.grid.get_rounded(x, y, floor)
    }

    pub fn is_solid(&self, x: f64, y: f64, floor: usize) -> bool {
        self.grid.is_solid(x, y, floor)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.seed.to_le_bytes());
        bytes.extend((self.grid.size() as u32).to_le_bytes());
        bytes.extend((self.floors.len() as u32).to_le_bytes());

        for layout in &self.floors {
            bytes.extend((layout.master_rooms.len() as u32).to_le_bytes());
            for master in &layout.master_rooms {
                push_rect(&mut bytes, master.rect);
            }
            bytes.extend((layout.rooms.len() as u32).to_le_bytes());
            for room in &layout.rooms {
                push_rect(&mut bytes, room.rect);
                bytes.extend((room.master.0 as u32).to_le_bytes());
            }
            bytes.extend((layout.doors.len() as u32).to_le_bytes());
            for door in &layout.doors {
                bytes.extend(door.position.x.to_le_bytes());
                bytes.extend(door.position.y.to_le_bytes());
                bytes.push(match door.kind {
                    DoorKind::Exterior => 0,
                    DoorKind::Interior => 1,
                });
                bytes.extend(door.rotation.degrees().to_le_bytes());
                bytes.extend((door.room.0 as u32).to_le_bytes());
            }
            bytes.extend((layout.regions.len() as u32).to_le_bytes());
            for region in &layout.regions {
                push_rect(&mut bytes, region.rect);
                bytes.extend((region.door.0 as u32).to_le_bytes());
            }
        }

        for floor in 0..self.grid.floors() {
            for tile in self.grid.floor_tiles(floor) {
                bytes.extend((tile.surface.kind.len() as u32).to_le_bytes());
                bytes.extend(tile.surface.kind.as_bytes());
                bytes.push(tile.surface.name.code());
                bytes.extend(tile.surface.rotation.degrees().to_le_bytes());
                bytes.push(tile.ceiling.name.code());
                bytes.extend(tile.ceiling.rotation.degrees().to_le_bytes());
                bytes.push(u8::from(tile.solid));
            }
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    /// Text dump of one floor, cropped to the tiles that were written.
    ///
    /// Rows run from the highest `y` down so the picture reads like a map.
    pub fn render_ascii(&self, floor: usize) -> String {
        let size = self.grid.size();
        let tiles = self.grid.floor_tiles(floor);
        let written: Vec<(usize, usize)> = tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| !tile.surface.is_empty())
            .map(|(index, _)| (index % size, index / size))
            .collect();
        let Some(min_column) = written.iter().map(|&(column, _)| column).min() else {
            return String::new();
        };
        let max_column = written.iter().map(|&(column, _)| column).max().unwrap_or(min_column);
        let min_row = written.iter().map(|&(_, row)| row).min().unwrap_or(0);
        let max_row = written.iter().map(|&(_, row)| row).max().unwrap_or(min_row);

        let mut out = String::new();
        for row in (min_row..=max_row).rev() {
            for column in min_column..=max_column {
                out.push(ascii_glyph(&tiles[row * size + column]));
            }
            out.push('\n');
        }
        out
    }
}

fn push_rect(bytes: &mut Vec<u8>, rect: Rect) {
    bytes.extend(rect.x.to_le_bytes());
    bytes.extend(rect.y.to_le_bytes());
    bytes.extend(rect.width.to_le_bytes());
    bytes.extend(rect.height.to_le_bytes());
}

fn ascii_glyph(tile: &Tile) -> char {
    match tile.surface.name {
        SurfaceName::Empty => ' ',
        SurfaceName::Floor | SurfaceName::Ceiling | SurfaceName::FloorEdge => '.',
        SurfaceName::Wall | SurfaceName::Corner => '#',
        SurfaceName::IntWall | SurfaceName::IntCorner => '+',
        SurfaceName::DoorFrame => 'D',
        SurfaceName::IntDoorFrame => 'd',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::grid::Surface;

    fn single_floor_plan() -> FloorPlan {
        let mut grid = TileGrid::new(8, 1);
        grid.set_surface(
            TilePos::new(-1, 0, 0),
            Surface::new("a", SurfaceName::Wall, Rotation::Deg90),
            true,
        );
        grid.set_surface(
            TilePos::new(0, 0, 0),
            Surface::new("a", SurfaceName::Floor, Rotation::Deg0),
            false,
        );
        grid.set_surface(
            TilePos::new(1, 1, 0),
            Surface::new("int-door", SurfaceName::IntDoorFrame, Rotation::Deg0),
            false,
        );
        FloorPlan::new(7, grid, vec![FloorLayout::default()])
    }

    #[test]
    fn ascii_dump_crops_to_written_tiles_with_highest_row_first() {
        let plan = single_floor_plan();
        assert_eq!(plan.render_ascii(0), "  d\n#. \n");
    }

    #[test]
    fn fingerprint_tracks_tile_changes() {
        let plan = single_floor_plan();
        let mut changed = plan.clone();
        changed.grid.set_surface(
            TilePos::new(2, 2, 0),
            Surface::new("a", SurfaceName::Corner, Rotation::Deg270),
            true,
        );
        assert_eq!(plan.fingerprint(), single_floor_plan().fingerprint());
        assert_ne!(plan.fingerprint(), changed.fingerprint());
    }

    #[test]
    fn door_exposes_kind_and_frame_names() {
        let door = Door {
            position: TilePos::new(0, 0, 0),
            kind: DoorKind::Interior,
            wall: Wall::PosX,
            rotation: Rotation::Deg270,
            room: RoomId(0),
        };
        assert_eq!(door.kind_name(), "int-door");
        assert_eq!(door.frame_name(), "int-door-frame");
    }
}
