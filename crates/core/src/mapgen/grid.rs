//! Dense tile storage addressed by origin-centred world coordinates.

use serde::{Deserialize, Serialize};

use crate::types::{Rotation, SurfaceName, TilePos};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    /// Texture set, or the door class for door frames.
    pub kind: String,
    pub name: SurfaceName,
    pub rotation: Rotation,
}

impl Surface {
    pub fn new(kind: &str, name: SurfaceName, rotation: Rotation) -> Self {
        Self { kind: kind.to_owned(), name, rotation }
    }

    pub fn is_empty(&self) -> bool {
        self.name == SurfaceName::Empty
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub position: TilePos,
    pub surface: Surface,
    pub ceiling: Surface,
    pub solid: bool,
}

/// `floors` stacked square layers of `size * size` tiles.
///
/// World `(x, y)` maps to column `x + size / 2` and row `y + size / 2`. Every
/// reader and writer goes through `cell_index`, so the shift is
/// applied in exactly one place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    size: usize,
    floors: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(size: usize, floors: usize) -> Self {
        let half = (size / 2) as i32;
        let mut tiles = Vec::with_capacity(size * size * floors);
        for floor in 0..floors {
            for row in 0..size {
                for column in 0..size {
                    tiles.push(Tile {
                        position: TilePos::new(column as i32 - half, row as i32 - half, floor),
                        ..Tile::default()
                    });
                }
            }
        }
        Self { size, floors, tiles }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn floors(&self) -> usize {
        self.floors
    }

    pub fn half(&self) -> i32 {
        (self.size / 2) as i32
    }

    /// Smallest and largest world coordinate on either axis.
    pub fn world_bounds(&self) -> (i32, i32) {
        (-self.half(), self.size as i32 - 1 - self.half())
    }

    pub fn world_to_cell(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let column = x + self.half();
        let row = y + self.half();
        let size = self.size as i32;
        if column < 0 || row < 0 || column >= size || row >= size {
            return None;
        }
        Some((column as usize, row as usize))
    }

    pub fn cell_to_world(&self, column: usize, row: usize) -> (i32, i32) {
        (column as i32 - self.half(), row as i32 - self.half())
    }

    fn cell_index(&self, x: i32, y: i32, floor: usize) -> Option<usize> {
        if floor >= self.floors {
            return None;
        }
        let (column, row) = self.world_to_cell(x, y)?;
        Some(floor * self.size * self.size + row * self.size + column)
    }

    fn expect_index(&self, x: i32, y: i32, floor: usize) -> usize {
        match self.cell_index(x, y, floor) {
            Some(index) => index,
            None => panic!(
                "tile ({x}, {y}) on floor {floor} is outside a {size}-cell map with {floors} floors",
                size = self.size,
                floors = self.floors
            ),
        }
    }

    /// Panics when the coordinate lies outside the map.
    pub fn get(&self, x: i32, y: i32, floor: usize) -> &Tile {
        &self.tiles[self.expect_index(x, y, floor)]
    }

    pub(crate) fn get_mut(&mut self, x: i32, y: i32, floor: usize) -> &mut Tile {
        let index = self.expect_index(x, y, floor);
        &mut self.tiles[index]
    }

    /// Real-valued lookup; coordinates are rounded to the nearest cell.
    pub fn get_rounded(&self, x: f64, y: f64, floor: usize) -> &Tile {
        self.get(x.round() as i32, y.round() as i32, floor)
    }

    pub fn try_get(&self, x: i32, y: i32, floor: usize) -> Option<&Tile> {
        self.cell_index(x, y, floor).map(|index| &self.tiles[index])
    }

    pub fn is_solid(&self, x: f64, y: f64, floor: usize) -> bool {
        self.get_rounded(x, y, floor).solid
    }

    /// All tiles of one floor, row-major from the lowest row.
    pub fn floor_tiles(&self, floor: usize) -> &[Tile] {
        let layer = self.size * self.size;
        &self.tiles[floor * layer..(floor + 1) * layer]
    }

    pub(crate) fn set_surface(&mut self, pos: TilePos, surface: Surface, solid: bool) {
        let tile = self.get_mut(pos.x, pos.y, pos.floor);
        tile.surface = surface;
        tile.solid = solid;
    }

    pub(crate) fn set_ceiling(&mut self, pos: TilePos, ceiling: Surface) {
        self.get_mut(pos.x, pos.y, pos.floor).ceiling = ceiling;
    }
}
