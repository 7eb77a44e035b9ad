//! Generator configuration, read from TOML and validated before any generation runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mapgen::Rect;

/// Smallest room edge the seeding phase will place.
pub const MIN_ROOM_SIZE: i32 = 3;
pub const DEFAULT_SEED_ATTEMPTS: u32 = 10_000;
pub const DEFAULT_EXTENSION_PASSES: u32 = 100;
/// Largest accepted grid side, keeping every world coordinate well inside `i32`.
pub const MAX_MAP_SIZE: usize = 4_096;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("num_floors must be at least 1")]
    NoFloors,
    #[error("map_size must be an even number between 4 and 4096 cells, got {0}")]
    MapSize(usize),
    #[error("min_room_size must be at least 3, got {0}")]
    MinRoomSize(i32),
    #[error("at least one master room is required")]
    NoMasterRooms,
    #[error(
        "master room {index} is {width}x{height}, smaller than the minimum room size {min_room_size}"
    )]
    MasterTooSmall { index: usize, width: i32, height: i32, min_room_size: i32 },
    #[error("master room {index} at ({x}, {y}) sized {width}x{height} does not fit a {map_size}-cell map")]
    MasterOutOfBounds { index: usize, x: i32, y: i32, width: i32, height: i32, map_size: usize },
    #[error("master rooms {first} and {second} overlap")]
    OverlappingMasters { first: usize, second: usize },
    #[error("room_counts lists {given} floors but only {floors} are generated")]
    TooManyRoomCounts { given: usize, floors: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterRoomConfig {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl MasterRoomConfig {
    pub fn rect(self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Widened so hostile coordinates cannot overflow before they are rejected.
    fn fits_map(self, half: i64) -> bool {
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        x >= -half
            && y >= -half
            && x + i64::from(self.width) <= half
            && y + i64::from(self.height) <= half
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Run seed. Zero or negative derives one from the clock.
    pub seed: i64,
    pub num_floors: usize,
    /// Cells per side of every floor's grid.
    pub map_size: usize,
    /// Room target for a whole floor, shared out across the master rooms.
    pub rooms_per_floor: usize,
    /// Per-floor overrides of `rooms_per_floor`, indexed by floor.
    pub room_counts: Vec<usize>,
    pub min_room_size: i32,
    pub seed_attempts: u32,
    pub extension_passes: u32,
    /// Texture set written into wall, corner and floor surfaces.
    pub tile_set: String,
    /// Placed on every floor, in this order.
    pub master_rooms: Vec<MasterRoomConfig>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_floors: 3,
            map_size: 64,
            rooms_per_floor: 6,
            room_counts: Vec::new(),
            min_room_size: MIN_ROOM_SIZE,
            seed_attempts: DEFAULT_SEED_ATTEMPTS,
            extension_passes: DEFAULT_EXTENSION_PASSES,
            tile_set: "a".to_owned(),
            master_rooms: vec![MasterRoomConfig { x: -12, y: -12, width: 24, height: 24 }],
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_floors == 0 {
            return Err(ConfigError::NoFloors);
        }
        if !(4..=MAX_MAP_SIZE).contains(&self.map_size) || self.map_size % 2 != 0 {
            return Err(ConfigError::MapSize(self.map_size));
        }
        if self.min_room_size < MIN_ROOM_SIZE {
            return Err(ConfigError::MinRoomSize(self.min_room_size));
        }
        if self.master_rooms.is_empty() {
            return Err(ConfigError::NoMasterRooms);
        }
        if self.room_counts.len() > self.num_floors {
            return Err(ConfigError::TooManyRoomCounts {
                given: self.room_counts.len(),
                floors: self.num_floors,
            });
        }

        let half = (self.map_size / 2) as i64;
        for (index, master) in self.master_rooms.iter().enumerate() {
            if master.width < self.min_room_size || master.height < self.min_room_size {
                return Err(ConfigError::MasterTooSmall {
                    index,
                    width: master.width,
                    height: master.height,
                    min_room_size: self.min_room_size,
                });
            }
            if !master.fits_map(half) {
                return Err(ConfigError::MasterOutOfBounds {
                    index,
                    x: master.x,
                    y: master.y,
                    width: master.width,
                    height: master.height,
                    map_size: self.map_size,
                });
            }
        }

        for (first, earlier) in self.master_rooms.iter().enumerate() {
            for (offset, later) in self.master_rooms[first + 1..].iter().enumerate() {
                if earlier.rect().shares_cells(later.rect()) {
                    return Err(ConfigError::OverlappingMasters { first, second: first + offset + 1 });
                }
            }
        }
        Ok(())
    }

    /// Target room count for the whole of `floor`, shared out across its master rooms.
    pub fn room_count(&self, floor: usize) -> usize {
        self.room_counts.get(floor).copied().unwrap_or(self.rooms_per_floor)
    }
}
