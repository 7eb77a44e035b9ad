use serde::{Deserialize, Serialize};
use thiserror::Error;

/// World-space cell address. `x` and `y` are centred on the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
    pub floor: usize,
}

impl TilePos {
    pub const fn new(x: i32, y: i32, floor: usize) -> Self {
        Self { x, y, floor }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MasterRoomId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DoorId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("rotation must be one of 0, 90, 180 or 270 degrees, got {0}")]
pub struct InvalidRotation(pub u16);

/// Outward-facing direction of an edge tile, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = InvalidRotation;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(InvalidRotation(other)),
        }
    }
}

/// One of the four edges of a rectangle, named by the axis direction it faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Wall {
    PosX,
    PosY,
    NegX,
    NegY,
}

impl Wall {
    /// Growth and door-draw order.
    pub const ALL: [Self; 4] = [Self::PosX, Self::PosY, Self::NegX, Self::NegY];

    pub fn rotation(self) -> Rotation {
        match self {
            Self::PosY => Rotation::Deg0,
            Self::NegX => Rotation::Deg90,
            Self::NegY => Rotation::Deg180,
            Self::PosX => Rotation::Deg270,
        }
    }

    /// True for the walls that run along the x axis (the ±y edges).
    pub fn runs_along_x(self) -> bool {
        matches!(self, Self::PosY | Self::NegY)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceName {
    #[default]
    Empty,
    Floor,
    Ceiling,
    Wall,
    Corner,
    IntWall,
    IntCorner,
    FloorEdge,
    DoorFrame,
    IntDoorFrame,
}

impl SurfaceName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Floor => "floor",
            Self::Ceiling => "ceiling",
            Self::Wall => "wall",
            Self::Corner => "corner",
            Self::IntWall => "int-wall",
            Self::IntCorner => "int-corner",
            Self::FloorEdge => "floor-edge",
            Self::DoorFrame => "door-frame",
            Self::IntDoorFrame => "int-door-frame",
        }
    }

    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Floor => 1,
            Self::Ceiling => 2,
            Self::Wall => 3,
            Self::Corner => 4,
            Self::IntWall => 5,
            Self::IntCorner => 6,
            Self::FloorEdge => 7,
            Self::DoorFrame => 8,
            Self::IntDoorFrame => 9,
        }
    }

    pub fn is_wall_or_corner(self) -> bool {
        matches!(self, Self::Wall | Self::Corner | Self::IntWall | Self::IntCorner)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DoorKind {
    Exterior,
    Interior,
}

impl DoorKind {
    pub fn kind_name(self) -> &'static str {
        match self {
            Self::Exterior => "door",
            Self::Interior => "int-door",
        }
    }

    pub fn frame(self) -> SurfaceName {
        match self {
            Self::Exterior => SurfaceName::DoorFrame,
            Self::Interior => SurfaceName::IntDoorFrame,
        }
    }
}
