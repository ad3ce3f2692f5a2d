use serde::{Deserialize, Serialize};

/// Absolute tile coordinate in the game world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: i32,
    pub y: i32,
    pub plane: i32,
}

impl WorldPoint {
    pub const fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }

    /// Resolve region-relative coordinates.
    ///
    /// A region is a 64x64 tile square; its id packs the region's x index in
    /// the high byte and its y index in the low byte.
    pub const fn from_region(region_id: i32, region_x: i32, region_y: i32, plane: i32) -> Self {
        Self {
            x: ((region_id >> 8) << 6) + region_x,
            y: ((region_id & 0xFF) << 6) + region_y,
            plane,
        }
    }
}

impl std::fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.plane)
    }
}
