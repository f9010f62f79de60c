//! Integer block coordinates.
//!
//! The world is a voxel grid, so positions are whole blocks.  Distances are
//! compared squared to stay in integer arithmetic.

use std::fmt;

/// A block position in the world grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ORIGIN: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance in blocks.  Widened to `i64` so far-apart
    /// positions cannot overflow.
    #[inline]
    pub fn distance_sq(self, other: BlockPos) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        let dz = (self.z - other.z) as i64;
        dx * dx + dy * dy + dz * dz
    }

    /// `true` if `other` lies within `radius` blocks (inclusive).
    #[inline]
    pub fn within(self, other: BlockPos, radius: u32) -> bool {
        let r = radius as i64;
        self.distance_sq(other) <= r * r
    }

    /// One block step toward `target` along each axis that differs.
    pub fn step_toward(self, target: BlockPos) -> BlockPos {
        BlockPos {
            x: self.x + (target.x - self.x).signum(),
            y: self.y + (target.y - self.y).signum(),
            z: self.z + (target.z - self.z).signum(),
        }
    }

    /// The coordinates widened to `i64`, for spatial indexes that square
    /// distances.
    #[inline]
    pub fn to_array(self) -> [i64; 3] {
        [self.x.into(), self.y.into(), self.z.into()]
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
