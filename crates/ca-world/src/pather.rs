//! Walking trait and default straight-line implementation.
//!
//! # Pluggability
//!
//! [`Pasture`](crate::Pasture) moves citizens through the [`Pather`] trait,
//! so terrain-aware pathfinding can replace the default without touching
//! the herding handlers.

use ca_core::BlockPos;
use ca_herd::PathStatus;

pub trait Pather: Send + Sync {
    /// Move `walker` toward `target` for one tick.
    fn step(&self, walker: &mut BlockPos, target: BlockPos) -> PathStatus;
}

/// Walks in a straight line, `speed` diagonal block steps per tick.
///
/// Targets farther than `max_range` blocks are reported unreachable.  The
/// walker has arrived once it is within `reach` blocks of the target.
#[derive(Copy, Clone, Debug)]
pub struct StraightPather {
    pub speed:     u32,
    pub reach:     u32,
    pub max_range: u32,
}

impl Default for StraightPather {
    fn default() -> Self {
        Self { speed: 1, reach: 1, max_range: 64 }
    }
}

impl Pather for StraightPather {
    fn step(&self, walker: &mut BlockPos, target: BlockPos) -> PathStatus {
        if !walker.within(target, self.max_range) {
            return PathStatus::Unreachable;
        }
        if walker.within(target, self.reach) {
            return PathStatus::Arrived;
        }
        for _ in 0..self.speed {
            *walker = walker.step_toward(target);
            if walker.within(target, self.reach) {
                return PathStatus::Arrived;
            }
        }
        PathStatus::EnRoute
    }
}
