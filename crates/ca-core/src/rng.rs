//! Deterministic per-citizen and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each citizen gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (citizen_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive ids uniformly across the seed space.  This means:
//!
//! - Citizens never share RNG state, so the order in which the world loop
//!   visits them cannot change their rolls.
//! - Assigning or removing citizens does not disturb the seeds of the others.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::CitizenId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-citizen deterministic RNG.  Owned by the citizen's context.
#[derive(Clone, Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and a citizen id.
    pub fn new(global_seed: u64, citizen: CitizenId) -> Self {
        let seed = global_seed ^ (citizen.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform roll in `0..100`.
    #[inline]
    pub fn percent(&mut self) -> u32 {
        self.0.gen_range(0..100)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// World-side RNG: spawn positions, drop counts, wool regrowth.
///
/// Owned by the world and never handed to a handler; handlers roll on their
/// citizen's [`AgentRng`].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
