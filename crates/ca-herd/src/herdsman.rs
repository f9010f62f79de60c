//! The herder's agent context: everything one citizen's handlers mutate.

use std::fmt;

use ca_core::{AgentRng, BlockPos, BuildingId, CitizenId, EntityId, ItemKind, ToolType};
use ca_fsm::Inspect;

use crate::collab::Creature;

// ── Hut ───────────────────────────────────────────────────────────────────────

/// The building the herder works out of.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hut {
    pub id:    BuildingId,
    pub level: u32,
    pub pos:   BlockPos,
}

impl Hut {
    pub fn new(id: BuildingId, level: u32, pos: BlockPos) -> Self {
        Self { id, level, pos }
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }
}

// ── Status ────────────────────────────────────────────────────────────────────

/// Latest status shown above the citizen's head.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Deciding,
    NoAnimals,
    Shearing,
    Breeding,
    Butchering,
    Dumping,
    NeedTool(ToolType),
    NeedItem(ItemKind),
}

impl Status {
    /// Stable translation key for the presentation layer.
    pub fn key(&self) -> &'static str {
        match self {
            Status::Deciding    => "herder.status.deciding",
            Status::NoAnimals   => "herder.status.no_animals",
            Status::Shearing    => "herder.status.shearing",
            Status::Breeding    => "herder.status.breeding",
            Status::Butchering  => "herder.status.butchering",
            Status::Dumping     => "herder.status.dumping",
            Status::NeedTool(_) => "herder.status.need_tool",
            Status::NeedItem(_) => "herder.status.need_item",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NeedTool(tool) => write!(f, "{}({tool})", self.key()),
            Status::NeedItem(item) => write!(f, "{}({item})", self.key()),
            _ => f.write_str(self.key()),
        }
    }
}

// ── Herdsman ──────────────────────────────────────────────────────────────────

/// Mutable context owned by one herding citizen.
///
/// `I` is the inventory implementation; the world is passed to handlers
/// separately as the machine's environment.
#[derive(Debug)]
pub struct Herdsman<I> {
    pub citizen:      CitizenId,
    pub pos:          BlockPos,
    pub hut:          Hut,
    pub inventory:    I,
    pub rng:          AgentRng,
    /// Completed shear/breed/butcher actions.
    pub actions_done: u32,
    /// Animal the citizen is currently walking to, if any.
    pub walk_target:  Option<EntityId>,
    experience:       f64,
    status:           Option<Status>,
    herd:             Vec<Creature>,
}

impl<I> Herdsman<I> {
    /// A herder standing at its hut, with an RNG derived from `seed`.
    pub fn new(citizen: CitizenId, hut: Hut, inventory: I, seed: u64) -> Self {
        Self {
            citizen,
            pos: hut.pos,
            hut,
            inventory,
            rng: AgentRng::new(seed, citizen),
            actions_done: 0,
            walk_target: None,
            experience: 0.0,
            status: None,
            herd: Vec::new(),
        }
    }

    pub fn grant_experience(&mut self, amount: f64) {
        self.experience += amount;
    }

    pub fn experience(&self) -> f64 {
        self.experience
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Animals seen by the most recent herd search.
    pub fn herd(&self) -> &[Creature] {
        &self.herd
    }

    pub(crate) fn record_herd(&mut self, herd: &[Creature]) {
        self.herd.clear();
        self.herd.extend_from_slice(herd);
    }
}

impl<I> Inspect for Herdsman<I> {
    fn actions_done(&self) -> u32 {
        self.actions_done
    }

    fn managed(&self) -> usize {
        self.herd.len()
    }

    fn status(&self) -> Option<String> {
        self.status.map(|s| s.to_string())
    }
}
