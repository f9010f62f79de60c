//! Collaborator traits the herding behaviors consume.
//!
//! The world, pathfinding and inventory live outside this crate.  Handlers
//! only ever see them through these traits, and every call that can fail
//! reports an [`ActionError`] which the state machine treats as recoverable.

use std::fmt;

use ca_core::{BlockPos, BuildingId, DyeColor, EntityId, ItemKind, ItemStack, ToolType};
use ca_fsm::ActionError;

// ── Creatures ─────────────────────────────────────────────────────────────────

/// Animal species a herder can manage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CreatureKind {
    Sheep,
    Cow,
    Pig,
    Chicken,
}

impl CreatureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CreatureKind::Sheep   => "sheep",
            CreatureKind::Cow     => "cow",
            CreatureKind::Pig     => "pig",
            CreatureKind::Chicken => "chicken",
        }
    }
}

impl fmt::Display for CreatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A read-only copy of one animal, taken when the herd is searched.
///
/// `age` follows the usual convention: negative while a child, zero when
/// ready to breed, positive while recovering from breeding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Creature {
    pub id:      EntityId,
    pub kind:    CreatureKind,
    pub pos:     BlockPos,
    pub age:     i32,
    pub sheared: bool,
    pub in_love: bool,
    pub fleece:  DyeColor,
}

impl Creature {
    /// A fresh adult of `kind` at `pos`.
    pub fn adult(id: EntityId, kind: CreatureKind, pos: BlockPos) -> Self {
        Self {
            id,
            kind,
            pos,
            age:     0,
            sheared: false,
            in_love: false,
            fleece:  DyeColor::White,
        }
    }

    #[inline]
    pub fn is_child(&self) -> bool {
        self.age < 0
    }

    /// Counts toward the breeding threshold.
    #[inline]
    pub fn is_breedable(&self) -> bool {
        self.age == 0
    }
}

// ── Pathing ───────────────────────────────────────────────────────────────────

/// Result of one movement request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathStatus {
    Arrived,
    EnRoute,
    Unreachable,
}

impl PathStatus {
    /// `true` while the walker should keep waiting in its current state.
    #[inline]
    pub fn is_moving(self) -> bool {
        matches!(self, PathStatus::EnRoute)
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Spatial queries, pathing and animal interactions every herder needs.
pub trait HerdWorld {
    /// Every animal of `kind` within `radius` blocks of `center`.
    ///
    /// An empty result is normal, not an error.
    fn find_nearby(
        &self,
        kind:   CreatureKind,
        center: BlockPos,
        radius: u32,
    ) -> Result<Vec<Creature>, ActionError>;

    /// Advance `walker` toward `target` by however far it can go this tick.
    fn move_toward(&mut self, walker: &mut BlockPos, target: BlockPos) -> Result<PathStatus, ActionError>;

    /// Put two animals in love so they produce a child.
    fn breed(&mut self, a: EntityId, b: EntityId) -> Result<(), ActionError>;

    /// Kill `target`, returning its drops.
    fn butcher(&mut self, target: EntityId) -> Result<Vec<ItemStack>, ActionError>;

    /// Hand a load of items over to a building's storage.
    fn store_in_building(&mut self, building: BuildingId, items: &[ItemStack]) -> Result<(), ActionError>;
}

/// Extra interactions for wool-bearing animals.
pub trait ShearWorld: HerdWorld {
    /// Shear `target`, returning the wool.  `fortune` is the enchantment
    /// level of the shears.
    fn shear(&mut self, target: EntityId, fortune: u32) -> Result<Vec<ItemStack>, ActionError>;

    fn dye_fleece(&mut self, target: EntityId, color: DyeColor) -> Result<(), ActionError>;
}

// ── Inventory ─────────────────────────────────────────────────────────────────

/// A citizen's carried items and held tool.
pub trait Inventory {
    fn add_item(&mut self, stack: ItemStack) -> Result<(), ActionError>;

    /// `true` if all of `stack` fits without evicting anything.
    fn can_hold(&self, stack: &ItemStack) -> bool;

    fn has_tool(&self, tool: ToolType) -> bool;

    /// Put `tool` in hand.  `false` if the citizen has none.
    fn equip(&mut self, tool: ToolType) -> bool;

    fn held_tool(&self) -> Option<ToolType>;

    /// Wear down the held tool.  A tool at zero durability breaks.
    fn damage_held_tool(&mut self, amount: u32) -> Result<(), ActionError>;

    /// Total count of `kind` across all slots.
    fn count(&self, kind: ItemKind) -> u32;

    /// Take `count` of `kind` out of the inventory.
    fn remove(&mut self, kind: ItemKind, count: u32) -> Result<(), ActionError>;

    fn is_full(&self) -> bool;

    /// Every non-tool stack, for dumping at the hut.
    fn loot(&self) -> Vec<ItemStack>;

    /// Fortune enchantment level of the held tool.
    fn fortune(&self) -> u32 {
        0
    }
}
