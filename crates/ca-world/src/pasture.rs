//! `Pasture`: an in-memory herd world.
//!
//! # Spatial index
//!
//! Creature positions live in an R-tree (via `rstar`) keyed by block
//! coordinates, so `find_nearby` is a radius query instead of a scan.  The
//! index is updated in place when animals are born or butchered; animals do
//! not wander, so no other change moves an entry.
//!
//! Query results are sorted by `EntityId`, keeping herder decisions
//! independent of R-tree layout.  Points are stored as `i64` so squared
//! distances between far-apart blocks cannot overflow.
//!
//! # Breeding
//!
//! `breed` only feeds the pair: both parents are marked `in_love` and no
//! other herder can feed them again.  The lamb is born on the next
//! `advance`, which also starts the parents' cooldown.

use std::collections::BTreeMap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

use ca_core::{BlockPos, BuildingId, DyeColor, EntityId, ItemKind, ItemStack, SimRng, Tick};
use ca_fsm::ActionError;
use ca_herd::{Creature, CreatureKind, HerdWorld, PathStatus, ShearWorld};
use ca_sim::SimWorld;

use crate::pather::{Pather, StraightPather};
use crate::{WorldError, WorldResult};

/// Age of a newborn; counts up to zero.
pub const CHILD_AGE: i32 = -24_000;
/// Age given to parents after breeding; counts down to zero.
pub const BREED_COOLDOWN: i32 = 6_000;

// ── R-tree entry ──────────────────────────────────────────────────────────────

type Point = [i64; 3];

#[derive(Clone, PartialEq)]
struct CreatureEntry {
    point: Point,
    id:    EntityId,
}

impl RTreeObject for CreatureEntry {
    type Envelope = AABB<Point>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CreatureEntry {
    fn distance_2(&self, point: &Point) -> i64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── Pasture ───────────────────────────────────────────────────────────────────

/// Animals, hut storage and a pather.
pub struct Pasture<P = StraightPather> {
    creatures:     BTreeMap<EntityId, Creature>,
    index:         RTree<CreatureEntry>,
    storage:       BTreeMap<BuildingId, Vec<ItemStack>>,
    pather:        P,
    rng:           SimRng,
    next_id:       u32,
    /// Pairs fed this tick; their lamb arrives on the next `advance`.
    matings:       Vec<(EntityId, EntityId)>,
    /// Chance per tick that a sheared sheep grows its wool back.
    regrow_chance: f64,
}

impl Pasture<StraightPather> {
    pub fn new(seed: u64) -> Self {
        Self::with_pather(seed, StraightPather::default())
    }
}

impl<P: Pather> Pasture<P> {
    pub fn with_pather(seed: u64, pather: P) -> Self {
        Self {
            creatures:     BTreeMap::new(),
            index:         RTree::new(),
            storage:       BTreeMap::new(),
            pather,
            rng:           SimRng::new(seed),
            next_id:       0,
            matings:       Vec::new(),
            regrow_chance: 0.001,
        }
    }

    pub fn with_regrow_chance(mut self, chance: f64) -> Self {
        self.regrow_chance = chance;
        self
    }

    /// Add an adult of `kind` at `pos`.
    pub fn spawn(&mut self, kind: CreatureKind, pos: BlockPos) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.insert(Creature::adult(id, kind, pos));
        id
    }

    /// Spawn `count` adults of `kind` uniformly within `spread` blocks of
    /// `center` on the same y level.
    pub fn scatter(&mut self, kind: CreatureKind, center: BlockPos, spread: i32, count: u32) -> Vec<EntityId> {
        (0..count)
            .map(|_| {
                let pos = BlockPos::new(
                    center.x + self.rng.gen_range(-spread..=spread),
                    center.y,
                    center.z + self.rng.gen_range(-spread..=spread),
                );
                self.spawn(kind, pos)
            })
            .collect()
    }

    pub fn get(&self, id: EntityId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Creature> {
        self.creatures.get_mut(&id)
    }

    pub fn creatures(&self) -> impl Iterator<Item = &Creature> + '_ {
        self.creatures.values()
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Everything dumped at `building` so far.
    pub fn stored(&self, building: BuildingId) -> &[ItemStack] {
        self.storage.get(&building).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total of `kind` stored across every building.
    pub fn stored_count(&self, kind: ItemKind) -> u32 {
        self.storage.values().flatten().filter(|s| s.kind == kind).map(|s| s.count).sum()
    }

    fn insert(&mut self, creature: Creature) {
        self.index.insert(CreatureEntry { point: creature.pos.to_array(), id: creature.id });
        self.creatures.insert(creature.id, creature);
    }

    fn take(&mut self, id: EntityId) -> WorldResult<Creature> {
        let creature = self.creatures.remove(&id).ok_or(WorldError::UnknownEntity(id))?;
        self.index.remove(&CreatureEntry { point: creature.pos.to_array(), id });
        Ok(creature)
    }

    fn pair_can_breed(&self, a: EntityId, b: EntityId) -> WorldResult<()> {
        let first = self.get(a).ok_or(WorldError::UnknownEntity(a))?;
        let second = self.get(b).ok_or(WorldError::UnknownEntity(b))?;
        let ready = |c: &Creature| c.is_breedable() && !c.in_love;
        if a == b || first.kind != second.kind || !ready(first) || !ready(second) {
            return Err(WorldError::NotBreedable { a, b });
        }
        Ok(())
    }

    /// Deliver the lambs of every pair fed since the last call.
    fn give_birth(&mut self) {
        for (a, b) in std::mem::take(&mut self.matings) {
            let parents = self.get(a).zip(self.get(b)).map(|(first, _)| (first.kind, first.pos));
            for id in [a, b] {
                if let Some(parent) = self.creatures.get_mut(&id) {
                    parent.in_love = false;
                    if parents.is_some() {
                        parent.age = BREED_COOLDOWN;
                    }
                }
            }
            let Some((kind, pos)) = parents else {
                debug!(%a, %b, "parent gone before birth");
                continue;
            };
            let child = EntityId(self.next_id);
            self.next_id += 1;
            self.insert(Creature { age: CHILD_AGE, ..Creature::adult(child, kind, pos) });
            debug!(%a, %b, %child, "born");
        }
    }

    fn drops(&mut self, creature: &Creature) -> Vec<ItemStack> {
        let meat = self.rng.gen_range(1..=2);
        match creature.kind {
            CreatureKind::Sheep => {
                let mut drops = vec![ItemStack::new(ItemKind::Mutton, meat)];
                if !creature.sheared {
                    drops.push(ItemStack::new(ItemKind::Wool(creature.fleece), 1));
                }
                drops
            }
            CreatureKind::Cow => vec![ItemStack::new(ItemKind::Beef, meat), ItemStack::new(ItemKind::Leather, 1)],
            CreatureKind::Pig => vec![ItemStack::new(ItemKind::Pork, meat)],
            CreatureKind::Chicken => vec![ItemStack::new(ItemKind::Feather, meat)],
        }
    }
}

// ── Collaborator impls ────────────────────────────────────────────────────────

impl<P: Pather> HerdWorld for Pasture<P> {
    fn find_nearby(&self, kind: CreatureKind, center: BlockPos, radius: u32) -> Result<Vec<Creature>, ActionError> {
        let r = i64::from(radius);
        let mut found: Vec<Creature> = self
            .index
            .locate_within_distance(center.to_array(), r.saturating_mul(r))
            .filter_map(|e| self.creatures.get(&e.id))
            .filter(|c| c.kind == kind)
            .cloned()
            .collect();
        found.sort_unstable_by_key(|c| c.id);
        Ok(found)
    }

    fn move_toward(&mut self, walker: &mut BlockPos, target: BlockPos) -> Result<PathStatus, ActionError> {
        Ok(self.pather.step(walker, target))
    }

    fn breed(&mut self, a: EntityId, b: EntityId) -> Result<(), ActionError> {
        self.pair_can_breed(a, b)?;
        for id in [a, b] {
            if let Some(parent) = self.creatures.get_mut(&id) {
                parent.in_love = true;
            }
        }
        self.matings.push((a, b));
        debug!(%a, %b, "fed pair");
        Ok(())
    }

    fn butcher(&mut self, target: EntityId) -> Result<Vec<ItemStack>, ActionError> {
        let creature = self.take(target)?;
        Ok(self.drops(&creature))
    }

    fn store_in_building(&mut self, building: BuildingId, items: &[ItemStack]) -> Result<(), ActionError> {
        let store = self.storage.entry(building).or_default();
        for item in items {
            match store.iter_mut().find(|s| s.kind == item.kind) {
                Some(existing) => existing.count += item.count,
                None => store.push(*item),
            }
        }
        Ok(())
    }
}

impl<P: Pather> ShearWorld for Pasture<P> {
    fn shear(&mut self, target: EntityId, fortune: u32) -> Result<Vec<ItemStack>, ActionError> {
        let yield_count = 1 + self.rng.gen_range(0..3) + fortune;
        let sheep = self.creatures.get_mut(&target).ok_or(WorldError::UnknownEntity(target))?;
        if sheep.kind != CreatureKind::Sheep || sheep.sheared || sheep.is_child() {
            return Err(WorldError::NotShearable(target).into());
        }
        sheep.sheared = true;
        Ok(vec![ItemStack::new(ItemKind::Wool(sheep.fleece), yield_count)])
    }

    fn dye_fleece(&mut self, target: EntityId, color: DyeColor) -> Result<(), ActionError> {
        let sheep = self.creatures.get_mut(&target).ok_or(WorldError::UnknownEntity(target))?;
        sheep.fleece = color;
        Ok(())
    }
}

impl<P: Pather> SimWorld for Pasture<P> {
    /// Age every animal one tick toward adulthood, regrow wool, then
    /// deliver this tick's lambs.
    fn advance(&mut self, _tick: Tick) {
        let chance = self.regrow_chance;
        for creature in self.creatures.values_mut() {
            creature.age -= creature.age.signum();
            if creature.sheared && self.rng.gen_bool(chance) {
                creature.sheared = false;
            }
        }
        self.give_birth();
    }
}
