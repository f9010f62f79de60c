//! The generic herder: shared decision policy plus a pluggable strategy.
//!
//! A concrete behavior only supplies a [`HerdStrategy`]: which animal it
//! keeps, which tools it needs, what it feeds them, and how it harvests.
//! [`Herder::registry`] wires the strategy and the shared handlers into one
//! [`TargetRegistry`] that every citizen with that job shares.
//!
//! # Decision priority
//!
//! `Decide` runs every `decide_delay` ticks and picks, in order:
//!
//! 1. no animals in range → back off for `idle_delay`, stay;
//! 2. herd at or above the hut's cap → `Butcher`;
//! 3. an animal the strategy can harvest → `Harvest` (walking starts now);
//! 4. at least `breed_threshold` breedable animals → `Breed`;
//! 5. otherwise stay.

use std::sync::Arc;

use ca_core::{ItemKind, ItemStack, ToolType};
use ca_fsm::{ActionError, ActionResult, Cx, TargetRegistry, Transition};
use tracing::debug;

use crate::collab::{Creature, CreatureKind, HerdWorld, Inventory, PathStatus};
use crate::herdsman::{Herdsman, Status};
use crate::{HerdResult, HerdState, HerderPolicy};

/// Handler context of every herding behavior.
pub type HerdCx<'a, W, I> = Cx<'a, HerdState, Herdsman<I>, W>;

/// Registry shared by all citizens running one herding behavior.
pub type HerdRegistry<W, I> = TargetRegistry<HerdState, Herdsman<I>, W>;

/// Breeding items consumed per pair.
const BREED_ITEMS_PER_PAIR: u32 = 2;

// ── HerdStrategy ──────────────────────────────────────────────────────────────

/// What one kind of herder does differently from the others.
pub trait HerdStrategy<W, I>: Send + Sync + Sized + 'static {
    /// Name used for the registry and in diagnostics.
    fn name(&self) -> &'static str;

    /// The species this herder manages.
    fn creature(&self) -> CreatureKind;

    /// Tools the citizen must own before it starts deciding.
    fn tools(&self) -> &[ToolType];

    /// Item fed to a pair of animals to breed them.
    fn breeding_item(&self) -> ItemKind;

    /// `true` if `creature` can be harvested right now.
    fn is_harvestable(&self, creature: &Creature) -> bool;

    /// Body of the `Harvest` state.
    fn harvest(herder: &Herder<Self>, cx: &mut HerdCx<'_, W, I>) -> ActionResult<HerdState>;
}

// ── Herder ────────────────────────────────────────────────────────────────────

/// Policy plus strategy.  Built once per behavior and shared via `Arc`.
#[derive(Debug)]
pub struct Herder<St> {
    policy:   HerderPolicy,
    strategy: St,
}

impl<St> Herder<St> {
    /// Validate `policy` and pair it with `strategy`.
    pub fn new(policy: HerderPolicy, strategy: St) -> HerdResult<Self> {
        policy.validate()?;
        Ok(Self { policy, strategy })
    }

    pub fn policy(&self) -> &HerderPolicy {
        &self.policy
    }

    pub fn strategy(&self) -> &St {
        &self.strategy
    }

    /// `true` once the herd has reached the hut's cap.
    pub fn max_animals(&self, herd_size: usize, hut_level: u32) -> bool {
        herd_size >= self.policy.cap(hut_level)
    }

    /// Every animal of `kind` around the citizen's hut.
    ///
    /// The result is also recorded on the citizen for the presentation
    /// layer.  Finding nothing is not an error.
    pub fn search_for_animals<W: HerdWorld, I>(
        &self,
        cx: &mut HerdCx<'_, W, I>,
        kind: CreatureKind,
    ) -> Result<Vec<Creature>, ActionError> {
        let herd = cx.env.find_nearby(kind, cx.agent.hut.pos, self.policy.work_radius)?;
        cx.agent.record_herd(&herd);
        Ok(herd)
    }

    /// Move the citizen one leg toward `target`.
    ///
    /// [`PathStatus::EnRoute`] means the caller should stay in its state and
    /// try again next tick.
    pub fn walk_to_animal<W: HerdWorld, I>(
        &self,
        cx: &mut HerdCx<'_, W, I>,
        target: &Creature,
    ) -> Result<PathStatus, ActionError> {
        cx.agent.walk_target = Some(target.id);
        let status = cx.env.move_toward(&mut cx.agent.pos, target.pos)?;
        if status == PathStatus::Unreachable {
            debug!(citizen = %cx.agent.citizen, target = %target.id, "animal unreachable");
            cx.agent.walk_target = None;
        }
        Ok(status)
    }

    /// Put fresh drops in the citizen's inventory.
    ///
    /// Stacks that do not fit go straight to the hut instead of being lost.
    pub fn stow<W: HerdWorld, I: Inventory>(
        &self,
        cx: &mut HerdCx<'_, W, I>,
        drops: Vec<ItemStack>,
    ) -> Result<(), ActionError> {
        let mut overflow = Vec::new();
        for stack in drops {
            if cx.agent.inventory.can_hold(&stack) {
                cx.agent.inventory.add_item(stack)?;
            } else {
                overflow.push(stack);
            }
        }
        if !overflow.is_empty() {
            debug!(citizen = %cx.agent.citizen, stacks = overflow.len(), "inventory full, drops sent to hut");
            cx.env.store_in_building(cx.agent.hut.id, &overflow)?;
        }
        Ok(())
    }
}

impl<St> Herder<St> {
    fn herd<W: HerdWorld, I>(&self, cx: &mut HerdCx<'_, W, I>) -> Result<Vec<Creature>, ActionError>
    where
        St: HerdStrategy<W, I>,
    {
        self.search_for_animals(cx, self.strategy.creature())
    }

    /// `Preparing`: wait until every required tool is owned.
    pub fn prepare<W, I: Inventory>(&self, cx: &mut HerdCx<'_, W, I>) -> ActionResult<HerdState>
    where
        St: HerdStrategy<W, I>,
    {
        let missing = self.strategy.tools().iter().copied().find(|&t| !cx.agent.inventory.has_tool(t));
        if let Some(tool) = missing {
            debug!(citizen = %cx.agent.citizen, %tool, "waiting for tool");
            cx.agent.set_status(Status::NeedTool(tool));
            cx.set_delay(self.policy.no_tool_delay);
            return Ok(Transition::Stay);
        }
        Ok(Transition::To(HerdState::Decide))
    }

    /// `Decide`: choose the next job by fixed priority.
    pub fn decide<W: HerdWorld, I>(&self, cx: &mut HerdCx<'_, W, I>) -> ActionResult<HerdState>
    where
        St: HerdStrategy<W, I>,
    {
        cx.set_delay(self.policy.decide_delay);

        let herd = self.herd(cx)?;
        if herd.is_empty() {
            debug!(citizen = %cx.agent.citizen, delay = self.policy.idle_delay, "no animals, backing off");
            cx.agent.set_status(Status::NoAnimals);
            cx.set_delay(self.policy.idle_delay);
            return Ok(Transition::Stay);
        }
        cx.agent.set_status(Status::Deciding);

        if self.max_animals(herd.len(), cx.agent.hut.level()) {
            debug!(citizen = %cx.agent.citizen, herd = herd.len(), "herd at cap");
            return Ok(Transition::To(HerdState::Butcher));
        }

        if let Some(target) = herd.iter().find(|c| self.strategy.is_harvestable(c)) {
            if self.walk_to_animal(cx, target)? != PathStatus::Unreachable {
                return Ok(Transition::To(HerdState::Harvest));
            }
        }

        let breedable = herd.iter().filter(|c| c.is_breedable()).count();
        if breedable >= self.policy.breed_threshold {
            return Ok(Transition::To(HerdState::Breed));
        }

        Ok(Transition::Stay)
    }

    /// `Breed`: feed two ready animals.
    pub fn breed<W: HerdWorld, I: Inventory>(&self, cx: &mut HerdCx<'_, W, I>) -> ActionResult<HerdState>
    where
        St: HerdStrategy<W, I>,
    {
        let herd = self.herd(cx)?;
        let mut ready = herd.iter().filter(|c| c.is_breedable() && !c.in_love);
        let (Some(first), Some(second)) = (ready.next(), ready.next()) else {
            return Ok(Transition::To(HerdState::Decide));
        };

        let item = self.strategy.breeding_item();
        if cx.agent.inventory.count(item) < BREED_ITEMS_PER_PAIR {
            debug!(citizen = %cx.agent.citizen, %item, "missing breeding item");
            cx.agent.set_status(Status::NeedItem(item));
            cx.set_delay(self.policy.no_tool_delay);
            return Ok(Transition::To(HerdState::Decide));
        }

        cx.agent.set_status(Status::Breeding);
        match self.walk_to_animal(cx, first)? {
            PathStatus::EnRoute => return Ok(Transition::Stay),
            PathStatus::Unreachable => return Ok(Transition::To(HerdState::Decide)),
            PathStatus::Arrived => {}
        }

        cx.env.breed(first.id, second.id)?;
        cx.agent.inventory.remove(item, BREED_ITEMS_PER_PAIR)?;
        cx.agent.grant_experience(self.policy.exp_per_breed);
        cx.agent.actions_done += 1;
        debug!(citizen = %cx.agent.citizen, a = %first.id, b = %second.id, "bred pair");
        Ok(Transition::To(HerdState::Decide))
    }

    /// `Butcher`: thin the herd by one adult.
    pub fn butcher<W: HerdWorld, I: Inventory>(&self, cx: &mut HerdCx<'_, W, I>) -> ActionResult<HerdState>
    where
        St: HerdStrategy<W, I>,
    {
        let herd = self.herd(cx)?;
        if herd.is_empty() {
            return Ok(Transition::To(HerdState::Decide));
        }
        if !cx.agent.inventory.equip(ToolType::Axe) {
            cx.agent.set_status(Status::NeedTool(ToolType::Axe));
            return Ok(Transition::To(HerdState::Preparing));
        }
        let Some(target) = herd.iter().find(|c| !c.is_child()) else {
            return Ok(Transition::To(HerdState::Decide));
        };

        cx.agent.set_status(Status::Butchering);
        match self.walk_to_animal(cx, target)? {
            PathStatus::EnRoute => return Ok(Transition::Stay),
            PathStatus::Unreachable => return Ok(Transition::To(HerdState::Decide)),
            PathStatus::Arrived => {}
        }

        let drops = cx.env.butcher(target.id)?;
        cx.agent.inventory.damage_held_tool(1)?;
        cx.agent.grant_experience(self.policy.exp_per_butcher);
        cx.agent.actions_done += 1;
        debug!(citizen = %cx.agent.citizen, target = %target.id, "butchered");
        self.stow(cx, drops)?;
        Ok(Transition::To(HerdState::Decide))
    }

    /// `Dump`: walk home and hand the citizen's items to the hut.
    ///
    /// The breeding item stays in the inventory unless it alone fills it.
    pub fn dump<W: HerdWorld, I: Inventory>(&self, cx: &mut HerdCx<'_, W, I>) -> ActionResult<HerdState>
    where
        St: HerdStrategy<W, I>,
    {
        cx.agent.set_status(Status::Dumping);
        let hut = cx.agent.hut;
        match cx.env.move_toward(&mut cx.agent.pos, hut.pos)? {
            PathStatus::EnRoute => return Ok(Transition::To(HerdState::Dump)),
            PathStatus::Unreachable => {
                cx.set_delay(self.policy.no_tool_delay);
                return Ok(Transition::To(HerdState::Decide));
            }
            PathStatus::Arrived => {}
        }

        let keep = self.strategy.breeding_item();
        let mut loot = cx.agent.inventory.loot();
        if loot.iter().any(|s| s.kind != keep) {
            loot.retain(|s| s.kind != keep);
        } else if !cx.agent.inventory.is_full() {
            loot.clear();
        }
        if !loot.is_empty() {
            cx.env.store_in_building(hut.id, &loot)?;
            for stack in &loot {
                cx.agent.inventory.remove(stack.kind, stack.count)?;
            }
            debug!(citizen = %cx.agent.citizen, stacks = loot.len(), "dumped inventory");
        }
        Ok(Transition::To(HerdState::Decide))
    }
}

impl<St> Herder<St> {
    /// Build the registry for this behavior.
    ///
    /// `Preparing` is the entry state and `Decide` the fallback.  A full
    /// inventory pre-empts every state and sends the citizen to `Dump`.
    pub fn registry<W, I>(self: Arc<Self>) -> HerdResult<HerdRegistry<W, I>>
    where
        St: HerdStrategy<W, I>,
        W: HerdWorld + 'static,
        I: Inventory + 'static,
    {
        let name = self.strategy.name();
        let (prepare, decide, breed, butcher, harvest, dump, interrupt) = (
            Arc::clone(&self),
            Arc::clone(&self),
            Arc::clone(&self),
            Arc::clone(&self),
            Arc::clone(&self),
            Arc::clone(&self),
            self,
        );

        let registry = HerdRegistry::<W, I>::builder(name, HerdState::Preparing)
            .fallback(HerdState::Decide)
            .target(HerdState::Preparing, move |cx| prepare.prepare(cx))
            .target(HerdState::Decide, move |cx| decide.decide(cx))
            .target(HerdState::Breed, move |cx| breed.breed(cx))
            .target(HerdState::Butcher, move |cx| butcher.butcher(cx))
            .target(HerdState::Harvest, move |cx| St::harvest(&harvest, cx))
            .target(HerdState::Dump, move |cx| dump.dump(cx))
            .interrupt(
                |agent: &Herdsman<I>, _: &W| agent.inventory.is_full(),
                move |cx| interrupt.dump(cx),
            )
            .on_transition(|agent: &mut Herdsman<I>, from: HerdState, _| {
                if from.is_walking() {
                    agent.walk_target = None;
                }
            })
            .build()?;
        Ok(registry)
    }
}
