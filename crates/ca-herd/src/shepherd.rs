//! The shepherd: keeps sheep, shears them, and sometimes dyes the fleece.

use std::sync::Arc;

use ca_core::{DyeColor, EntityId, ItemKind, ToolType};
use ca_fsm::{ActionError, ActionResult, Transition};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collab::{Creature, CreatureKind, Inventory, PathStatus, ShearWorld};
use crate::herder::{HerdCx, HerdRegistry, HerdStrategy, Herder};
use crate::herdsman::Status;
use crate::{HerdError, HerdResult, HerdState, HerderPolicy};

/// Dye colours a shepherd may pick.  Black, the last one, is never rolled.
const DYE_COLORS: usize = 15;

/// Shearing rewards and wear.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShepherdConfig {
    pub exp_per_shear:        f64,
    /// Percent chance per hut level that a shorn sheep gets a new colour.
    pub dye_chance_per_level: u32,
    pub shear_wear:           u32,
}

impl Default for ShepherdConfig {
    fn default() -> Self {
        Self { exp_per_shear: 5.0, dye_chance_per_level: 1, shear_wear: 1 }
    }
}

impl ShepherdConfig {
    pub fn validate(&self) -> HerdResult<()> {
        if self.exp_per_shear < 0.0 {
            return Err(HerdError::Config("exp_per_shear cannot be negative".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Shepherd {
    config: ShepherdConfig,
}

impl Shepherd {
    pub fn new(config: ShepherdConfig) -> HerdResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ShepherdConfig {
        &self.config
    }

    /// The policy a shepherd runs with unless configured otherwise.
    pub fn default_policy() -> HerderPolicy {
        HerderPolicy { max_animals_per_level: 2, ..HerderPolicy::default() }
    }

    /// Shared shepherd registry for the world type `W` and inventory `I`.
    pub fn registry<W, I>(policy: HerderPolicy, config: ShepherdConfig) -> HerdResult<Arc<HerdRegistry<W, I>>>
    where
        W: ShearWorld + 'static,
        I: Inventory + 'static,
    {
        let herder = Arc::new(Herder::new(policy, Shepherd::new(config)?)?);
        Ok(Arc::new(herder.registry()?))
    }

    /// Percent chance that shearing at `hut_level` recolours the sheep.
    pub fn dye_chance(&self, hut_level: u32) -> u32 {
        hut_level.saturating_mul(self.config.dye_chance_per_level)
    }

    /// Roll against the dye chance and recolour `sheep` on success.
    ///
    /// A roll strictly below the chance succeeds, so 0 never dyes and 100
    /// always does.
    fn maybe_dye<W: ShearWorld, I>(&self, cx: &mut HerdCx<'_, W, I>, sheep: EntityId) -> Result<(), ActionError> {
        let chance = self.dye_chance(cx.agent.hut.level());
        if cx.agent.rng.percent() >= chance {
            return Ok(());
        }
        let color = DyeColor::ALL[cx.agent.rng.gen_range(0..DYE_COLORS)];
        debug!(citizen = %cx.agent.citizen, %sheep, %color, "dyed fleece");
        cx.env.dye_fleece(sheep, color)
    }
}

impl<W: ShearWorld, I: Inventory> HerdStrategy<W, I> for Shepherd {
    fn name(&self) -> &'static str {
        "shepherd"
    }

    fn creature(&self) -> CreatureKind {
        CreatureKind::Sheep
    }

    fn tools(&self) -> &[ToolType] {
        &[ToolType::Shears, ToolType::Axe]
    }

    fn breeding_item(&self) -> ItemKind {
        ItemKind::Wheat
    }

    fn is_harvestable(&self, creature: &Creature) -> bool {
        !creature.sheared && !creature.is_child()
    }

    fn harvest(herder: &Herder<Self>, cx: &mut HerdCx<'_, W, I>) -> ActionResult<HerdState> {
        let shepherd = herder.strategy();
        cx.agent.set_status(Status::Shearing);

        let herd = herder.search_for_animals(cx, CreatureKind::Sheep)?;
        if herd.is_empty() {
            return Ok(Transition::To(HerdState::Decide));
        }
        if !cx.agent.inventory.equip(ToolType::Shears) {
            cx.agent.set_status(Status::NeedTool(ToolType::Shears));
            return Ok(Transition::To(HerdState::Preparing));
        }
        let Some(sheep) = herd.iter().find(|c| <Shepherd as HerdStrategy<W, I>>::is_harvestable(shepherd, c)) else {
            return Ok(Transition::To(HerdState::Decide));
        };

        match herder.walk_to_animal(cx, sheep)? {
            PathStatus::EnRoute => return Ok(Transition::Stay),
            PathStatus::Unreachable => return Ok(Transition::To(HerdState::Decide)),
            PathStatus::Arrived => {}
        }

        let fortune = cx.agent.inventory.fortune();
        let wool = cx.env.shear(sheep.id, fortune)?;
        shepherd.maybe_dye(cx, sheep.id)?;
        cx.agent.inventory.damage_held_tool(shepherd.config.shear_wear)?;
        cx.agent.grant_experience(shepherd.config.exp_per_shear);
        cx.agent.actions_done += 1;
        debug!(citizen = %cx.agent.citizen, sheep = %sheep.id, "sheared");
        herder.stow(cx, wool)?;
        Ok(Transition::To(HerdState::Decide))
    }
}
