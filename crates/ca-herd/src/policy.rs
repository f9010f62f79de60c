//! Tunables shared by every herding behavior.

use serde::{Deserialize, Serialize};

use crate::{HerdError, HerdResult};

/// Population limits, delays and experience rewards for a herder.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HerderPolicy {
    /// Herd size that triggers butchering, per hut level.
    pub max_animals_per_level: u32,
    /// Breedable animals needed before breeding is considered.
    pub breed_threshold:       usize,
    /// Ticks between two decisions.
    pub decide_delay:          u32,
    /// Back-off when no animals are around.
    pub idle_delay:            u32,
    /// Back-off while a tool or breeding item is missing.
    pub no_tool_delay:         u32,
    /// Search radius around the hut, in blocks.
    pub work_radius:           u32,
    pub exp_per_breed:         f64,
    pub exp_per_butcher:       f64,
}

impl Default for HerderPolicy {
    fn default() -> Self {
        Self {
            max_animals_per_level: 2,
            breed_threshold:       2,
            decide_delay:          40,
            idle_delay:            100,
            no_tool_delay:         20,
            work_radius:           20,
            exp_per_breed:         1.0,
            exp_per_butcher:       1.5,
        }
    }
}

impl HerderPolicy {
    /// Reject values that would make the herder butcher or breed forever.
    pub fn validate(&self) -> HerdResult<()> {
        if self.max_animals_per_level == 0 {
            return Err(HerdError::Config("max_animals_per_level must be at least 1".into()));
        }
        if self.breed_threshold < 2 {
            return Err(HerdError::Config(format!(
                "breed_threshold must be at least 2, got {}",
                self.breed_threshold
            )));
        }
        if self.work_radius == 0 {
            return Err(HerdError::Config("work_radius must be positive".into()));
        }
        if self.exp_per_breed < 0.0 || self.exp_per_butcher < 0.0 {
            return Err(HerdError::Config("experience rewards cannot be negative".into()));
        }
        Ok(())
    }

    /// Herd size at which the herder starts butchering.
    #[inline]
    pub fn cap(&self, hut_level: u32) -> usize {
        (self.max_animals_per_level as usize).saturating_mul(hut_level as usize)
    }
}
