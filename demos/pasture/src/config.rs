//! Demo configuration: defaults, optionally overridden by a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use ca_core::SimConfig;
use ca_herd::{HerderPolicy, Shepherd, ShepherdConfig};

/// How log lines are rendered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Everything the demo reads from its config file.  Missing keys keep
/// their defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub sim:             SimConfig,
    pub policy:          HerderPolicy,
    pub shepherd:        ShepherdConfig,
    pub shepherds:       u32,
    pub sheep_per_hut:   u32,
    pub hut_level:       u32,
    /// Blocks between neighbouring huts.
    pub hut_spacing:     i32,
    pub satchel_slots:   usize,
    pub starting_wheat:  u32,
    pub output_dir:      PathBuf,
    pub log_format:      LogFormat,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sim:            SimConfig { total_ticks: 2_400, seed: 42, ..SimConfig::default() },
            policy:         Shepherd::default_policy(),
            shepherd:       ShepherdConfig::default(),
            shepherds:      4,
            sheep_per_hut:  6,
            hut_level:      3,
            hut_spacing:    48,
            satchel_slots:  9,
            starting_wheat: 16,
            output_dir:     PathBuf::from("output/pasture"),
            log_format:     LogFormat::Text,
        }
    }
}

impl DemoConfig {
    /// Defaults, or `path` layered over them when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.shepherds == 0 {
            bail!("shepherds must be positive");
        }
        if self.hut_level == 0 {
            bail!("hut_level must be positive");
        }
        self.policy.validate()?;
        self.shepherd.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_defaults_to_text() {
        let cfg: DemoConfig = serde_json::from_str(r#"{ "shepherds": 2 }"#).unwrap();
        assert_eq!(cfg.log_format, LogFormat::Text);
        assert_eq!(cfg.shepherds, 2);
    }

    #[test]
    fn json_log_format_parses() {
        let cfg: DemoConfig = serde_json::from_str(r#"{ "log_format": "json" }"#).unwrap();
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert!(serde_json::from_str::<DemoConfig>(r#"{ "log_format": "xml" }"#).is_err());
    }
}
