//! `trend.toml` loading.

use std::path::Path;

use abm_behavior::TrendParams;
use abm_core::SimConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The whole file: a `[sim]` table and a `[model]` table, both optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub sim:   SimConfig,
    pub model: TrendParams,
}

impl TrendConfig {
    /// Read `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use abm_behavior::IndirectChannel;

    use super::*;

    #[test]
    fn partial_tables_keep_defaults() {
        let cfg: TrendConfig = toml::from_str(
            "[sim]\nseed = 7\n\n[model]\npopulation_size = 30\nchannel = \"facility_event\"\n",
        )
        .unwrap();
        assert_eq!(cfg.sim.seed, 7);
        assert_eq!(cfg.sim.max_ticks, SimConfig::default().max_ticks);
        assert_eq!(cfg.model.population_size, 30);
        assert_eq!(cfg.model.channel, IndirectChannel::FacilityEvent);
        assert_eq!(cfg.model.gossip_prob, 0.5);
    }

    #[test]
    fn no_path_means_defaults() {
        let cfg = TrendConfig::load(None).unwrap();
        assert_eq!(cfg.model, TrendParams::default());
    }
}
