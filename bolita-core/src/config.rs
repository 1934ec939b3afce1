use crate::prize::PrizeEntries;
use crate::{BolitaError, PrizeTable, RegionConfig, Result, Settler};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime configuration of the engines, usually loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub regions: RegionConfig,
    /// Merged over the built-in prizes, label by label.
    pub prize_overrides: PrizeEntries,
    pub single_action_position: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            regions: RegionConfig::default(),
            prize_overrides: PrizeEntries::new(),
            single_action_position: 1,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        tracing::debug!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.regions.validate()?;

        if !Settler::SINGLE_ACTION_POSITIONS.contains(&self.single_action_position) {
            return Err(BolitaError::config(format!(
                "Single Action position must be between 1 and 7, got {}",
                self.single_action_position
            )));
        }

        PrizeTable::from_entries(self.prize_overrides.clone()).validate()
    }

    pub fn prize_table(&self) -> PrizeTable {
        PrizeTable::with_overrides(&self.prize_overrides)
    }

    pub fn settler(&self) -> Settler {
        Settler::new(self.regions.clone(), self.single_action_position)
    }
}
