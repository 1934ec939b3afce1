use anyhow::Context;
use bolita_core::EngineConfig;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub config_file: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            config_file: None,
            verbose: false,
        }
    }
}

impl CliConfig {
    /// Engine configuration: the explicit file if given, else `config.json`
    /// in the data directory, else built-in defaults.
    pub fn load_engine_config(&self) -> anyhow::Result<EngineConfig> {
        if let Some(path) = &self.config_file {
            return read_engine_config(path);
        }

        let path = self.data_dir.join(CONFIG_FILE);
        if path.exists() {
            read_engine_config(&path)
        } else {
            tracing::debug!("No {} found, using built-in configuration", path.display());
            Ok(EngineConfig::default())
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bolita")
}

fn read_engine_config(path: &Path) -> anyhow::Result<EngineConfig> {
    EngineConfig::from_file(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}
