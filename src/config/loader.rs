use super::types::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const CONFIG_FILE_NAME: &str = "hotbar_keeper.toml";

pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    pub fn new() -> Self {
        let config_path = Self::get_config_path();
        Self { config_path }
    }

    /// Loader bound to an explicit file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    fn get_config_path() -> PathBuf {
        // Settings live next to the executable so several agents can run side by side
        let exe_path = std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("."));

        let exe_dir = exe_path.parent()
            .unwrap_or_else(|| Path::new("."));

        exe_dir.join(CONFIG_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Settings> {
        if !self.config_path.exists() {
            info!("Config file not found, creating default config at {:?}", self.config_path);
            let settings = Settings::default();
            self.save(&settings)?;
            return Ok(settings);
        }

        let contents = fs::read_to_string(&self.config_path)
            .context("Failed to read config file")?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.config_path))?;

        info!(
            "Loaded configuration from {:?} (allow_inventory = {}, {} ticks between moves)",
            self.config_path, settings.allow_inventory, settings.ticks_between_inventory_moves
        );
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(settings)
            .context("Failed to serialize config")?;

        fs::write(&self.config_path, toml_string)
            .context("Failed to write config file")?;

        info!("Saved configuration to {:?}", self.config_path);
        Ok(())
    }

}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
