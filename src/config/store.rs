use super::types::{SettingError, Settings};
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared, mutable settings handle.
///
/// Readers take a snapshot once per tick; the chat router is the only writer.
#[derive(Clone)]
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    /// Copy of the current settings
    pub fn snapshot(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Read a single value without cloning the whole snapshot
    pub fn read<T>(&self, f: impl FnOnce(&Settings) -> T) -> T {
        f(&self.settings.read())
    }

    pub fn set(&self, name: &str, value: &str) -> Result<(), SettingError> {
        let mut settings = self.settings.write();
        let old = settings.get(name)?;
        settings.set(name, value)?;
        let new = settings.get(name)?;
        if old != new {
            tracing::info!("Setting changed: {} {} -> {}", name, old, new);
        }
        Ok(())
    }

    pub fn toggle(&self, name: &str) -> Result<bool, SettingError> {
        let value = self.settings.write().toggle(name)?;
        tracing::info!("Setting toggled: {} -> {}", name, value);
        Ok(value)
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
