pub mod loader;
pub mod store;
pub mod types;

pub use loader::ConfigLoader;
pub use store::SettingsStore;
pub use types::{SettingError, Settings};
