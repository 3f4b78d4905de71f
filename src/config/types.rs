use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ItemId, Material};

/// Tunable agent settings, persisted as TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master switch for automatic inventory rearrangement
    #[serde(default)]
    pub allow_inventory: bool,

    #[serde(default = "default_ticks_between_inventory_moves")]
    pub ticks_between_inventory_moves: u32,

    #[serde(default)]
    pub inventory_move_only_if_stationary: bool,

    /// Skip tools that are about to break
    #[serde(default)]
    pub item_saver: bool,

    #[serde(default = "default_item_saver_threshold")]
    pub item_saver_threshold: u32,

    /// Disposable blocks in priority order
    #[serde(default = "default_acceptable_throwaway_items")]
    pub acceptable_throwaway_items: Vec<ItemId>,

    /// Material the hotbar tool slot is kept ready for
    #[serde(default = "default_hotbar_tool_target")]
    pub hotbar_tool_target: Material,

    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_true")]
    pub prefix_control: bool,

    #[serde(default = "default_true")]
    pub chat_control: bool,

    #[serde(default)]
    pub chat_control_anyway: bool,

    #[serde(default = "default_true")]
    pub echo_commands: bool,

    #[serde(default)]
    pub censor_ran_commands: bool,
}

// Default values
fn default_ticks_between_inventory_moves() -> u32 {
    1
}

fn default_item_saver_threshold() -> u32 {
    10
}

fn default_acceptable_throwaway_items() -> Vec<ItemId> {
    ["dirt", "cobblestone", "netherrack", "stone"]
        .into_iter()
        .map(ItemId::from)
        .collect()
}

fn default_hotbar_tool_target() -> Material {
    Material::new("stone")
}

fn default_prefix() -> String {
    "#".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            allow_inventory: false,
            ticks_between_inventory_moves: default_ticks_between_inventory_moves(),
            inventory_move_only_if_stationary: false,
            item_saver: false,
            item_saver_threshold: default_item_saver_threshold(),
            acceptable_throwaway_items: default_acceptable_throwaway_items(),
            hotbar_tool_target: default_hotbar_tool_target(),
            prefix: default_prefix(),
            prefix_control: true,
            chat_control: true,
            chat_control_anyway: false,
            echo_commands: true,
            censor_ran_commands: false,
        }
    }
}

/// Errors from named setting access
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingError {
    #[error("no setting named `{0}`")]
    Unknown(String),
    #[error("setting `{0}` is not a boolean")]
    NotBoolean(String),
    #[error("invalid value `{value}` for setting `{name}`")]
    InvalidValue { name: String, value: String },
}

const SETTING_NAMES: &[&str] = &[
    "allow_inventory",
    "ticks_between_inventory_moves",
    "inventory_move_only_if_stationary",
    "item_saver",
    "item_saver_threshold",
    "acceptable_throwaway_items",
    "hotbar_tool_target",
    "prefix",
    "prefix_control",
    "chat_control",
    "chat_control_anyway",
    "echo_commands",
    "censor_ran_commands",
];

impl Settings {
    /// All setting names, in declaration order
    pub fn names() -> &'static [&'static str] {
        SETTING_NAMES
    }

    /// Resolve a user-typed name to its canonical spelling (case-insensitive)
    pub fn canonical_name(name: &str) -> Option<&'static str> {
        SETTING_NAMES
            .iter()
            .copied()
            .find(|n| n.eq_ignore_ascii_case(name))
    }

    fn bool_mut(&mut self, name: &str) -> Option<&mut bool> {
        match name {
            "allow_inventory" => Some(&mut self.allow_inventory),
            "inventory_move_only_if_stationary" => Some(&mut self.inventory_move_only_if_stationary),
            "item_saver" => Some(&mut self.item_saver),
            "prefix_control" => Some(&mut self.prefix_control),
            "chat_control" => Some(&mut self.chat_control),
            "chat_control_anyway" => Some(&mut self.chat_control_anyway),
            "echo_commands" => Some(&mut self.echo_commands),
            "censor_ran_commands" => Some(&mut self.censor_ran_commands),
            _ => None,
        }
    }

    /// Whether the named setting holds a boolean
    pub fn is_boolean(name: &str) -> bool {
        Settings::default().bool_mut(name).is_some()
    }

    /// Current value of a setting rendered the way `set` accepts it
    pub fn get(&self, name: &str) -> Result<String, SettingError> {
        let canonical = Self::canonical_name(name).ok_or_else(|| SettingError::Unknown(name.to_string()))?;
        let value = match canonical {
            "allow_inventory" => self.allow_inventory.to_string(),
            "ticks_between_inventory_moves" => self.ticks_between_inventory_moves.to_string(),
            "inventory_move_only_if_stationary" => self.inventory_move_only_if_stationary.to_string(),
            "item_saver" => self.item_saver.to_string(),
            "item_saver_threshold" => self.item_saver_threshold.to_string(),
            "acceptable_throwaway_items" => self
                .acceptable_throwaway_items
                .iter()
                .map(|i| i.as_str())
                .collect::<Vec<_>>()
                .join(","),
            "hotbar_tool_target" => self.hotbar_tool_target.as_str().to_string(),
            "prefix" => self.prefix.clone(),
            "prefix_control" => self.prefix_control.to_string(),
            "chat_control" => self.chat_control.to_string(),
            "chat_control_anyway" => self.chat_control_anyway.to_string(),
            "echo_commands" => self.echo_commands.to_string(),
            "censor_ran_commands" => self.censor_ran_commands.to_string(),
            _ => return Err(SettingError::Unknown(name.to_string())),
        };
        Ok(value)
    }

    /// Parse `value` and assign it to the named setting
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), SettingError> {
        let canonical = Self::canonical_name(name).ok_or_else(|| SettingError::Unknown(name.to_string()))?;
        let invalid = || SettingError::InvalidValue {
            name: canonical.to_string(),
            value: value.to_string(),
        };

        if let Some(flag) = self.bool_mut(canonical) {
            *flag = value.parse::<bool>().map_err(|_| invalid())?;
            return Ok(());
        }

        match canonical {
            "ticks_between_inventory_moves" => {
                self.ticks_between_inventory_moves = value.parse().map_err(|_| invalid())?;
            }
            "item_saver_threshold" => {
                self.item_saver_threshold = value.parse().map_err(|_| invalid())?;
            }
            "acceptable_throwaway_items" => {
                self.acceptable_throwaway_items = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ItemId::from)
                    .collect();
            }
            "hotbar_tool_target" => {
                if value.trim().is_empty() {
                    return Err(invalid());
                }
                self.hotbar_tool_target = Material::new(value.trim());
            }
            "prefix" => {
                if value.is_empty() {
                    return Err(invalid());
                }
                self.prefix = value.to_string();
            }
            _ => return Err(SettingError::Unknown(name.to_string())),
        }
        Ok(())
    }

    /// Flip a boolean setting, returning its new value
    pub fn toggle(&mut self, name: &str) -> Result<bool, SettingError> {
        let canonical = Self::canonical_name(name).ok_or_else(|| SettingError::Unknown(name.to_string()))?;
        let flag = self
            .bool_mut(canonical)
            .ok_or_else(|| SettingError::NotBoolean(canonical.to_string()))?;
        *flag = !*flag;
        Ok(*flag)
    }
}
