/// Chat and console control
///
/// Routes typed lines to setting changes or registered commands:
/// - `<setting>` toggles a boolean setting or prints a value
/// - `<setting> <value>` assigns a setting
/// - `<command> [args..]` runs a registered command
///
/// Lines starting with the configured prefix are always treated as commands.
/// Lines starting with `#!` run even when prefix and chat control are off.

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::config::{Settings, SettingsStore};

/// Runs regardless of `prefix_control` and `chat_control`
pub const FORCE_COMMAND_PREFIX: &str = "#!";

static COMMAND_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\S+)(.*)$").unwrap());

/// Handler for a registered command, given the remaining arguments
pub type CommandHandler = Box<dyn Fn(&ChatControl, &[String]) -> Result<()> + Send + Sync>;

pub struct ChatControl {
    store: SettingsStore,
    commands: BTreeMap<String, CommandHandler>,
}

impl ChatControl {
    /// Create a router with the built-in `help`, `settings`, `modified` and `reset` commands
    pub fn new(store: SettingsStore) -> Self {
        let mut control = Self {
            store,
            commands: BTreeMap::new(),
        };
        control.register("help", Box::new(help));
        control.register("settings", Box::new(list_settings));
        control.register("modified", Box::new(modified));
        control.register("reset", Box::new(reset));
        control
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Register a command; names are case-insensitive
    pub fn register(&mut self, name: &str, handler: CommandHandler) {
        self.commands.insert(name.to_lowercase(), handler);
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(&name.to_lowercase())
    }

    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Handle an outgoing chat line. Returns true when the line was consumed.
    pub fn handle_message(&self, msg: &str) -> bool {
        if let Some(command_str) = msg.strip_prefix(FORCE_COMMAND_PREFIX) {
            self.run_prefixed(command_str);
            return true;
        }

        let (prefix, prefix_control, chat_control) = self.store.read(|s| {
            (s.prefix.clone(), s.prefix_control, s.chat_control || s.chat_control_anyway)
        });

        if prefix_control && msg.starts_with(&prefix) {
            self.run_prefixed(&msg[prefix.len()..]);
            return true;
        }

        chat_control && self.run_command(msg)
    }

    fn run_prefixed(&self, command_str: &str) {
        if !self.run_command(command_str) && !command_str.trim().is_empty() {
            let (command, _) = split_command(command_str).unwrap_or_default();
            warn!("Command not found: {}", command);
        }
    }

    /// Run a command line without prefix. Returns false when nothing matched.
    pub fn run_command(&self, msg: &str) -> bool {
        if msg.is_empty() {
            return self.run_command("help");
        }
        let Some((command, rest)) = split_command(msg) else {
            return false;
        };
        let args: Vec<String> = rest.split_whitespace().map(str::to_string).collect();

        if let Some(name) = Settings::canonical_name(command) {
            match args.as_slice() {
                [] => {
                    self.log_ran_command(command, rest);
                    if Settings::is_boolean(name) {
                        if let Err(e) = self.store.toggle(name) {
                            warn!("{}", e);
                        }
                    } else if let Ok(value) = self.store.read(|s| s.get(name)) {
                        info!("{} = {}", name, value);
                    }
                    return true;
                }
                [value] => {
                    self.log_ran_command(command, rest);
                    if let Err(e) = self.store.set(name, value) {
                        warn!("{}", e);
                    }
                    return true;
                }
                _ => {}
            }
        }

        let Some(handler) = self.commands.get(&command.to_lowercase()) else {
            return false;
        };
        self.log_ran_command(command, rest);
        if let Err(e) = handler(self, args.as_slice()) {
            warn!("{} failed: {}", command, e);
        }
        true
    }

    fn log_ran_command(&self, command: &str, rest: &str) {
        let (echo, censor) = self.store.read(|s| (s.echo_commands, s.censor_ran_commands));
        if echo {
            let to_display = if censor {
                format!("{} ...", command)
            } else {
                format!("{}{}", command, rest)
            };
            info!("> {}", to_display);
        }
    }

    /// Completions for a prefixed chat line being typed
    pub fn complete_prefixed(&self, line: &str) -> Vec<String> {
        let (prefix, prefix_control) = self.store.read(|s| (s.prefix.clone(), s.prefix_control));
        if !prefix_control || !line.starts_with(&prefix) {
            return Vec::new();
        }
        let msg = &line[prefix.len()..];
        let completions = self.tab_complete(msg);
        if arguments(msg).len() == 1 {
            completions.into_iter().map(|c| format!("{}{}", prefix, c)).collect()
        } else {
            completions
        }
    }

    /// Completions for the last word of `msg`
    pub fn tab_complete(&self, msg: &str) -> Vec<String> {
        let args = arguments(msg);
        match args.as_slice() {
            [partial] => {
                let partial = partial.to_lowercase();
                let mut names: Vec<String> = self
                    .command_names()
                    .chain(Settings::names().iter().copied())
                    .filter(|name| name.starts_with(&partial))
                    .map(str::to_string)
                    .collect();
                names.sort();
                names.dedup();
                names
            }
            [setting, partial] => {
                let Some(name) = Settings::canonical_name(setting) else {
                    return Vec::new();
                };
                let Ok(current) = self.store.read(|s| s.get(name)) else {
                    return Vec::new();
                };
                if Settings::is_boolean(name) {
                    let other = if current == "true" { "false" } else { "true" };
                    [current.as_str(), other]
                        .into_iter()
                        .filter(|v| v.starts_with(&partial.to_lowercase()))
                        .map(str::to_string)
                        .collect()
                } else {
                    vec![current]
                }
            }
            _ => Vec::new(),
        }
    }
}

/// Split a line into its first word and the untouched remainder
fn split_command(msg: &str) -> Option<(&str, &str)> {
    let caps = COMMAND_LINE.captures(msg)?;
    let command = caps.get(1)?.as_str();
    let rest = caps.get(2).map_or("", |m| m.as_str());
    Some((command, rest))
}

/// Whitespace-separated words, with an empty trailing word when the line ends in space
fn arguments(msg: &str) -> Vec<&str> {
    let mut args: Vec<&str> = msg.split_whitespace().collect();
    if msg.is_empty() || msg.ends_with(char::is_whitespace) {
        args.push("");
    }
    args
}

fn help(control: &ChatControl, _args: &[String]) -> Result<()> {
    let commands: Vec<&str> = control.command_names().collect();
    info!("Commands: {}", commands.join(", "));
    info!("Type a setting name to toggle or show it, or `<setting> <value>` to change it");
    Ok(())
}

fn list_settings(control: &ChatControl, _args: &[String]) -> Result<()> {
    let current = control.store().snapshot();
    for name in Settings::names() {
        info!("{} = {}", name, current.get(name)?);
    }
    Ok(())
}

fn modified(control: &ChatControl, _args: &[String]) -> Result<()> {
    let defaults = Settings::default();
    let current = control.store().snapshot();
    let mut any = false;
    for name in Settings::names() {
        let value = current.get(name)?;
        if value != defaults.get(name)? {
            info!("{} = {}", name, value);
            any = true;
        }
    }
    if !any {
        info!("All settings are at their defaults");
    }
    Ok(())
}

fn reset(control: &ChatControl, args: &[String]) -> Result<()> {
    let [name] = args else {
        return Err(anyhow!("usage: reset <setting>"));
    };
    let default = Settings::default().get(name)?;
    control.store().set(name, &default)?;
    Ok(())
}
