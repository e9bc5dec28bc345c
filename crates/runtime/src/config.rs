//! Session configuration structures and loaders.
use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use planner_core::RulesConfig;

use crate::api::RuntimeError;

/// Configuration for a planning session and its worker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub rules: RulesConfig,
    /// Capacity of the worker command queue.
    pub command_buffer: usize,
    /// Capacity of the event broadcast channel.
    pub event_buffer: usize,
    /// Snapshots kept for undo; 0 disables history.
    pub history_limit: usize,
}

impl SessionConfig {
    pub const DEFAULT_COMMAND_BUFFER: usize = 32;
    pub const DEFAULT_EVENT_BUFFER: usize = 100;
    pub const DEFAULT_HISTORY_LIMIT: usize = 64;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PLANNER_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `PLANNER_EVENT_BUFFER` - Event channel capacity (default: 100)
    /// - `PLANNER_HISTORY_LIMIT` - Undo snapshots kept (default: 64)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("PLANNER_COMMAND_BUFFER") {
            config.command_buffer = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("PLANNER_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }
        if let Some(limit) = read_env::<usize>("PLANNER_HISTORY_LIMIT") {
            config.history_limit = limit;
        }

        config
    }

    /// Loads configuration from a TOML file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse session config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), RuntimeError> {
        if self.command_buffer == 0 {
            return Err(RuntimeError::InvalidConfig {
                field: "command_buffer",
                reason: "must be at least 1",
            });
        }
        if self.event_buffer == 0 {
            return Err(RuntimeError::InvalidConfig {
                field: "event_buffer",
                reason: "must be at least 1",
            });
        }
        let start = self.rules.starting_attribute;
        if !(RulesConfig::ATTRIBUTE_MIN..=RulesConfig::ATTRIBUTE_MAX).contains(&start) {
            return Err(RuntimeError::InvalidConfig {
                field: "rules.starting_attribute",
                reason: "must lie within the attribute range",
            });
        }
        if self.rules.starting_tag_points as usize > RulesConfig::CREATION_TAGS {
            return Err(RuntimeError::InvalidConfig {
                field: "rules.starting_tag_points",
                reason: "exceeds the creation tag slots",
            });
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            command_buffer: Self::DEFAULT_COMMAND_BUFFER,
            event_buffer: Self::DEFAULT_EVENT_BUFFER,
            history_limit: Self::DEFAULT_HISTORY_LIMIT,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
