//! Application configuration model (`config.toml`).

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ticket::DEFAULT_TICKET_PREFIX;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageSettings {
    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Customer chat behaviour.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    #[serde(default = "default_ticket_prefix")]
    pub ticket_prefix: String,
    /// Delay before the follow-up message once a conversation ends.
    #[serde(default = "default_feedback_delay_ms")]
    pub feedback_delay_ms: u64,
    /// How long the follow-up stays on screen before the session resets.
    #[serde(default = "default_hold_delay_ms")]
    pub hold_delay_ms: u64,
    /// Delay between the reset and the new greeting.
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
}

impl ChatSettings {
    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }

    pub fn hold_delay(&self) -> Duration {
        Duration::from_millis(self.hold_delay_ms)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            ticket_prefix: default_ticket_prefix(),
            feedback_delay_ms: default_feedback_delay_ms(),
            hold_delay_ms: default_hold_delay_ms(),
            restart_delay_ms: default_restart_delay_ms(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_ticket_prefix() -> String {
    DEFAULT_TICKET_PREFIX.to_string()
}

fn default_feedback_delay_ms() -> u64 {
    2000
}

fn default_hold_delay_ms() -> u64 {
    4000
}

fn default_restart_delay_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}
