//! Startup configuration: who the user is, which groups exist, and where
//! the history API lives.
//!
//! All settings have defaults so a session can start with zero
//! configuration for local development; environment variables override.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use parley_shared::constants::LOBBY_CHANNEL;
use parley_shared::types::{ChannelId, GroupInfo};
use parley_store::ChannelDirectory;

/// Immutable input to the channel directory, plus the server location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Username this session signs in as.
    /// Env: `PARLEY_USERNAME`
    pub username: String,

    /// Group channels, in display order.
    #[serde(default = "default_groups")]
    pub groups: Vec<GroupInfo>,

    /// Initial friend roster.
    #[serde(default)]
    pub friends: Vec<String>,

    /// Base URL of the history/API server.
    /// Env: `PARLEY_SERVER_URL`
    /// Default: `http://127.0.0.1:5000`
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_groups() -> Vec<GroupInfo> {
    vec![GroupInfo {
        id: ChannelId::new(LOBBY_CHANNEL),
        name: "Lobby".to_string(),
        description: "Chat with everyone in the app".to_string(),
    }]
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            username: "guest".to_string(),
            groups: default_groups(),
            friends: Vec::new(),
            server_url: default_server_url(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading session config from {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("parsing session config from {}", path.display()))?;
        Ok(config)
    }

    /// Apply environment-variable overrides, falling back to the current
    /// values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(username) = std::env::var("PARLEY_USERNAME") {
            if !username.is_empty() {
                self.username = username;
            }
        }
        if let Ok(url) = std::env::var("PARLEY_SERVER_URL") {
            if !url.is_empty() {
                self.server_url = url;
            }
        }
        self
    }

    /// Build the channel directory this configuration describes.
    pub fn directory(&self) -> ChannelDirectory {
        ChannelDirectory::new(
            self.username.clone(),
            self.groups.clone(),
            self.friends.iter().cloned(),
        )
    }
}
