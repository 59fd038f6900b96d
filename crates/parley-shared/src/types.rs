use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{LOBBY_CHANNEL, SYSTEM_SENDER};

/// Identifier of a conversation channel.
///
/// Group channels carry a server-assigned slug (`"lobby"`, `"gamers"`);
/// direct channels are identified by the peer's username.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ChannelId(pub String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The distinguished channel that always exists.
    pub fn lobby() -> Self {
        Self(LOBBY_CHANNEL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Metadata for a group channel, supplied once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupInfo {
    /// Unique channel identifier.
    pub id: ChannelId,
    /// Human-readable name shown in the channel list.
    pub name: String,
    /// Short description, shown as the presence summary while the group
    /// is the active channel.
    #[serde(default)]
    pub description: String,
}

/// A single chat message, as it appears both on the wire and in a
/// channel's local history.  Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Channel this message belongs to.
    pub channel: ChannelId,
    /// Sender username, or the reserved identity `"system"`.
    pub from: String,
    /// Message body.
    #[serde(rename = "message")]
    pub body: String,
    /// When the message was sent, as reported by the server.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a server notice attributed to the reserved `"system"` sender.
    pub fn system(channel: ChannelId, body: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            channel,
            from: SYSTEM_SENDER.to_string(),
            body: body.into(),
            timestamp,
        }
    }

    pub fn is_system(&self) -> bool {
        self.from == SYSTEM_SENDER
    }
}
