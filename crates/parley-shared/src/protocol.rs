//! Wire protocol spoken with the message-distribution service.
//!
//! Event names are part of the wire contract and must match the server
//! byte-for-byte, so every enum below pins them through serde renames.
//! Frames are JSON objects of the shape `{"event": <name>, "data": <payload>}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParleyError;
use crate::types::{ChannelId, Message};

/// Events the client sends to the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Join a group channel's broadcast room.
    JoinGroup { group: ChannelId },

    /// Post a message to a channel (group or direct).
    SendMessage { channel: ChannelId, message: String },

    /// Invite a peer into a direct-message relationship.
    PrivateInvite { to: String },
}

impl ClientEvent {
    /// The wire name of this event.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::JoinGroup { .. } => "join_group",
            Self::SendMessage { .. } => "send_message",
            Self::PrivateInvite { .. } => "private_invite",
        }
    }

    /// Serialize to a JSON frame.
    pub fn to_json(&self) -> Result<String, ParleyError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Events pushed by the server over the real-time stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A chat message delivered to one of our channels.
    Message(Message),

    /// A server notice; the sender is implied to be `"system"`.
    System {
        channel: ChannelId,
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// A peer went online or offline.
    UserStatus {
        username: String,
        status: PresenceStatus,
    },

    /// A new (or re-announced) friend relationship.
    FriendUpdate { friend: String },

    /// A transport-reported, non-fatal error.
    Error { message: String },
}

impl ServerEvent {
    /// The wire name of this event.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::System { .. } => "system",
            Self::UserStatus { .. } => "user_status",
            Self::FriendUpdate { .. } => "friend_update",
            Self::Error { .. } => "error",
        }
    }

    /// Parse a JSON frame.  Frames with an unknown event name or missing
    /// payload fields are rejected here, before they can reach any state.
    pub fn from_json(frame: &str) -> Result<Self, ParleyError> {
        Ok(serde_json::from_str(frame)?)
    }
}

/// Online/offline status carried by `user_status` events.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Offline,
}

impl PresenceStatus {
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

/// Payload of the history fetch endpoint.
///
/// The server may omit the array entirely for a channel with no backlog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_event_names_match_wire_contract() {
        let join = ClientEvent::JoinGroup {
            group: ChannelId::lobby(),
        };
        let json = join.to_json().unwrap();
        assert!(json.contains("\"event\":\"join_group\""));
        assert!(json.contains("\"group\":\"lobby\""));

        let send = ClientEvent::SendMessage {
            channel: ChannelId::new("gamers"),
            message: "anyone up for a round?".to_string(),
        };
        assert_eq!(send.event_name(), "send_message");
        assert!(send.to_json().unwrap().contains("\"send_message\""));

        let invite = ClientEvent::PrivateInvite {
            to: "blake".to_string(),
        };
        assert_eq!(invite.event_name(), "private_invite");
    }

    #[test]
    fn test_inbound_message_frame() {
        let frame = r#"{
            "event": "message",
            "data": {
                "channel": "lobby",
                "from": "alexa",
                "message": "hi all",
                "timestamp": "2024-05-01T10:00:00Z"
            }
        }"#;
        let event = ServerEvent::from_json(frame).unwrap();
        match event {
            ServerEvent::Message(msg) => {
                assert_eq!(msg.channel.as_str(), "lobby");
                assert_eq!(msg.from, "alexa");
                assert_eq!(msg.body, "hi all");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_inbound_user_status_frame() {
        let frame = r#"{"event":"user_status","data":{"username":"alice","status":"online"}}"#;
        let event = ServerEvent::from_json(frame).unwrap();
        assert_eq!(
            event,
            ServerEvent::UserStatus {
                username: "alice".to_string(),
                status: PresenceStatus::Online,
            }
        );
        assert!(PresenceStatus::Online.is_online());
        assert!(!PresenceStatus::Offline.is_online());
    }

    #[test]
    fn test_malformed_frame_is_rejected() {
        // Missing the required "message" field.
        let frame = r#"{"event":"error","data":{}}"#;
        assert!(ServerEvent::from_json(frame).is_err());

        // Unknown event name.
        let frame = r#"{"event":"typing","data":{"channel":"lobby"}}"#;
        assert!(ServerEvent::from_json(frame).is_err());
    }

    #[test]
    fn test_history_response_tolerates_missing_messages() {
        let payload: HistoryResponse = serde_json::from_str("{}").unwrap();
        assert!(payload.messages.is_empty());

        let payload: HistoryResponse =
            serde_json::from_str(r#"{"messages":[]}"#).unwrap();
        assert!(payload.messages.is_empty());
    }
}
