use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::model::{Avatar, ConnId, Direction};

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Frame was not valid JSON for any known message kind.
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A chat line relayed verbatim between the members of a room.
///
/// The hub never inspects, persists or rate-limits the content; the payload
/// is whatever the sender put on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub sender: String,
    pub message: String,
    pub timestamp: String,
    pub room_id: String,
    pub profile: String,
}

/// Messages a client sends to the hub.
///
/// SDP and ICE payloads are opaque pass-throughs; the hub forwards them
/// without interpretation. The `user_id` a client puts on a signaling
/// message is its *claim* about the target and is never trusted as a sender
/// identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum ClientMessage {
    #[serde(rename = "chatConnect", rename_all = "camelCase")]
    ChatConnect {
        name: String,
        profile: String,
        space_id: String,
    },
    #[serde(rename = "sendMessage")]
    SendMessage(ChatMessage),
    #[serde(rename = "player-join")]
    PlayerJoin {
        room: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
    },
    #[serde(rename = "player-move")]
    PlayerMove {
        room: String,
        x: f64,
        y: f64,
        direction: Direction,
    },
    #[serde(rename = "joinRoom", rename_all = "camelCase")]
    JoinRoom { room_id: String, user_name: String },
    #[serde(rename = "offer", rename_all = "camelCase")]
    Offer {
        sdp: Value,
        room_id: String,
        user_id: String,
        user_name: String,
    },
    #[serde(rename = "answer", rename_all = "camelCase")]
    Answer {
        sdp: Value,
        room_id: String,
        user_id: String,
        user_name: String,
    },
    #[serde(rename = "candidate", rename_all = "camelCase")]
    Candidate {
        candidate: Value,
        room_id: String,
        user_id: String,
        user_name: String,
    },
}

/// Messages the hub pushes to clients.
///
/// Relayed signaling messages always carry the transport-established sender
/// identity in `user_id`, regardless of what the sending client claimed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum ServerMessage {
    /// Connection handshake: tells a client its assigned identity.
    #[serde(rename = "welcome")]
    Welcome { id: ConnId },
    #[serde(rename = "chatMembers")]
    ChatMembers(Vec<Avatar>),
    #[serde(rename = "receiveMessage")]
    ReceiveMessage(ChatMessage),
    /// Full roster, sent only to a freshly joined connection.
    #[serde(rename = "players-sync")]
    PlayersSync(Vec<Avatar>),
    #[serde(rename = "player-joined")]
    PlayerJoined(Avatar),
    #[serde(rename = "player-moved")]
    PlayerMoved(Avatar),
    #[serde(rename = "player-left")]
    PlayerLeft(ConnId),
    #[serde(rename = "newUser", rename_all = "camelCase")]
    NewUser { user_id: ConnId, user_name: String },
    #[serde(rename = "offer", rename_all = "camelCase")]
    Offer {
        offer: Value,
        user_id: ConnId,
        user_name: String,
    },
    #[serde(rename = "answer", rename_all = "camelCase")]
    Answer {
        answer: Value,
        user_id: ConnId,
        user_name: String,
    },
    #[serde(rename = "candidate", rename_all = "camelCase")]
    Candidate {
        candidate: Value,
        user_id: ConnId,
        user_name: String,
    },
    #[serde(rename = "userDisconnected")]
    UserDisconnected(ConnId),
}

impl ClientMessage {
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(frame)?)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl ServerMessage {
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(frame)?)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}
