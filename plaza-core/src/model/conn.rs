use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Transport-assigned connection identity.
///
/// Assigned by the hub when the WebSocket upgrade completes and never reused
/// after disconnect. This is the participant key in every room mapping; the
/// client is told its id in the welcome message but can never choose it.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct ConnId(String);

impl ConnId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First four characters of the id, used for generated display names.
    pub fn short_tag(&self) -> &str {
        self.0.get(..4).unwrap_or(&self.0)
    }
}

impl From<&str> for ConnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ConnId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
