use plaza_core::ConnId;

/// Per-connection record binding the transport identity to at most one
/// presence-room and one video-room membership.
///
/// Created by the gateway on connect, owned by the connection's task while
/// it lives, and consumed by the gateway's disconnect path — cleanup cannot
/// run twice for the same connection.
#[derive(Debug)]
pub struct ConnSession {
    pub(crate) id: ConnId,
    pub(crate) presence_room: Option<String>,
    pub(crate) video_room: Option<String>,
}

impl ConnSession {
    pub(crate) fn new(id: ConnId) -> Self {
        Self {
            id,
            presence_room: None,
            video_room: None,
        }
    }

    pub fn id(&self) -> &ConnId {
        &self.id
    }

    pub fn presence_room(&self) -> Option<&str> {
        self.presence_room.as_deref()
    }

    pub fn video_room(&self) -> Option<&str> {
        self.video_room.as_deref()
    }
}
