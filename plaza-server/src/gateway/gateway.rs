use axum::extract::ws::Message;
use plaza_core::{ChatMessage, ClientMessage, ConnId, Direction, ServerMessage};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::HubConfig;
use crate::gateway::ConnSession;
use crate::room::{PresenceRooms, VideoRooms};
use crate::signaling::PeerRegistry;

/// The hub's single entry and exit point.
///
/// Owns the peer table and both room registries; every inbound message goes
/// through [`Gateway::dispatch`] and every outbound message leaves through
/// the peer registry. Constructed once per process and shared behind an
/// `Arc` — there is no ambient global state.
pub struct Gateway {
    peers: PeerRegistry,
    presence: PresenceRooms,
    video: VideoRooms,
    config: HubConfig,
}

impl Gateway {
    pub fn new(config: HubConfig) -> Self {
        let presence = PresenceRooms::new(config.spawn_range);
        Self {
            peers: PeerRegistry::new(),
            presence,
            video: VideoRooms::new(),
            config,
        }
    }

    /// Deterministic spawn points for tests.
    pub fn with_seed(config: HubConfig, seed: u64) -> Self {
        let presence = PresenceRooms::with_seed(config.spawn_range, seed);
        Self {
            peers: PeerRegistry::new(),
            presence,
            video: VideoRooms::new(),
            config,
        }
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn presence(&self) -> &PresenceRooms {
        &self.presence
    }

    pub fn video(&self) -> &VideoRooms {
        &self.video
    }

    pub fn peers(&self) -> &PeerRegistry {
        &self.peers
    }

    /// Register a fresh connection: store its outbound sink, greet it with
    /// its transport-assigned identity and hand back its session.
    pub fn register(&self, conn: ConnId, tx: mpsc::UnboundedSender<Message>) -> ConnSession {
        self.peers.add_peer(conn.clone(), tx);
        self.peers
            .send_to(&conn, &ServerMessage::Welcome { id: conn.clone() });
        info!(%conn, "connection registered");
        ConnSession::new(conn)
    }

    /// Dispatch one inbound message for the connection owning `session`.
    ///
    /// Nothing here is fatal: stale references and unknown targets are
    /// dropped quietly, per protocol.
    pub fn dispatch(&self, session: &mut ConnSession, msg: ClientMessage) {
        match msg {
            ClientMessage::ChatConnect { space_id, .. } => self.on_chat_connect(session, space_id),
            ClientMessage::SendMessage(chat) => self.on_send_message(session, chat),
            ClientMessage::PlayerJoin { room, name, x, y } => {
                self.on_player_join(session, room, name, x, y);
            }
            ClientMessage::PlayerMove {
                room,
                x,
                y,
                direction,
            } => self.on_player_move(session, &room, x, y, direction),
            ClientMessage::JoinRoom { room_id, user_name } => {
                self.on_video_join(session, room_id, user_name);
            }
            // Signaling relays never trust the client-claimed `user_id`;
            // the forwarded sender identity is the connection's own.
            ClientMessage::Offer {
                sdp,
                room_id,
                user_name,
                ..
            } => self.relay(
                session,
                &room_id,
                ServerMessage::Offer {
                    offer: sdp,
                    user_id: session.id.clone(),
                    user_name,
                },
            ),
            ClientMessage::Answer {
                sdp,
                room_id,
                user_name,
                ..
            } => self.relay(
                session,
                &room_id,
                ServerMessage::Answer {
                    answer: sdp,
                    user_id: session.id.clone(),
                    user_name,
                },
            ),
            ClientMessage::Candidate {
                candidate,
                room_id,
                user_name,
                ..
            } => self.relay(
                session,
                &room_id,
                ServerMessage::Candidate {
                    candidate,
                    user_id: session.id.clone(),
                    user_name,
                },
            ),
        }
    }

    /// Tear down a closed connection. Consumes the session, so the cleanup
    /// sequence runs exactly once per connection regardless of whether the
    /// death was a heartbeat timeout or an explicit close.
    pub fn disconnect(&self, session: ConnSession) {
        let ConnSession {
            id,
            presence_room,
            video_room,
        } = session;

        if let Some(room) = presence_room {
            self.leave_presence(&id, &room);
        }
        if let Some(room) = video_room {
            self.leave_video(&id, &room);
        }

        self.peers.remove_peer(&id);
        info!(conn = %id, "connection discarded");
    }

    fn on_chat_connect(&self, session: &ConnSession, space_id: String) {
        self.peers.join_group(&space_id, &session.id);
        self.peers.broadcast(
            &space_id,
            &ServerMessage::ChatMembers(self.presence.roster(&space_id)),
            Some(&session.id),
        );
    }

    fn on_send_message(&self, session: &ConnSession, chat: ChatMessage) {
        let room = chat.room_id.clone();
        self.peers.broadcast(
            &room,
            &ServerMessage::ReceiveMessage(chat),
            Some(&session.id),
        );
    }

    fn on_player_join(
        &self,
        session: &mut ConnSession,
        room: String,
        name: Option<String>,
        x: Option<f64>,
        y: Option<f64>,
    ) {
        // A join while already joined is an implicit leave, not an error.
        if let Some(previous) = session.presence_room.take() {
            self.leave_presence(&session.id, &previous);
        }

        let avatar = self.presence.join(&room, &session.id, name, x, y);
        self.peers.join_group(&room, &session.id);
        session.presence_room = Some(room.clone());

        self.peers.send_to(
            &session.id,
            &ServerMessage::PlayersSync(self.presence.roster(&room)),
        );
        self.peers.broadcast(
            &room,
            &ServerMessage::PlayerJoined(avatar),
            Some(&session.id),
        );
        debug!(conn = %session.id, room, "player joined");
    }

    fn on_player_move(
        &self,
        session: &ConnSession,
        room: &str,
        x: f64,
        y: f64,
        direction: Direction,
    ) {
        // Out-of-order updates after a leave are expected; drop them.
        let Some(avatar) = self.presence.apply_move(room, &session.id, x, y, direction) else {
            debug!(conn = %session.id, room, "movement for stale membership dropped");
            return;
        };
        self.peers.broadcast(
            room,
            &ServerMessage::PlayerMoved(avatar),
            Some(&session.id),
        );
    }

    fn on_video_join(&self, session: &mut ConnSession, room_id: String, user_name: String) {
        if let Some(previous) = session.video_room.take() {
            self.leave_video(&session.id, &previous);
        }

        self.peers.join_group(&room_id, &session.id);
        self.video
            .insert(&room_id, session.id.clone(), user_name.clone());
        session.video_room = Some(room_id.clone());

        // Existing peers initiate offers toward the newcomer on this cue.
        self.peers.broadcast(
            &room_id,
            &ServerMessage::NewUser {
                user_id: session.id.clone(),
                user_name,
            },
            Some(&session.id),
        );
        debug!(conn = %session.id, room = room_id, "video participant joined");
    }

    fn relay(&self, session: &ConnSession, room_id: &str, msg: ServerMessage) {
        self.peers.broadcast(room_id, &msg, Some(&session.id));
    }

    /// Leave sequence shared by implicit leaves and disconnects: notify the
    /// room, remove the participant, then refresh the roster for whoever is
    /// left. Consumers rely on seeing the leaver's identity before it
    /// disappears from the snapshot.
    fn leave_presence(&self, conn: &ConnId, room: &str) {
        self.peers
            .broadcast(room, &ServerMessage::PlayerLeft(conn.clone()), Some(conn));
        self.presence.remove(room, conn);
        self.peers.leave_group(room, conn);
        self.peers.broadcast(
            room,
            &ServerMessage::ChatMembers(self.presence.roster(room)),
            Some(conn),
        );
        debug!(%conn, room, "player left");
    }

    fn leave_video(&self, conn: &ConnId, room: &str) {
        self.video.remove(room, conn);
        self.peers.leave_group(room, conn);
        self.peers.broadcast(
            room,
            &ServerMessage::UserDisconnected(conn.clone()),
            Some(conn),
        );
        debug!(%conn, room, "video participant left");
    }
}
