use std::collections::HashSet;

use axum::extract::ws::Message;
use dashmap::DashMap;
use plaza_core::{ConnId, ServerMessage};
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Transport-level peer table: one outbound sink per live connection plus
/// named broadcast groups.
///
/// Group names form a single namespace shared by chat, presence and video
/// traffic, exactly like the socket rooms they model; the per-kind room
/// *state* lives in separate registries. A reverse membership index lets a
/// disconnecting peer leave every group it joined.
pub struct PeerRegistry {
    peers: DashMap<ConnId, mpsc::UnboundedSender<Message>>,
    groups: DashMap<String, Vec<ConnId>>,
    memberships: DashMap<ConnId, HashSet<String>>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self {
            peers: DashMap::new(),
            groups: DashMap::new(),
            memberships: DashMap::new(),
        }
    }

    pub fn add_peer(&self, conn: ConnId, tx: mpsc::UnboundedSender<Message>) {
        self.peers.insert(conn, tx);
    }

    /// Drop the sink and leave every group the connection had joined.
    pub fn remove_peer(&self, conn: &ConnId) {
        self.peers.remove(conn);
        let Some((_, groups)) = self.memberships.remove(conn) else {
            return;
        };
        for group in groups {
            self.drop_member(&group, conn);
        }
    }

    pub fn join_group(&self, group: &str, conn: &ConnId) {
        let mut members = self.groups.entry(group.to_string()).or_default();
        if !members.contains(conn) {
            members.push(conn.clone());
        }
        drop(members);

        self.memberships
            .entry(conn.clone())
            .or_default()
            .insert(group.to_string());
    }

    pub fn leave_group(&self, group: &str, conn: &ConnId) {
        if let Some(mut groups) = self.memberships.get_mut(conn) {
            groups.remove(group);
        }
        self.drop_member(group, conn);
    }

    pub fn is_member(&self, group: &str, conn: &ConnId) -> bool {
        self.groups
            .get(group)
            .map(|m| m.contains(conn))
            .unwrap_or(false)
    }

    pub fn contains_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Send one message to one connection. A missing or closed peer is
    /// logged and skipped; it never fails the caller.
    pub fn send_to(&self, conn: &ConnId, msg: &ServerMessage) {
        let json = match msg.encode() {
            Ok(json) => json,
            Err(e) => {
                error!("failed to serialize outbound message: {e}");
                return;
            }
        };
        let Some(peer) = self.peers.get(conn) else {
            warn!(%conn, "send to unknown connection dropped");
            return;
        };
        if peer.send(Message::Text(json.into())).is_err() {
            warn!(%conn, "connection channel closed mid-send");
        }
    }

    /// Multicast to a group, optionally excluding one member (the sender).
    /// An absent group means nobody is listening; nothing is sent.
    pub fn broadcast(&self, group: &str, msg: &ServerMessage, except: Option<&ConnId>) {
        let targets: Vec<ConnId> = match self.groups.get(group) {
            Some(members) => members
                .iter()
                .filter(|c| Some(*c) != except)
                .cloned()
                .collect(),
            None => return,
        };
        if targets.is_empty() {
            return;
        }

        let json = match msg.encode() {
            Ok(json) => json,
            Err(e) => {
                error!("failed to serialize broadcast message: {e}");
                return;
            }
        };
        for conn in targets {
            if let Some(peer) = self.peers.get(&conn) {
                let _ = peer.send(Message::Text(json.clone().into()));
            }
        }
    }

    fn drop_member(&self, group: &str, conn: &ConnId) {
        let Some(mut members) = self.groups.get_mut(group) else {
            return;
        };
        members.retain(|c| c != conn);
        let now_empty = members.is_empty();
        drop(members);

        if now_empty {
            self.groups.remove_if(group, |_, m| m.is_empty());
        }
    }
}

impl Default for PeerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
