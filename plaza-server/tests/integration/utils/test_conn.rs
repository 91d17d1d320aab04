use axum::extract::ws::Message;
use plaza_core::{ClientMessage, ConnId, ServerMessage};
use plaza_server::{ConnSession, Gateway};
use tokio::sync::mpsc;

/// A fake connection wired straight into the gateway, capturing every
/// outbound frame for assertions. The gateway is fully synchronous, so no
/// runtime is needed — frames land in an unbounded channel immediately.
pub struct TestConn {
    pub id: ConnId,
    session: ConnSession,
    rx: mpsc::UnboundedReceiver<Message>,
}

impl TestConn {
    pub fn connect(gateway: &Gateway, id: &str) -> Self {
        let id = ConnId::from(id);
        let (tx, rx) = mpsc::unbounded_channel();
        let session = gateway.register(id.clone(), tx);
        let mut conn = Self { id, session, rx };

        // Every connection is greeted with its assigned identity first.
        match conn.try_next() {
            Some(ServerMessage::Welcome { id }) => assert_eq!(id, conn.id),
            other => panic!("expected welcome, got {other:?}"),
        }
        conn
    }

    pub fn send(&mut self, gateway: &Gateway, msg: ClientMessage) {
        gateway.dispatch(&mut self.session, msg);
    }

    /// Pop the next captured outbound message, if any is queued.
    pub fn try_next(&mut self) -> Option<ServerMessage> {
        match self.rx.try_recv().ok()? {
            Message::Text(text) => {
                Some(ServerMessage::decode(&text).expect("outbound frame must decode"))
            }
            _ => None,
        }
    }

    /// Pop the next message, panicking when nothing is queued.
    pub fn next(&mut self) -> ServerMessage {
        self.try_next().expect("expected a queued outbound message")
    }

    /// Drain everything currently queued.
    pub fn drain(&mut self) -> Vec<ServerMessage> {
        let mut out = Vec::new();
        while let Some(msg) = self.try_next() {
            out.push(msg);
        }
        out
    }

    /// Run the disconnect cleanup path for this connection.
    pub fn disconnect(self, gateway: &Gateway) {
        gateway.disconnect(self.session);
    }
}
