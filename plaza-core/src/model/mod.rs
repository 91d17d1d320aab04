mod avatar;
mod conn;
mod message;

pub use avatar::{Avatar, Direction};
pub use conn::ConnId;
pub use message::{ChatMessage, ClientMessage, ProtocolError, ServerMessage};
