pub mod config;
pub mod gateway;
pub mod room;
pub mod signaling;

pub use config::HubConfig;
pub use gateway::{ConnSession, Gateway};
pub use room::{PresenceRooms, RoomRegistry, VideoRooms};
pub use signaling::{PeerRegistry, ws_handler};
