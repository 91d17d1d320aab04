use crate::room::RoomRegistry;

/// Video-call membership per room: connection identity mapped to display
/// name only. Holds no media and no position data; entries exist so
/// signaling fan-out knows who is on the call.
pub type VideoRooms = RoomRegistry<String>;
