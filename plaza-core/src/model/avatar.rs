use serde::{Deserialize, Serialize};

use crate::model::ConnId;

/// Which way an avatar faces on the 2D map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Front,
    Back,
    Left,
    Right,
}

/// One participant inside a presence room.
///
/// `room` is a back-reference to the owning room identifier, kept for
/// bookkeeping only; ownership always lives in the room registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub id: ConnId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub direction: Direction,
    pub room: String,
}
