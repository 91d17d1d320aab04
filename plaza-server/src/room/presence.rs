use std::sync::{Mutex, PoisonError};

use plaza_core::{Avatar, ConnId, Direction};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::room::RoomRegistry;

/// Presence state for every active room: who stands where, facing which way.
///
/// Owns the spawn policy: joiners that supply no coordinates get a uniform
/// random point inside the configured range rather than a fixed origin.
pub struct PresenceRooms {
    rooms: RoomRegistry<Avatar>,
    spawn_range: (f64, f64),
    rng: Mutex<StdRng>,
}

impl PresenceRooms {
    pub fn new(spawn_range: (f64, f64)) -> Self {
        Self::with_rng(spawn_range, StdRng::from_entropy())
    }

    /// Deterministic variant for tests.
    pub fn with_seed(spawn_range: (f64, f64), seed: u64) -> Self {
        Self::with_rng(spawn_range, StdRng::seed_from_u64(seed))
    }

    fn with_rng(spawn_range: (f64, f64), rng: StdRng) -> Self {
        Self {
            rooms: RoomRegistry::new(),
            spawn_range,
            rng: Mutex::new(rng),
        }
    }

    /// Build the joining participant's avatar and add it to the room.
    ///
    /// A missing name falls back to a placeholder derived from the
    /// connection id; missing coordinates get a random spawn point. New
    /// joiners always face front.
    pub fn join(
        &self,
        room: &str,
        conn: &ConnId,
        name: Option<String>,
        x: Option<f64>,
        y: Option<f64>,
    ) -> Avatar {
        let (x, y) = self.resolve_spawn(x, y);
        let avatar = Avatar {
            id: conn.clone(),
            name: name.unwrap_or_else(|| format!("Player {}", conn.short_tag())),
            x,
            y,
            direction: Direction::default(),
            room: room.to_string(),
        };
        self.rooms.insert(room, conn.clone(), avatar.clone());
        avatar
    }

    /// Overwrite position and facing for a live participant, returning the
    /// updated avatar for broadcast.
    ///
    /// `None` when the room or the participant is gone; movement updates
    /// arriving after a leave are expected and dropped without comment.
    pub fn apply_move(
        &self,
        room: &str,
        conn: &ConnId,
        x: f64,
        y: f64,
        direction: Direction,
    ) -> Option<Avatar> {
        self.rooms.update(room, conn, |avatar| {
            avatar.x = x;
            avatar.y = y;
            avatar.direction = direction;
        })
    }

    pub fn remove(&self, room: &str, conn: &ConnId) -> bool {
        self.rooms.remove(room, conn)
    }

    /// Insertion-ordered roster of the room; empty when the room is absent.
    pub fn roster(&self, room: &str) -> Vec<Avatar> {
        self.rooms.snapshot(room)
    }

    pub fn contains_room(&self, room: &str) -> bool {
        self.rooms.contains_room(room)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.room_count()
    }

    fn resolve_spawn(&self, x: Option<f64>, y: Option<f64>) -> (f64, f64) {
        if let (Some(x), Some(y)) = (x, y) {
            return (x, y);
        }
        let (lo, hi) = self.spawn_range;
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (
            x.unwrap_or_else(|| rng.gen_range(lo..hi)),
            y.unwrap_or_else(|| rng.gen_range(lo..hi)),
        )
    }
}
