use dashmap::DashMap;
use indexmap::IndexMap;
use plaza_core::ConnId;

/// Mapping from room identifier to participant entries.
///
/// A room exists iff it has at least one participant: the entry is created
/// by the first insert and deleted by the removal that empties it, so an
/// empty room is never observable. Participants iterate in insertion order,
/// which keeps roster snapshots deterministic.
///
/// Instantiated once per room namespace; separate instances never share
/// identifiers even when the literal strings collide.
pub struct RoomRegistry<V> {
    rooms: DashMap<String, IndexMap<ConnId, V>>,
}

impl<V: Clone> RoomRegistry<V> {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Insert or overwrite a participant entry, creating the room first if
    /// it does not exist yet.
    pub fn insert(&self, room: &str, conn: ConnId, value: V) {
        self.rooms
            .entry(room.to_string())
            .or_default()
            .insert(conn, value);
    }

    /// Remove a participant entry; deletes the room once it empties.
    ///
    /// Absent rooms and absent participants are fine: disconnect cleanup may
    /// race an already-processed leave, so this is idempotent. Returns
    /// whether an entry was actually removed.
    pub fn remove(&self, room: &str, conn: &ConnId) -> bool {
        let Some(mut participants) = self.rooms.get_mut(room) else {
            return false;
        };
        let removed = participants.shift_remove(conn).is_some();
        let now_empty = participants.is_empty();
        drop(participants);

        if now_empty {
            self.rooms.remove_if(room, |_, p| p.is_empty());
        }
        removed
    }

    /// Mutate a participant entry in place, returning the updated value.
    ///
    /// `None` when the room or the participant no longer exists; callers
    /// treat that as a stale reference and drop the operation.
    pub fn update<F>(&self, room: &str, conn: &ConnId, f: F) -> Option<V>
    where
        F: FnOnce(&mut V),
    {
        let mut participants = self.rooms.get_mut(room)?;
        let value = participants.get_mut(conn)?;
        f(&mut *value);
        Some(value.clone())
    }

    /// Insertion-ordered copy of the room's current values. An absent room
    /// yields an empty snapshot, not an error.
    pub fn snapshot(&self, room: &str) -> Vec<V> {
        self.rooms
            .get(room)
            .map(|p| p.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains_room(&self, room: &str) -> bool {
        self.rooms.contains_key(room)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of participants currently in `room`; zero when absent.
    pub fn participant_count(&self, room: &str) -> usize {
        self.rooms.get(room).map(|p| p.len()).unwrap_or(0)
    }
}

impl<V: Clone> Default for RoomRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}
