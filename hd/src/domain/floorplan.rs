//! Floorplan store
//!
//! Every operation borrows the current floorplan and returns a new one, so a
//! stage that fails halfway through a computation never leaves a caller with a
//! partially edited room list.

use serde::Serialize;
use tracing::debug;

use super::room::{Room, RoomId, RoomType};

/// Ordered collection of rooms (insertion order)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Floorplan {
    rooms: Vec<Room>,
    #[serde(skip)]
    next_id: u64,
}

impl Floorplan {
    /// Create an empty floorplan
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Append a room with `area = length * width`
    ///
    /// Dimensions are stored as given; see [`super::room::validate_room`] for
    /// the advisory check.
    pub fn add_room(&self, name: impl Into<String>, kind: RoomType, length: f64, width: f64) -> Self {
        let name = name.into();
        debug!(%name, %kind, %length, %width, "add_room: called");
        let mut rooms = self.rooms.clone();
        rooms.push(Room::new(RoomId::new(self.next_id), name, kind, length, width));
        Self {
            rooms,
            next_id: self.next_id + 1,
        }
    }

    /// Remove every room whose name equals `name`
    pub fn remove_room(&self, name: &str) -> Self {
        debug!(%name, "remove_room: called");
        self.retain(|room| room.name() != name)
    }

    /// Resize every room whose name equals `name`
    pub fn update_room(&self, name: &str, new_length: f64, new_width: f64) -> Self {
        debug!(%name, %new_length, %new_width, "update_room: called");
        self.map_matching(|room| room.name() == name, new_length, new_width)
    }

    /// First room carrying `name`, in insertion order
    pub fn find_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.name() == name)
    }

    /// Remove the single room with identifier `id`
    pub fn remove_by_id(&self, id: RoomId) -> Self {
        debug!(%id, "remove_by_id: called");
        self.retain(|room| room.id() != id)
    }

    /// Resize the single room with identifier `id`
    pub fn update_by_id(&self, id: RoomId, new_length: f64, new_width: f64) -> Self {
        debug!(%id, %new_length, %new_width, "update_by_id: called");
        self.map_matching(|room| room.id() == id, new_length, new_width)
    }

    /// Sum of all room areas; `0.0` when empty
    pub fn total_area(&self) -> f64 {
        self.rooms.iter().map(Room::area).sum()
    }

    fn retain(&self, keep: impl Fn(&Room) -> bool) -> Self {
        Self {
            rooms: self.rooms.iter().filter(|room| keep(room)).cloned().collect(),
            next_id: self.next_id,
        }
    }

    fn map_matching(&self, matches: impl Fn(&Room) -> bool, length: f64, width: f64) -> Self {
        Self {
            rooms: self
                .rooms
                .iter()
                .map(|room| {
                    if matches(room) {
                        room.resized(length, width)
                    } else {
                        room.clone()
                    }
                })
                .collect(),
            next_id: self.next_id,
        }
    }
}
