//! Classroom model.
//!
//! Classrooms are the rooms groups meet in. Each is designated for one
//! group kind and seats a fixed number of students. The effective seat
//! limit of a group is the smaller of the room capacity and the per-kind
//! cap ([`GroupKind::seat_cap`]).

use serde::{Deserialize, Serialize};

use super::GroupKind;

/// A classroom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique classroom identifier.
    pub id: String,
    /// Group kind the room is designated for.
    pub kind: GroupKind,
    /// Number of seats.
    pub capacity: u32,
}

impl Classroom {
    /// Creates a new classroom.
    pub fn new(id: impl Into<String>, kind: GroupKind, capacity: u32) -> Self {
        Self {
            id: id.into(),
            kind,
            capacity,
        }
    }

    /// Theory classroom.
    pub fn theory(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, GroupKind::A, capacity)
    }

    /// Practice (lab) classroom.
    pub fn lab(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, GroupKind::B, capacity)
    }

    /// Students that may attend one group of `kind` held here.
    pub fn seat_limit(&self, kind: GroupKind) -> u32 {
        self.capacity.min(kind.seat_cap())
    }
}
