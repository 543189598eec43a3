//! Subject and group models.
//!
//! A subject is taught through groups of two kinds: theory (A) and
//! practice (B). Each kind has its own session length, and each group
//! meets once a week in a classroom.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{HourRange, Weekday};

/// Group category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    /// Theory group.
    A,
    /// Practice group.
    B,
}

impl GroupKind {
    /// Parses a kind token (`A` or `B`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            _ => None,
        }
    }

    /// Upper bound on students per group, regardless of room size.
    pub fn seat_cap(self) -> u32 {
        match self {
            Self::A => 40,
            Self::B => 20,
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// A weekly session of a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Group number, unique within its (subject, kind).
    pub id: u32,
    /// Group kind.
    pub kind: GroupKind,
    /// Day the group meets.
    pub day: Weekday,
    /// Starting hour.
    pub start_hour: u32,
    /// Classroom identifier (lookup key).
    pub classroom: String,
}

impl Group {
    /// Creates a new group.
    pub fn new(
        id: u32,
        kind: GroupKind,
        day: Weekday,
        start_hour: u32,
        classroom: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            day,
            start_hour,
            classroom: classroom.into(),
        }
    }
}

/// A subject of the program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject code.
    pub code: String,
    /// Full name.
    pub name: String,
    /// Year of the program the subject belongs to.
    pub year: u32,
    /// Term within the year.
    pub term: u32,
    /// Coordinating teacher id (lookup key).
    pub coordinator: String,
    /// Codes of subjects that must be passed before enrolling.
    pub prerequisites: Vec<String>,
    /// Session length (hours) of a theory group.
    pub length_a: u32,
    /// Session length (hours) of a practice group.
    pub length_b: u32,
    /// Theory groups.
    pub groups_a: Vec<Group>,
    /// Practice groups.
    pub groups_b: Vec<Group>,
}

impl Subject {
    /// Creates a subject with no groups or prerequisites.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            year: 1,
            term: 1,
            coordinator: String::new(),
            prerequisites: Vec::new(),
            length_a: 1,
            length_b: 1,
            groups_a: Vec::new(),
            groups_b: Vec::new(),
        }
    }

    /// Sets program year and term.
    pub fn with_year(mut self, year: u32, term: u32) -> Self {
        self.year = year;
        self.term = term;
        self
    }

    /// Sets the coordinator.
    pub fn with_coordinator(mut self, teacher_id: impl Into<String>) -> Self {
        self.coordinator = teacher_id.into();
        self
    }

    /// Adds a prerequisite subject code.
    pub fn with_prerequisite(mut self, code: impl Into<String>) -> Self {
        self.prerequisites.push(code.into());
        self
    }

    /// Sets session lengths for both kinds.
    pub fn with_lengths(mut self, length_a: u32, length_b: u32) -> Self {
        self.length_a = length_a;
        self.length_b = length_b;
        self
    }

    /// Adds a group to the collection of its kind.
    pub fn with_group(mut self, group: Group) -> Self {
        self.add_group(group);
        self
    }

    /// Session length of the given kind.
    pub fn session_length(&self, kind: GroupKind) -> u32 {
        match kind {
            GroupKind::A => self.length_a,
            GroupKind::B => self.length_b,
        }
    }

    /// Groups of the given kind.
    pub fn groups(&self, kind: GroupKind) -> &[Group] {
        match kind {
            GroupKind::A => &self.groups_a,
            GroupKind::B => &self.groups_b,
        }
    }

    /// All groups, theory first.
    pub fn all_groups(&self) -> impl Iterator<Item = &Group> {
        self.groups_a.iter().chain(self.groups_b.iter())
    }

    /// Finds a group by kind and id.
    pub fn group(&self, kind: GroupKind, id: u32) -> Option<&Group> {
        self.groups(kind).iter().find(|g| g.id == id)
    }

    /// Appends a group to the collection of its kind.
    ///
    /// Uniqueness of (kind, id) is checked by the caller.
    pub fn add_group(&mut self, group: Group) {
        match group.kind {
            GroupKind::A => self.groups_a.push(group),
            GroupKind::B => self.groups_b.push(group),
        }
    }

    /// Occupied hour range of one of this subject's groups.
    pub fn occupied_range(&self, group: &Group) -> HourRange {
        HourRange::new(group.day, group.start_hour, self.session_length(group.kind))
    }
}
