//! Weekly calendar model.
//!
//! The teaching week has five days and whole-hour slots. A session
//! occupies a contiguous run of slots on a single day, so every schedule
//! commitment (a group taught, a group attended, a group hosted by a
//! classroom) reduces to an [`HourRange`].
//!
//! # Time Model
//! An hour is a unit slot named by its starting hour: slot `9` is 9:00–10:00.
//! A range starting at `9` with length `2` occupies slots `{9, 10}`.
//!
//! # Overlap
//! Two ranges overlap iff they share the weekday and their slot sets
//! intersect. Ranges are half-open, so back-to-back sessions (9–11, 11–13)
//! do not overlap.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// First teaching hour of the day (inclusive).
pub const DAY_START_HOUR: u32 = 9;

/// Number of hourly slots in a teaching day (9:00–19:00).
pub const HOURS_PER_DAY: u32 = 10;

/// Teaching weekday.
///
/// Encoded in the data files by its Spanish initial: `L M X J V`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All teaching days, Monday first.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Parses a one-letter day code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "L" => Some(Self::Monday),
            "M" => Some(Self::Tuesday),
            "X" => Some(Self::Wednesday),
            "J" => Some(Self::Thursday),
            "V" => Some(Self::Friday),
            _ => None,
        }
    }

    /// One-letter day code.
    pub fn code(self) -> char {
        match self {
            Self::Monday => 'L',
            Self::Tuesday => 'M',
            Self::Wednesday => 'X',
            Self::Thursday => 'J',
            Self::Friday => 'V',
        }
    }

    /// Column index in a weekly grid (Monday = 0).
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A contiguous run of hour slots on one weekday.
///
/// Half-open: occupies `[start, start + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    /// Day of the week.
    pub day: Weekday,
    /// First occupied hour slot.
    pub start: u32,
    /// Number of occupied slots.
    pub length: u32,
}

impl HourRange {
    /// Creates a new hour range.
    pub fn new(day: Weekday, start: u32, length: u32) -> Self {
        Self { day, start, length }
    }

    /// One past the last occupied slot.
    #[inline]
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.length)
    }

    /// Occupied slots.
    #[inline]
    pub fn hours(&self) -> Range<u32> {
        self.start..self.end()
    }

    /// Whether the range occupies no slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether the range occupies `hour` on `day`.
    pub fn contains(&self, day: Weekday, hour: u32) -> bool {
        self.day == day && self.hours().contains(&hour)
    }

    /// Whether two ranges share at least one slot on the same day.
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.day == other.day
            && self.start < other.end()
            && other.start < self.end()
    }
}

impl fmt::Display for HourRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start, self.end())
    }
}

/// Whether two hour ranges intersect.
///
/// Symmetric; reflexive for every non-empty range.
#[inline]
pub fn overlaps(a: &HourRange, b: &HourRange) -> bool {
    a.overlaps(b)
}

/// Returns the first candidate that intersects `target`, if any.
pub fn first_conflict<'a, I>(target: &HourRange, candidates: I) -> Option<HourRange>
where
    I: IntoIterator<Item = &'a HourRange>,
{
    candidates.into_iter().find(|c| overlaps(target, c)).copied()
}
