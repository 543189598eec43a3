//! Teaching-load quota ("POD") model.
//!
//! A quota caps how many sections of one kind a teacher may take for one
//! subject in the current workload plan.

use serde::{Deserialize, Serialize};

use super::GroupKind;

/// Composite key of a quota.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuotaKey {
    /// Teacher id.
    pub teacher: String,
    /// Subject code.
    pub subject: String,
    /// Group kind.
    pub kind: GroupKind,
}

impl QuotaKey {
    /// Creates a new key.
    pub fn new(teacher: impl Into<String>, subject: impl Into<String>, kind: GroupKind) -> Self {
        Self {
            teacher: teacher.into(),
            subject: subject.into(),
            kind,
        }
    }
}

/// Maximum number of sections for a (teacher, subject, kind).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quota {
    /// Key.
    pub key: QuotaKey,
    /// Maximum sections. Fractional plans (e.g. 1.5) are allowed.
    pub max_groups: f64,
}

impl Quota {
    /// Creates a new quota.
    pub fn new(
        teacher: impl Into<String>,
        subject: impl Into<String>,
        kind: GroupKind,
        max_groups: f64,
    ) -> Self {
        Self {
            key: QuotaKey::new(teacher, subject, kind),
            max_groups,
        }
    }

    /// Whether one more section fits on top of `taken`.
    pub fn admits(&self, taken: usize) -> bool {
        (taken as f64) < self.max_groups
    }
}
