//! Teacher model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::GroupKind;

/// Teacher category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Tenured; may coordinate subjects.
    Tenured,
    /// Associate.
    Associate,
}

impl Category {
    /// Parses a category name. Only `titular` (any case) is tenured.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("titular") {
            Self::Tenured
        } else {
            Self::Associate
        }
    }

    /// Name used in the data files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tenured => "titular",
            Self::Associate => "asociado",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A section taught by a teacher: one group of one subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Section {
    /// Subject code.
    pub subject: String,
    /// Group kind.
    pub kind: GroupKind,
    /// Group id.
    pub group: u32,
}

impl Section {
    /// Creates a new section.
    pub fn new(subject: impl Into<String>, kind: GroupKind, group: u32) -> Self {
        Self {
            subject: subject.into(),
            kind,
            group,
        }
    }

    /// Whether this section is exactly (subject, kind, group).
    pub fn is(&self, subject: &str, kind: GroupKind, group: u32) -> bool {
        self.subject == subject && self.kind == kind && self.group == group
    }
}

/// A registered teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// National id.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Category.
    pub category: Category,
    /// Department.
    pub department: String,
    /// Sections currently taught.
    pub sections: Vec<Section>,
}

impl Teacher {
    /// Creates a teacher with no sections.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        birth_date: NaiveDate,
        category: Category,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birth_date,
            category,
            department: department.into(),
            sections: Vec::new(),
        }
    }

    /// Adds a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Whether the teacher may coordinate a subject.
    pub fn can_coordinate(&self) -> bool {
        self.category == Category::Tenured
    }

    /// Whether the teacher teaches exactly this group.
    pub fn teaches(&self, subject: &str, kind: GroupKind, group: u32) -> bool {
        self.sections.iter().any(|s| s.is(subject, kind, group))
    }

    /// Number of sections of `kind` taught for `subject`.
    pub fn section_count(&self, subject: &str, kind: GroupKind) -> usize {
        self.sections
            .iter()
            .filter(|s| s.subject == subject && s.kind == kind)
            .count()
    }

    /// Name initials: first letter of every word followed by a dot.
    ///
    /// `"Lopez Diaz, Maria"` → `"L.D.M."`
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter(|part| *part != ",")
            .filter_map(|part| part.chars().next())
            .map(|c| format!("{c}."))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_teacher() -> Teacher {
        Teacher::new(
            "11111111A",
            "Lopez Diaz, Maria",
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            Category::Tenured,
            "Informatics",
        )
        .with_section(Section::new("PROG", GroupKind::A, 1))
        .with_section(Section::new("PROG", GroupKind::B, 1))
        .with_section(Section::new("PROG", GroupKind::B, 2))
    }

    #[test]
    fn test_category() {
        assert_eq!(Category::from_name("Titular"), Category::Tenured);
        assert_eq!(Category::from_name("asociado"), Category::Associate);
        assert_eq!(Category::from_name("other"), Category::Associate);
        assert_eq!(Category::Tenured.to_string(), "titular");
    }

    #[test]
    fn test_sections() {
        let t = sample_teacher();
        assert!(t.can_coordinate());
        assert!(t.teaches("PROG", GroupKind::B, 2));
        assert!(!t.teaches("PROG", GroupKind::A, 2));
        assert_eq!(t.section_count("PROG", GroupKind::B), 2);
        assert_eq!(t.section_count("MATH", GroupKind::A), 0);
    }

    #[test]
    fn test_initials() {
        let t = sample_teacher();
        assert_eq!(t.initials(), "L.D.M.");

        let mut t2 = t.clone();
        t2.name = "Juan , Perez".into();
        assert_eq!(t2.initials(), "J.P.");
    }
}
