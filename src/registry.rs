//! The registry: the five entity collections and the academic calendar.
//!
//! Every collection is keyed by its identifier and iterates in key order,
//! so persisted files and wildcard reports are deterministic. The registry
//! is a plain value owned by whoever applies commands to it; there is no
//! global instance.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{
    Classroom, Group, GroupKind, HourRange, Quota, QuotaKey, Student, Subject, Teacher, Weekday,
};

/// Academic-year label and starting week of the current course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicCalendar {
    /// Academic year label stamped on grades (e.g. `17/18`).
    pub year: String,
    /// ISO week in which the course starts.
    pub start_week: u32,
}

impl AcademicCalendar {
    /// Creates a calendar.
    pub fn new(year: impl Into<String>, start_week: u32) -> Self {
        Self {
            year: year.into(),
            start_week,
        }
    }
}

impl Default for AcademicCalendar {
    fn default() -> Self {
        Self::new("17/18", 35)
    }
}

/// A registry collection, as a unit of persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Students,
    Teachers,
    Classrooms,
    Subjects,
    Quotas,
}

impl Collection {
    /// All collections in load order (referenced before referencing).
    pub const ALL: [Collection; 5] = [
        Collection::Classrooms,
        Collection::Subjects,
        Collection::Quotas,
        Collection::Teachers,
        Collection::Students,
    ];
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Students => "students",
            Self::Teachers => "teachers",
            Self::Classrooms => "classrooms",
            Self::Subjects => "subjects",
            Self::Quotas => "quotas",
        };
        f.write_str(name)
    }
}

/// A group located in the registry: the subject it belongs to and its
/// occupied hour range.
#[derive(Debug, Clone, Copy)]
pub struct PlacedGroup<'a> {
    /// Owning subject.
    pub subject: &'a Subject,
    /// The group.
    pub group: &'a Group,
    /// Occupied hours.
    pub range: HourRange,
}

/// The teaching registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    /// Current academic calendar.
    pub calendar: AcademicCalendar,
    /// Students by national id.
    pub students: BTreeMap<String, Student>,
    /// Teachers by national id.
    pub teachers: BTreeMap<String, Teacher>,
    /// Classrooms by id.
    pub classrooms: BTreeMap<String, Classroom>,
    /// Subjects by code.
    pub subjects: BTreeMap<String, Subject>,
    /// Teaching-load quotas by (teacher, subject, kind).
    #[serde(with = "quota_list")]
    pub quotas: BTreeMap<QuotaKey, Quota>,
}

impl Registry {
    /// Creates an empty registry for an academic calendar.
    pub fn new(calendar: AcademicCalendar) -> Self {
        Self {
            calendar,
            ..Default::default()
        }
    }

    /// Adds a student.
    pub fn with_student(mut self, student: Student) -> Self {
        self.insert_student(student);
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.insert_teacher(teacher);
        self
    }

    /// Adds a classroom.
    pub fn with_classroom(mut self, classroom: Classroom) -> Self {
        self.insert_classroom(classroom);
        self
    }

    /// Adds a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.insert_subject(subject);
        self
    }

    /// Adds a quota.
    pub fn with_quota(mut self, quota: Quota) -> Self {
        self.insert_quota(quota);
        self
    }

    pub fn insert_student(&mut self, student: Student) {
        self.students.insert(student.id.clone(), student);
    }

    pub fn insert_teacher(&mut self, teacher: Teacher) {
        self.teachers.insert(teacher.id.clone(), teacher);
    }

    pub fn insert_classroom(&mut self, classroom: Classroom) {
        self.classrooms.insert(classroom.id.clone(), classroom);
    }

    pub fn insert_subject(&mut self, subject: Subject) {
        self.subjects.insert(subject.code.clone(), subject);
    }

    pub fn insert_quota(&mut self, quota: Quota) {
        self.quotas.insert(quota.key.clone(), quota);
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.get(id)
    }

    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.get(id)
    }

    pub fn classroom(&self, id: &str) -> Option<&Classroom> {
        self.classrooms.get(id)
    }

    pub fn subject(&self, code: &str) -> Option<&Subject> {
        self.subjects.get(code)
    }

    /// Quota for (teacher, subject, kind), if planned.
    pub fn quota(&self, teacher: &str, subject: &str, kind: GroupKind) -> Option<&Quota> {
        self.quotas.get(&QuotaKey::new(teacher, subject, kind))
    }

    /// Occupied range of (subject, kind, id), if the group exists.
    pub fn group_range(&self, subject: &str, kind: GroupKind, id: u32) -> Option<HourRange> {
        let s = self.subject(subject)?;
        s.group(kind, id).map(|g| s.occupied_range(g))
    }

    /// The teacher teaching (subject, kind, id), if any.
    pub fn section_holder(&self, subject: &str, kind: GroupKind, id: u32) -> Option<&Teacher> {
        self.teachers.values().find(|t| t.teaches(subject, kind, id))
    }

    /// Number of students seated in (subject, kind, id).
    pub fn seated_count(&self, subject: &str, kind: GroupKind, id: u32) -> usize {
        self.students
            .values()
            .filter(|s| s.is_seated_in(subject, kind, id))
            .count()
    }

    /// Whether any student passed `subject` in academic year `year`.
    pub fn graded_in(&self, subject: &str, year: &str) -> bool {
        self.students.values().any(|s| {
            s.passed
                .iter()
                .any(|p| p.subject == subject && p.academic_year == year)
        })
    }

    /// Every group of every subject held in `classroom`, optionally
    /// restricted to one day.
    pub fn classroom_groups<'a>(
        &'a self,
        classroom: &'a str,
        day: Option<Weekday>,
    ) -> impl Iterator<Item = PlacedGroup<'a>> + 'a {
        self.subjects.values().flat_map(move |subject| {
            subject
                .all_groups()
                .filter(move |g| g.classroom == classroom && day.map_or(true, |d| g.day == d))
                .map(move |group| PlacedGroup {
                    subject,
                    group,
                    range: subject.occupied_range(group),
                })
        })
    }

    /// Hour ranges of every section a teacher teaches.
    ///
    /// Sections pointing at groups missing from the registry are skipped.
    pub fn teacher_commitments(&self, teacher: &Teacher) -> Vec<HourRange> {
        teacher
            .sections
            .iter()
            .filter_map(|s| self.group_range(&s.subject, s.kind, s.group))
            .collect()
    }

    /// Hour ranges of every group a student is seated in, except the seat
    /// of kind `vacating.1` in subject `vacating.0`.
    pub fn student_commitments(
        &self,
        student: &Student,
        vacating: Option<(&str, GroupKind)>,
    ) -> Vec<HourRange> {
        student
            .enrollments
            .iter()
            .flat_map(|e| e.seats().map(move |(kind, id)| (e.subject.as_str(), kind, id)))
            .filter(|(subject, kind, _)| vacating != Some((*subject, *kind)))
            .filter_map(|(subject, kind, id)| self.group_range(subject, kind, id))
            .collect()
    }

    /// Exports the registry as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Number of members of a collection.
    pub fn len_of(&self, collection: Collection) -> usize {
        match collection {
            Collection::Students => self.students.len(),
            Collection::Teachers => self.teachers.len(),
            Collection::Classrooms => self.classrooms.len(),
            Collection::Subjects => self.subjects.len(),
            Collection::Quotas => self.quotas.len(),
        }
    }
}

/// JSON object keys must be strings; quotas are exported as a list.
mod quota_list {
    use super::{Quota, QuotaKey};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        quotas: &BTreeMap<QuotaKey, Quota>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let list: Vec<&Quota> = quotas.values().collect();
        list.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<QuotaKey, Quota>, D::Error> {
        let list = Vec::<Quota>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|q| (q.key.clone(), q)).collect())
    }
}
