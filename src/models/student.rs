//! Student model.
//!
//! A student carries two histories: subjects already passed (one record
//! per passing grade, stamped with its academic year) and subjects being
//! taken right now (one enrollment per subject, optionally seated in a
//! theory group, a practice group, or both).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::GroupKind;

/// Minimum final grade for a pass.
pub const PASS_MARK: f64 = 5.0;

/// A registered student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// National id (8 digits + uppercase letter).
    pub id: String,
    /// Full name.
    pub name: String,
    /// Contact email, if known.
    pub email: Option<String>,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Date of admission to the institution.
    pub admission_date: NaiveDate,
    /// Subjects passed so far.
    pub passed: Vec<PassedSubject>,
    /// Subjects currently being taken.
    pub enrollments: Vec<Enrollment>,
}

/// A passed subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassedSubject {
    /// Subject code.
    pub subject: String,
    /// Academic year label (e.g. `17/18`).
    pub academic_year: String,
    /// Final grade (0–10).
    pub grade: f64,
}

/// An active enrollment in a subject.
///
/// `None` in a kind slot means "no group of that kind yet"; an enrollment
/// with both slots empty is the unassigned state created by enrolling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Subject code.
    pub subject: String,
    /// Theory group id.
    pub group_a: Option<u32>,
    /// Practice group id.
    pub group_b: Option<u32>,
}

impl Enrollment {
    /// Enrolled, no group yet.
    pub fn unassigned(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            group_a: None,
            group_b: None,
        }
    }

    /// Enrolled and seated in one group.
    pub fn seated(subject: impl Into<String>, kind: GroupKind, id: u32) -> Self {
        let mut e = Self::unassigned(subject);
        e.seat(kind, id);
        e
    }

    /// Group of the given kind, if seated.
    pub fn group(&self, kind: GroupKind) -> Option<u32> {
        match kind {
            GroupKind::A => self.group_a,
            GroupKind::B => self.group_b,
        }
    }

    /// Seats (or moves) the student in a group of the given kind.
    pub fn seat(&mut self, kind: GroupKind, id: u32) {
        match kind {
            GroupKind::A => self.group_a = Some(id),
            GroupKind::B => self.group_b = Some(id),
        }
    }

    /// Whether no group of either kind has been assigned.
    pub fn is_unassigned(&self) -> bool {
        self.group_a.is_none() && self.group_b.is_none()
    }

    /// Assigned (kind, group id) pairs, theory first.
    pub fn seats(&self) -> impl Iterator<Item = (GroupKind, u32)> + '_ {
        [(GroupKind::A, self.group_a), (GroupKind::B, self.group_b)]
            .into_iter()
            .filter_map(|(kind, id)| id.map(|id| (kind, id)))
    }
}

impl Student {
    /// Creates a student with empty histories.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        birth_date: NaiveDate,
        admission_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            birth_date,
            admission_date,
            passed: Vec::new(),
            enrollments: Vec::new(),
        }
    }

    /// Sets the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Adds a passed subject.
    pub fn with_passed(
        mut self,
        subject: impl Into<String>,
        academic_year: impl Into<String>,
        grade: f64,
    ) -> Self {
        self.passed.push(PassedSubject {
            subject: subject.into(),
            academic_year: academic_year.into(),
            grade,
        });
        self
    }

    /// Adds an enrollment.
    pub fn with_enrollment(mut self, enrollment: Enrollment) -> Self {
        self.enrollments.push(enrollment);
        self
    }

    /// Enrollment in a subject, if any.
    pub fn enrollment(&self, subject: &str) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.subject == subject)
    }

    /// Whether the student is taking the subject (seated or not).
    pub fn is_enrolled(&self, subject: &str) -> bool {
        self.enrollment(subject).is_some()
    }

    /// Whether the student has passed the subject in any year.
    pub fn has_passed(&self, subject: &str) -> bool {
        self.passed.iter().any(|p| p.subject == subject)
    }

    /// Whether the student is seated in exactly this group.
    pub fn is_seated_in(&self, subject: &str, kind: GroupKind, id: u32) -> bool {
        self.enrollment(subject)
            .is_some_and(|e| e.group(kind) == Some(id))
    }

    /// Appends an unassigned enrollment.
    pub fn enroll(&mut self, subject: impl Into<String>) {
        self.enrollments.push(Enrollment::unassigned(subject));
    }

    /// Seats the student in a group of a subject they are enrolled in.
    ///
    /// Returns `false` if there is no enrollment for the subject.
    pub fn seat(&mut self, subject: &str, kind: GroupKind, id: u32) -> bool {
        match self.enrollments.iter_mut().find(|e| e.subject == subject) {
            Some(e) => {
                e.seat(kind, id);
                true
            }
            None => false,
        }
    }

    /// Closes the subject: drops its enrollment and records a pass if
    /// `grade >= PASS_MARK`.
    pub fn record_grade(&mut self, subject: &str, academic_year: &str, grade: f64) {
        self.enrollments.retain(|e| e.subject != subject);
        if grade >= PASS_MARK {
            self.passed.push(PassedSubject {
                subject: subject.to_string(),
                academic_year: academic_year.to_string(),
                grade,
            });
        }
    }
}
