//! Error types.
//!
//! [`Rejection`] is the outcome of a failed rule chain: it aborts one
//! command (or one grading row) and is reported as a notice, never
//! propagated past the dispatcher. [`StoreError`] and [`ScriptError`]
//! cover the flat-file collaborators; they are fatal only at startup.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{GroupKind, HourRange};

/// Result of a rule chain.
pub type RuleResult<T = ()> = std::result::Result<T, Rejection>;

/// Result of a store operation.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Why a command (or grading row) was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    // Malformed command
    #[error("wrong number of arguments")]
    WrongArity,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("{field} is not a number: {value}")]
    NotANumber { field: &'static str, value: String },
    #[error("cannot read {path}: {reason}")]
    Unreadable { path: String, reason: String },
    #[error("cannot write {path}: {reason}")]
    Unwritable { path: String, reason: String },

    // Referential
    #[error("unknown student {0}")]
    UnknownStudent(String),
    #[error("unknown teacher {0}")]
    UnknownTeacher(String),
    #[error("unknown subject {0}")]
    UnknownSubject(String),
    #[error("unknown group {subject} {kind}{id}")]
    UnknownGroup {
        subject: String,
        kind: GroupKind,
        id: u32,
    },
    #[error("unknown classroom {0}")]
    UnknownClassroom(String),

    // State conflict
    #[error("student {0} already exists")]
    DuplicateStudent(String),
    #[error("teacher {0} already exists")]
    DuplicateTeacher(String),
    #[error("group {subject} {kind}{id} already exists")]
    DuplicateGroup {
        subject: String,
        kind: GroupKind,
        id: u32,
    },
    #[error("group {subject} {kind}{id} already has a teacher")]
    SectionTaken {
        subject: String,
        kind: GroupKind,
        id: u32,
    },
    #[error("student is not enrolled in {0}")]
    NotEnrolled(String),
    #[error("student is already enrolled in {0}")]
    AlreadyEnrolled(String),
    #[error("{subject} already graded in academic year {year}")]
    AlreadyGraded { subject: String, year: String },
    #[error("{subject}/{kind} not in the teacher's teaching-load plan")]
    QuotaMissing { subject: String, kind: GroupKind },
    #[error("{subject}/{kind} sections would exceed the teaching-load plan ({max})")]
    QuotaExceeded {
        subject: String,
        kind: GroupKind,
        max: f64,
    },
    #[error("schedule overlap with {0}")]
    ScheduleOverlap(HourRange),
    #[error("classroom overlap with {0}")]
    ClassroomOverlap(HourRange),
    #[error("room full ({0} seats)")]
    RoomFull(u32),

    // Domain validation
    #[error("invalid national id {0}")]
    InvalidId(String),
    #[error("invalid birth date {0}")]
    InvalidBirthDate(String),
    #[error("invalid admission date {0}")]
    InvalidAdmissionDate(String),
    #[error("invalid group kind {0}")]
    InvalidKind(String),
    #[error("invalid weekday {0}")]
    InvalidDay(String),
    #[error("invalid group id {0}")]
    InvalidGroupId(String),
    #[error("prerequisite {0} not passed")]
    PrerequisiteMissing(String),
    #[error("missing practice score for {0}")]
    MissingScore(String),
    #[error("score out of range for {student}: {score_a}/{score_b}")]
    ScoreOutOfRange {
        student: String,
        score_a: f64,
        score_b: f64,
    },
}

/// Rejection categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// Wrong arity, unknown command, unparsable argument or source.
    MalformedCommand,
    /// A referenced id or code does not exist.
    Referential,
    /// The registry state forbids the change.
    StateConflict,
    /// A value is not well-formed or out of its domain.
    DomainValidation,
}

impl Rejection {
    /// Category of this rejection.
    pub fn kind(&self) -> RejectionKind {
        use Rejection::*;
        match self {
            WrongArity
            | UnknownCommand(_)
            | UnknownRole(_)
            | NotANumber { .. }
            | Unreadable { .. }
            | Unwritable { .. } => RejectionKind::MalformedCommand,
            UnknownStudent(_)
            | UnknownTeacher(_)
            | UnknownSubject(_)
            | UnknownGroup { .. }
            | UnknownClassroom(_) => RejectionKind::Referential,
            DuplicateStudent(_)
            | DuplicateTeacher(_)
            | DuplicateGroup { .. }
            | SectionTaken { .. }
            | NotEnrolled(_)
            | AlreadyEnrolled(_)
            | AlreadyGraded { .. }
            | QuotaMissing { .. }
            | QuotaExceeded { .. }
            | ScheduleOverlap(_)
            | ClassroomOverlap(_)
            | RoomFull(_) => RejectionKind::StateConflict,
            InvalidId(_)
            | InvalidBirthDate(_)
            | InvalidAdmissionDate(_)
            | InvalidKind(_)
            | InvalidDay(_)
            | InvalidGroupId(_)
            | PrerequisiteMissing(_)
            | MissingScore(_)
            | ScoreOutOfRange { .. } => RejectionKind::DomainValidation,
        }
    }
}

/// Flat-file load/persist failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{file}, record {record}: {reason}")]
    Malformed {
        file: String,
        record: usize,
        reason: String,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(file: &str, record: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            file: file.to_string(),
            record,
            reason: reason.into(),
        }
    }
}

/// Grade-sheet parse failure (1-based line numbers).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    #[error("line {line}: expected `<id> <score>`")]
    Malformed { line: usize },
    #[error("line {line}: score is not a number: {value}")]
    NotANumber { line: usize, value: String },
}

/// Command-script failure.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("cannot read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
