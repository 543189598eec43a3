//! Rule chains: ordered precondition checks guarding every mutation.
//!
//! Each command is a [`RuleChain`]. Its [`check`](RuleChain::check) runs
//! the checks in a fixed order against a read-only registry and stops at
//! the first failure; only when every check passes is the resulting plan
//! handed to [`commit`](RuleChain::commit), which mutates the registry and
//! names the collection that must be persisted.
//!
//! # Chains
//!
//! | Chain | Command | Tag |
//! |-------|---------|-----|
//! | [`InsertPerson`] | `insertaPersona` | `IP` |
//! | [`AssignGroup`] | `asignaGrupo` | `AGRUPO` |
//! | [`Enroll`] | `matricula` | `MAT` |
//! | [`CreateGroup`] | `creaGrupoAsig` | `CGA` |
//! | [`EvaluateSubject`] | `evalua` | `EVALUA` |
//!
//! Grading is the one batch chain: after a subject-level pre-check it
//! processes rows independently, so one bad row does not abort the others.

mod assign;
mod enroll;
mod grading;
mod group;
mod person;

pub use assign::{AssignGroup, Profile};
pub use enroll::Enroll;
pub use grading::{EvaluateSubject, GradeSheet, GradingPlan, GradingReport, RowRejection};
pub use group::CreateGroup;
pub use person::{InsertPerson, NewPerson};

use std::fmt;

use crate::error::{Rejection, RuleResult};
use crate::models::GroupKind;
use crate::registry::{Collection, Registry};

/// Short tag identifying a command in notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandTag {
    InsertPerson,
    AssignGroup,
    Enroll,
    CreateGroup,
    Evaluate,
    Transcript,
    Occupancy,
}

impl CommandTag {
    /// Tag of a script command name (case-insensitive).
    pub fn from_command(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "insertapersona" => Some(Self::InsertPerson),
            "asignagrupo" => Some(Self::AssignGroup),
            "matricula" => Some(Self::Enroll),
            "creagrupoasig" => Some(Self::CreateGroup),
            "evalua" => Some(Self::Evaluate),
            "expediente" => Some(Self::Transcript),
            "ocupacionaula" => Some(Self::Occupancy),
            _ => None,
        }
    }

    /// Tag text written to the notice log.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InsertPerson => "IP",
            Self::AssignGroup => "AGRUPO",
            Self::Enroll => "MAT",
            Self::CreateGroup => "CGA",
            Self::Evaluate => "EVALUA",
            Self::Transcript => "EXP",
            Self::Occupancy => "OCUPAULA",
        }
    }
}

impl fmt::Display for CommandTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered check sequence plus the mutation it guards.
pub trait RuleChain: fmt::Debug {
    /// What the checks established and the commit needs.
    type Plan;

    /// Tag used when reporting a rejection.
    fn tag(&self) -> CommandTag;

    /// Runs the checks in order; the first failure wins.
    fn check(&self, registry: &Registry) -> RuleResult<Self::Plan>;

    /// Applies a checked plan and returns the collection to persist.
    fn commit(&self, plan: Self::Plan, registry: &mut Registry) -> Collection;

    /// Check, then commit. A rejection leaves the registry untouched.
    fn run(&self, registry: &mut Registry) -> RuleResult<Collection> {
        let plan = self.check(registry)?;
        Ok(self.commit(plan, registry))
    }
}

/// Parses a group-kind token.
pub(crate) fn parse_kind(token: &str) -> RuleResult<GroupKind> {
    GroupKind::from_code(token).ok_or_else(|| Rejection::InvalidKind(token.to_string()))
}

/// Parses a numeric command argument.
pub(crate) fn parse_number(field: &'static str, token: &str) -> RuleResult<u32> {
    token.parse().map_err(|_| Rejection::NotANumber {
        field,
        value: token.to_string(),
    })
}

/// Parses a group id: a positive integer.
pub(crate) fn parse_group_id(token: &str) -> RuleResult<u32> {
    match parse_number("group id", token)? {
        0 => Err(Rejection::InvalidGroupId(token.to_string())),
        id => Ok(id),
    }
}
