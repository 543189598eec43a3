//! Teaching registry command engine.
//!
//! Maintains an institution's registry (students, teachers, subjects,
//! classrooms, teaching-load quotas) and applies administrative commands
//! to it. Every mutating command runs an ordered chain of precondition
//! checks first; the registry changes only when the whole chain passes.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Student`, `Teacher`, `Subject`, `Group`,
//!   `Classroom`, `Quota`, and the weekly `HourRange` overlap test
//! - **`registry`**: The entity collections and cross-entity queries
//! - **`validation`**: National id and date well-formedness
//! - **`rules`**: One rule chain per mutating command
//! - **`dispatch`**: Command parsing, notices, persistence triggers
//! - **`report`**: Transcripts and room occupancy grids
//! - **`store`**: Record-block flat files
//! - **`script`**: Command script tokenizer
//! - **`config`**: File layout and TOML configuration
//!
//! # Flow
//!
//! ```text
//! script line -> Command -> RuleChain::check -> RuleChain::commit -> Persist
//!                                  |
//!                                  +-> Rejection -> Notice
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod registry;
pub mod report;
pub mod rules;
pub mod script;
pub mod store;
pub mod validation;

pub use error::{Rejection, RejectionKind, RuleResult, StoreError};
pub use registry::{AcademicCalendar, Collection, Registry};
