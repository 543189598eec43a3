//! Teaching registry domain models.
//!
//! Plain records owned by the [`Registry`](crate::registry::Registry).
//! Cross-entity references (a subject code inside an enrollment, a
//! classroom id inside a group) are lookup keys, never pointers, and are
//! revalidated by the rule chains on every use.
//!
//! # Entity Map
//!
//! | Model | Owns | References |
//! |-------|------|------------|
//! | Student | PassedSubject, Enrollment | subject codes |
//! | Teacher | Section | subject codes |
//! | Subject | Group (A and B) | coordinator, prerequisites, classrooms |
//! | Classroom | - | - |
//! | Quota | - | teacher, subject |

mod calendar;
mod classroom;
mod quota;
mod student;
mod subject;
mod teacher;

pub use calendar::{
    first_conflict, overlaps, HourRange, Weekday, DAY_START_HOUR, HOURS_PER_DAY,
};
pub use classroom::Classroom;
pub use quota::{Quota, QuotaKey};
pub use student::{Enrollment, PassedSubject, Student, PASS_MARK};
pub use subject::{Group, GroupKind, Subject};
pub use teacher::{Category, Section, Teacher};
