//! Command dispatch.
//!
//! Turns script lines into [`Command`]s, runs the matching rule chain
//! against the registry, and routes the outcome: rejections become
//! [`Notice`]s, successful mutations are persisted through the store.
//!
//! # Usage
//!
//! ```
//! use u_enrollment::dispatch::{Dispatcher, MemoryNotices};
//! use u_enrollment::registry::Registry;
//! use u_enrollment::script::Script;
//! use u_enrollment::store::MemoryStore;
//!
//! let mut dispatcher = Dispatcher::with_report(
//!     Registry::default(),
//!     MemoryNotices::new(),
//!     MemoryStore::new(),
//!     Vec::new(),
//! );
//! let summary = dispatcher.run_script(&Script::parse("1 matricula 12345678Z PROG\n"));
//! assert_eq!(summary.rejected, 1);
//! assert_eq!(dispatcher.notices().lines(), vec!["MAT -- unknown student 12345678Z"]);
//! ```

mod command;
mod engine;
mod notice;

pub use command::Command;
pub use engine::{Dispatcher, Outcome, RunSummary};
pub use notice::{MemoryNotices, Notice, NoticeLog, NoticeSink};
