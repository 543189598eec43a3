//! Read-only reports over the registry.
//!
//! | Report | Command | Output |
//! |--------|---------|--------|
//! | [`Transcript`] | `expediente` | file, overwritten |
//! | [`OccupancyGrid`] | `ocupacionAula` | any `io::Write` |

mod occupancy;
mod transcript;

pub use occupancy::{render_occupancy, Cell, OccupancyGrid, ALL_CLASSROOMS, LUNCH_HOUR};
pub use transcript::{Transcript, TranscriptEntry};
