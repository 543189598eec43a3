//! Weekly room occupancy (`ocupacionAula`).
//!
//! A 5 × 10 grid, Monday to Friday by 9:00 to 19:00. Each occupied cell
//! shows `CODE-<kind><id>` with the initials of the section's teacher on
//! the line below. The 14-15 row is the lunch break.

use log::warn;
use std::io::{self, Write};

use crate::error::{Rejection, RuleResult};
use crate::models::{Weekday, DAY_START_HOUR, HOURS_PER_DAY};
use crate::registry::Registry;

/// Argument selecting every classroom.
pub const ALL_CLASSROOMS: &str = "*";

/// First hour of the lunch break.
pub const LUNCH_HOUR: u32 = 14;

const COLUMN: usize = 12;
const SLOTS: usize = HOURS_PER_DAY as usize;

/// One occupied hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// `CODE-<kind><id>`.
    pub label: String,
    /// Teacher initials, if the section has a teacher.
    pub teacher: Option<String>,
}

/// Occupancy of one classroom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    pub classroom: String,
    /// `cells[day][hour - 9]`.
    pub cells: [[Option<Cell>; SLOTS]; 5],
}

impl OccupancyGrid {
    /// Builds the grid of a registered classroom.
    pub fn build(registry: &Registry, classroom: &str) -> RuleResult<Self> {
        if registry.classroom(classroom).is_none() {
            return Err(Rejection::UnknownClassroom(classroom.to_string()));
        }
        let mut grid = Self {
            classroom: classroom.to_string(),
            cells: Default::default(),
        };
        for placed in registry.classroom_groups(classroom, None) {
            let (subject, group) = (placed.subject, placed.group);
            let cell = Cell {
                label: format!("{}-{}{}", subject.code, group.kind, group.id),
                teacher: registry
                    .section_holder(&subject.code, group.kind, group.id)
                    .map(|t| t.initials()),
            };
            for hour in placed.range.hours() {
                match grid.slot_mut(placed.range.day, hour) {
                    Some(slot) => *slot = Some(cell.clone()),
                    None => warn!(
                        "{}: {}-{}{} at {}:00 is outside the timetable",
                        classroom, subject.code, group.kind, group.id, hour
                    ),
                }
            }
        }
        Ok(grid)
    }

    fn slot_mut(&mut self, day: Weekday, hour: u32) -> Option<&mut Option<Cell>> {
        let offset = hour.checked_sub(DAY_START_HOUR)? as usize;
        self.cells[day.index()].get_mut(offset)
    }

    /// Cell at (day, hour), if occupied.
    pub fn cell(&self, day: Weekday, hour: u32) -> Option<&Cell> {
        let offset = hour.checked_sub(DAY_START_HOUR)? as usize;
        self.cells[day.index()].get(offset)?.as_ref()
    }

    /// Writes the grid as text.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Classroom: {}", self.classroom)?;
        writeln!(out)?;
        let header: Vec<String> = Weekday::ALL.iter().map(|d| d.to_string()).collect();
        write_row(out, "Hour", &header)?;
        writeln!(out)?;
        for slot in 0..SLOTS {
            let hour = DAY_START_HOUR + slot as u32;
            let label = format!("{}-{}", hour, hour + 1);
            if hour == LUNCH_HOUR {
                write_row(out, &label, &vec!["XXXXXX".to_string(); 5])?;
                continue;
            }
            let cells: Vec<&Option<Cell>> = self.cells.iter().map(|day| &day[slot]).collect();
            let groups: Vec<String> = cells
                .iter()
                .map(|c| c.as_ref().map(|c| c.label.clone()).unwrap_or_default())
                .collect();
            let teachers: Vec<String> = cells
                .iter()
                .map(|c| c.as_ref().and_then(|c| c.teacher.clone()).unwrap_or_default())
                .collect();
            write_row(out, &label, &groups)?;
            write_row(out, "", &teachers)?;
        }
        Ok(())
    }
}

fn write_row<W: Write>(out: &mut W, head: &str, columns: &[String]) -> io::Result<()> {
    let mut line = format!("{head:<COLUMN$}");
    for c in columns {
        line.push_str(&format!("{c:<COLUMN$}"));
    }
    writeln!(out, "{}", line.trim_end())
}

/// Renders one classroom, or every classroom in id order for `*`, with
/// two blank lines between grids.
pub fn render_occupancy<W: Write>(registry: &Registry, target: &str, out: &mut W) -> RuleResult {
    let rooms: Vec<&str> = if target == ALL_CLASSROOMS {
        registry.classrooms.keys().map(String::as_str).collect()
    } else {
        vec![target]
    };
    let grids = rooms
        .into_iter()
        .map(|room| OccupancyGrid::build(registry, room))
        .collect::<RuleResult<Vec<_>>>()?;

    let unwritable = |e: io::Error| Rejection::Unwritable {
        path: "report output".to_string(),
        reason: e.to_string(),
    };
    for (i, grid) in grids.iter().enumerate() {
        if i > 0 {
            writeln!(out).and_then(|_| writeln!(out)).map_err(unwritable)?;
        }
        grid.render(out).map_err(unwritable)?;
    }
    Ok(())
}
