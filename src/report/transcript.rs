//! Student transcript (`expediente`).

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::{Rejection, RuleResult};
use crate::registry::Registry;
use crate::store::codec::format_real;

/// One passed subject in a transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    /// Program year of the subject; 0 if the subject is no longer listed.
    pub year: u32,
    pub subject: String,
    pub grade: f64,
    pub academic_year: String,
}

/// A student's passed subjects, sorted by program year then subject code.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub student: String,
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Builds the transcript of a registered student.
    pub fn build(registry: &Registry, student: &str) -> RuleResult<Self> {
        let s = registry
            .student(student)
            .ok_or_else(|| Rejection::UnknownStudent(student.to_string()))?;
        let mut entries: Vec<TranscriptEntry> = s
            .passed
            .iter()
            .map(|p| TranscriptEntry {
                year: registry.subject(&p.subject).map_or(0, |sub| sub.year),
                subject: p.subject.clone(),
                grade: p.grade,
                academic_year: p.academic_year.clone(),
            })
            .collect();
        entries.sort_by(|a, b| (a.year, &a.subject).cmp(&(b.year, &b.subject)));
        Ok(Self {
            student: s.id.clone(),
            entries,
        })
    }

    /// Mean grade, if anything was passed.
    pub fn average(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let sum: f64 = self.entries.iter().map(|e| e.grade).sum();
        Some(sum / self.entries.len() as f64)
    }

    /// Text form: one `year; code; grade; academic-year` line per entry,
    /// then the average.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for e in &self.entries {
            let _ = writeln!(
                out,
                "{}; {}; {}; {}",
                e.year,
                e.subject,
                format_real(e.grade),
                e.academic_year
            );
        }
        match self.average() {
            Some(avg) => {
                let _ = writeln!(out, "Average grade: {avg:.2}");
            }
            None => out.push_str("Average grade: n/a\n"),
        }
        out
    }

    /// Writes the text form to `path`, replacing any previous contents.
    pub fn write_to(&self, path: impl AsRef<Path>) -> RuleResult {
        let path = path.as_ref();
        fs::write(path, self.render()).map_err(|e| Rejection::Unwritable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::sample_registry;

    #[test]
    fn test_sorted_by_year_then_code() {
        let mut r = sample_registry();
        if let Some(luis) = r.students.get_mut("87654321X") {
            luis.record_grade("ALGO", "17/18", 8.0);
            luis.record_grade("MATH", "17/18", 7.0);
            luis.record_grade("GONE", "15/16", 5.0);
        }
        let t = Transcript::build(&r, "87654321X").unwrap();
        let order: Vec<(u32, &str)> = t
            .entries
            .iter()
            .map(|e| (e.year, e.subject.as_str()))
            .collect();
        assert_eq!(order, vec![(0, "GONE"), (1, "MATH"), (1, "PROG"), (2, "ALGO")]);

        assert_eq!(
            t.render(),
            "0; GONE; 5.0; 15/16\n\
             1; MATH; 7.0; 17/18\n\
             1; PROG; 6.0; 16/17\n\
             2; ALGO; 8.0; 17/18\n\
             Average grade: 6.50\n"
        );
    }

    #[test]
    fn test_empty_transcript() {
        let r = sample_registry();
        let t = Transcript::build(&r, "12345678Z").unwrap();
        assert_eq!(t.average(), None);
        assert_eq!(t.render(), "Average grade: n/a\n");
    }

    #[test]
    fn test_unknown_student() {
        let r = sample_registry();
        assert_eq!(
            Transcript::build(&r, "00000000T"),
            Err(Rejection::UnknownStudent("00000000T".into()))
        );
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("exp.txt");
        fs::write(&path, "old contents that are longer than the report").unwrap();

        let r = sample_registry();
        Transcript::build(&r, "87654321X").unwrap().write_to(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1; PROG; 6.0; 16/17\nAverage grade: 6.00\n"
        );

        let bad = Transcript::build(&r, "87654321X")
            .unwrap()
            .write_to(dir.path().join("missing/exp.txt"));
        assert!(matches!(bad, Err(Rejection::Unwritable { .. })));
    }
}
