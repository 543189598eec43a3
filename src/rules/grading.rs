//! `evalua`: close a subject for the current academic year.
//!
//! Grading is a batch: the subject-level pre-check can reject the whole
//! command, but once it passes every row of the theory sheet is judged on
//! its own. Rejected rows are collected and reported; the rest are
//! committed together and the students collection is persisted once.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Rejection, RuleResult, SheetError};
use crate::registry::{Collection, Registry};

use super::{CommandTag, RuleChain};

pub use crate::models::PASS_MARK;

/// Highest accepted sub-score.
pub const MAX_SUB_SCORE: f64 = 5.0;

/// Ordered student id → sub-score list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeSheet {
    rows: Vec<(String, f64)>,
}

impl GradeSheet {
    /// Parses `<id> <score>` lines. Blank lines are ignored; a repeated id
    /// keeps its first position and takes the last score.
    pub fn parse(text: &str) -> Result<Self, SheetError> {
        let mut sheet = Self::default();
        for (n, line) in text.lines().enumerate() {
            let line_no = n + 1;
            let mut fields = line.split_whitespace();
            let (id, score) = match (fields.next(), fields.next(), fields.next()) {
                (None, _, _) => continue,
                (Some(id), Some(score), None) => (id, score),
                _ => return Err(SheetError::Malformed { line: line_no }),
            };
            let score: f64 = score.parse().map_err(|_| SheetError::NotANumber {
                line: line_no,
                value: score.to_string(),
            })?;
            sheet.insert(id, score);
        }
        Ok(sheet)
    }

    /// Reads and parses a grade file.
    pub fn load(path: impl AsRef<Path>) -> RuleResult<Self> {
        let path = path.as_ref();
        let unreadable = |reason: String| Rejection::Unreadable {
            path: path.display().to_string(),
            reason,
        };
        let text = fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
        Self::parse(&text).map_err(|e| unreadable(e.to_string()))
    }

    /// Sets a score, keeping an existing row's position.
    pub fn insert(&mut self, id: impl Into<String>, score: f64) {
        let id = id.into();
        match self.rows.iter_mut().find(|(i, _)| *i == id) {
            Some(row) => row.1 = score,
            None => self.rows.push((id, score)),
        }
    }

    /// Adds a score.
    pub fn with(mut self, id: impl Into<String>, score: f64) -> Self {
        self.insert(id, score);
        self
    }

    /// Score of a student, if listed.
    pub fn score(&self, id: &str) -> Option<f64> {
        self.rows.iter().find(|(i, _)| i == id).map(|(_, s)| *s)
    }

    /// Rows in order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rows.iter().map(|(id, s)| (id.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A rejected grading row (1-based, in theory-sheet order).
#[derive(Debug, Clone, PartialEq)]
pub struct RowRejection {
    pub row: usize,
    pub reason: Rejection,
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.reason)
    }
}

/// Checked grading batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradingPlan {
    /// (student, total) for every accepted row.
    pub totals: Vec<(String, f64)>,
    pub rejected: Vec<RowRejection>,
}

/// Outcome of a grading batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradingReport {
    /// Rows committed.
    pub graded: usize,
    /// Committed rows with a passing total.
    pub passed: usize,
    pub rejected: Vec<RowRejection>,
}

/// Evaluate-subject command.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluateSubject {
    pub subject: String,
    /// Theory scores; drives the batch.
    pub theory: GradeSheet,
    /// Practice scores; looked up only.
    pub practice: GradeSheet,
}

impl EvaluateSubject {
    pub fn new(subject: impl Into<String>, theory: GradeSheet, practice: GradeSheet) -> Self {
        Self {
            subject: subject.into(),
            theory,
            practice,
        }
    }

    /// Subject-level checks, run before any grade sheet is read: the
    /// subject exists and has not been graded in the current year.
    pub fn precheck(registry: &Registry, subject: &str) -> RuleResult {
        if registry.subject(subject).is_none() {
            return Err(Rejection::UnknownSubject(subject.to_string()));
        }
        let year = &registry.calendar.year;
        if registry.graded_in(subject, year) {
            return Err(Rejection::AlreadyGraded {
                subject: subject.to_string(),
                year: year.clone(),
            });
        }
        Ok(())
    }

    fn check_row(&self, registry: &Registry, id: &str, theory: f64) -> RuleResult<f64> {
        let student = registry
            .student(id)
            .ok_or_else(|| Rejection::UnknownStudent(id.to_string()))?;
        if !student.is_enrolled(&self.subject) {
            return Err(Rejection::NotEnrolled(self.subject.clone()));
        }
        let practice = self
            .practice
            .score(id)
            .ok_or_else(|| Rejection::MissingScore(id.to_string()))?;
        let in_range = |s: f64| (0.0..=MAX_SUB_SCORE).contains(&s);
        if !in_range(theory) || !in_range(practice) {
            return Err(Rejection::ScoreOutOfRange {
                student: id.to_string(),
                score_a: theory,
                score_b: practice,
            });
        }
        Ok(theory + practice)
    }

    /// Runs the batch and reports what was committed and rejected.
    pub fn run_batch(&self, registry: &mut Registry) -> RuleResult<GradingReport> {
        let plan = self.check(registry)?;
        let rejected = plan.rejected.clone();
        let graded = plan.totals.len();
        let passed = plan.totals.iter().filter(|(_, t)| *t >= PASS_MARK).count();
        self.commit(plan, registry);
        Ok(GradingReport {
            graded,
            passed,
            rejected,
        })
    }
}

impl RuleChain for EvaluateSubject {
    type Plan = GradingPlan;

    fn tag(&self) -> CommandTag {
        CommandTag::Evaluate
    }

    fn check(&self, registry: &Registry) -> RuleResult<GradingPlan> {
        Self::precheck(registry, &self.subject)?;

        let mut plan = GradingPlan::default();
        for (n, (id, theory)) in self.theory.rows().enumerate() {
            match self.check_row(registry, id, theory) {
                Ok(total) => plan.totals.push((id.to_string(), total)),
                Err(reason) => plan.rejected.push(RowRejection { row: n + 1, reason }),
            }
        }
        Ok(plan)
    }

    fn commit(&self, plan: GradingPlan, registry: &mut Registry) -> Collection {
        let year = registry.calendar.year.clone();
        for (id, total) in plan.totals {
            if let Some(student) = registry.students.get_mut(&id) {
                student.record_grade(&self.subject, &year, total);
            }
        }
        Collection::Students
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Enrollment, PassedSubject, Student};
    use crate::registry::tests::{date, sample_registry};
    use std::io::Write;

    fn with_prog_students(mut r: Registry) -> Registry {
        for id in ["30000000A", "30000001B", "30000002C"] {
            r.insert_student(
                Student::new(id, "Student", date(1999, 1, 1), date(2017, 9, 1))
                    .with_enrollment(Enrollment::seated("PROG", crate::models::GroupKind::B, 1)),
            );
        }
        r
    }

    #[test]
    fn test_parse_sheet() {
        let sheet = GradeSheet::parse("30000000A 3.5\n\n  30000001B\t2\n30000000A 4\n").unwrap();
        let rows: Vec<_> = sheet.rows().collect();
        assert_eq!(rows, vec![("30000000A", 4.0), ("30000001B", 2.0)]);
        assert_eq!(sheet.score("30000001B"), Some(2.0));
        assert_eq!(sheet.score("nobody"), None);
    }

    #[test]
    fn test_parse_sheet_malformed() {
        assert_eq!(
            GradeSheet::parse("30000000A"),
            Err(SheetError::Malformed { line: 1 })
        );
        assert_eq!(
            GradeSheet::parse("\n30000000A x"),
            Err(SheetError::NotANumber {
                line: 2,
                value: "x".into()
            })
        );
        assert_eq!(
            GradeSheet::parse("30000000A 1 2"),
            Err(SheetError::Malformed { line: 1 })
        );
    }

    #[test]
    fn test_load_sheet() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "12345678Z 3.0").unwrap();
        let sheet = GradeSheet::load(file.path()).unwrap();
        assert_eq!(sheet.len(), 1);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "12345678Z tres").unwrap();
        match GradeSheet::load(bad.path()) {
            Err(Rejection::Unreadable { reason, .. }) => {
                assert_eq!(reason, "line 1: score is not a number: tres")
            }
            other => panic!("expected Unreadable, got {other:?}"),
        }

        let missing = GradeSheet::load("/nonexistent/notas.txt");
        assert!(matches!(missing, Err(Rejection::Unreadable { .. })));
    }

    #[test]
    fn test_pass_removes_enrollment() {
        let mut r = sample_registry();
        let cmd = EvaluateSubject::new(
            "PROG",
            GradeSheet::default().with("12345678Z", 3.0),
            GradeSheet::default().with("12345678Z", 2.5),
        );
        let report = cmd.run_batch(&mut r).unwrap();
        assert_eq!(report.graded, 1);
        assert_eq!(report.passed, 1);
        assert!(report.rejected.is_empty());

        let ana = r.student("12345678Z").unwrap();
        assert!(!ana.is_enrolled("PROG"));
        assert_eq!(
            ana.passed,
            vec![PassedSubject {
                subject: "PROG".into(),
                academic_year: "17/18".into(),
                grade: 5.5
            }]
        );
    }

    #[test]
    fn test_fail_drops_enrollment_only() {
        let mut r = sample_registry();
        let cmd = EvaluateSubject::new(
            "PROG",
            GradeSheet::default().with("12345678Z", 2.0),
            GradeSheet::default().with("12345678Z", 1.0),
        );
        let report = cmd.run_batch(&mut r).unwrap();
        assert_eq!((report.graded, report.passed), (1, 0));
        let ana = r.student("12345678Z").unwrap();
        assert!(!ana.is_enrolled("PROG"));
        assert!(ana.passed.is_empty());
    }

    #[test]
    fn test_bad_row_does_not_stop_batch() {
        let mut r = with_prog_students(sample_registry());
        let theory = GradeSheet::default()
            .with("30000000A", 5.5)
            .with("30000001B", 4.0)
            .with("99999999Q", 4.0)
            .with("30000002C", 3.0);
        let practice = GradeSheet::default()
            .with("30000000A", 1.0)
            .with("30000001B", 4.0)
            .with("87654321X", 5.0);
        let report = EvaluateSubject::new("PROG", theory, practice)
            .run_batch(&mut r)
            .unwrap();

        let rows: Vec<String> = report.rejected.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            rows,
            vec![
                "row 1: score out of range for 30000000A: 5.5/1".to_string(),
                "row 3: unknown student 99999999Q".to_string(),
                "row 4: missing practice score for 30000002C".to_string(),
            ]
        );
        assert_eq!(report.graded, 1);
        assert!(r.student("30000001B").unwrap().has_passed("PROG"));
        assert!(r.student("30000000A").unwrap().is_enrolled("PROG"));
        assert!(r.student("30000002C").unwrap().is_enrolled("PROG"));
    }

    #[test]
    fn test_not_enrolled_row() {
        let r = sample_registry();
        let cmd = EvaluateSubject::new(
            "PROG",
            GradeSheet::default().with("87654321X", 3.0),
            GradeSheet::default().with("87654321X", 3.0),
        );
        let plan = cmd.check(&r).unwrap();
        assert_eq!(
            plan.rejected,
            vec![RowRejection {
                row: 1,
                reason: Rejection::NotEnrolled("PROG".into())
            }]
        );
    }

    #[test]
    fn test_grading_twice_rejected() {
        let mut r = sample_registry();
        let cmd = EvaluateSubject::new(
            "PROG",
            GradeSheet::default().with("12345678Z", 3.0),
            GradeSheet::default().with("12345678Z", 3.0),
        );
        assert!(cmd.run_batch(&mut r).is_ok());

        let before = r.clone();
        assert_eq!(
            cmd.run_batch(&mut r),
            Err(Rejection::AlreadyGraded {
                subject: "PROG".into(),
                year: "17/18".into()
            })
        );
        assert_eq!(r, before);
    }

    #[test]
    fn test_unknown_subject() {
        let r = sample_registry();
        let cmd = EvaluateSubject::new("NOPE", GradeSheet::default(), GradeSheet::default());
        assert_eq!(cmd.check(&r), Err(Rejection::UnknownSubject("NOPE".into())));
    }
}
