//! `matricula`: enroll a student in a subject.

use crate::error::{Rejection, RuleResult};
use crate::registry::{Collection, Registry};

use super::{CommandTag, RuleChain};

/// Enroll command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enroll {
    pub student: String,
    pub subject: String,
}

impl Enroll {
    pub fn new(student: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            student: student.into(),
            subject: subject.into(),
        }
    }
}

impl RuleChain for Enroll {
    type Plan = ();

    fn tag(&self) -> CommandTag {
        CommandTag::Enroll
    }

    fn check(&self, registry: &Registry) -> RuleResult {
        let student = registry
            .student(&self.student)
            .ok_or_else(|| Rejection::UnknownStudent(self.student.clone()))?;
        let subject = registry
            .subject(&self.subject)
            .ok_or_else(|| Rejection::UnknownSubject(self.subject.clone()))?;
        if student.is_enrolled(&self.subject) {
            return Err(Rejection::AlreadyEnrolled(self.subject.clone()));
        }
        match subject.prerequisites.iter().find(|p| !student.has_passed(p)) {
            Some(missing) => Err(Rejection::PrerequisiteMissing(missing.clone())),
            None => Ok(()),
        }
    }

    fn commit(&self, _: (), registry: &mut Registry) -> Collection {
        if let Some(student) = registry.students.get_mut(&self.student) {
            student.enroll(self.subject.as_str());
        }
        Collection::Students
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Enrollment, Subject};
    use crate::registry::tests::sample_registry;

    #[test]
    fn test_enroll_with_prerequisites_met() {
        let mut r = sample_registry();
        // Luis passed PROG
        assert_eq!(Enroll::new("87654321X", "ALGO").run(&mut r), Ok(Collection::Students));
        let luis = r.student("87654321X").unwrap();
        assert_eq!(luis.enrollment("ALGO"), Some(&Enrollment::unassigned("ALGO")));
    }

    #[test]
    fn test_enroll_without_prerequisites() {
        let mut r = sample_registry();
        assert_eq!(
            Enroll::new("12345678Z", "ALGO").run(&mut r),
            Err(Rejection::PrerequisiteMissing("PROG".into()))
        );
        assert!(!r.student("12345678Z").unwrap().is_enrolled("ALGO"));
    }

    #[test]
    fn test_partial_prerequisites_rejected() {
        let mut r = sample_registry();
        r.insert_subject(
            Subject::new("COMP", "Compilers")
                .with_prerequisite("PROG")
                .with_prerequisite("MATH"),
        );
        assert_eq!(
            Enroll::new("87654321X", "COMP").run(&mut r),
            Err(Rejection::PrerequisiteMissing("MATH".into()))
        );

        if let Some(luis) = r.students.get_mut("87654321X") {
            luis.record_grade("MATH", "17/18", 5.0);
        }
        assert!(Enroll::new("87654321X", "COMP").run(&mut r).is_ok());
    }

    #[test]
    fn test_enroll_rejections() {
        let r = sample_registry();
        assert_eq!(
            Enroll::new("00000000T", "PROG").check(&r),
            Err(Rejection::UnknownStudent("00000000T".into()))
        );
        assert_eq!(
            Enroll::new("12345678Z", "NOPE").check(&r),
            Err(Rejection::UnknownSubject("NOPE".into()))
        );
        assert_eq!(
            Enroll::new("12345678Z", "PROG").check(&r),
            Err(Rejection::AlreadyEnrolled("PROG".into()))
        );
    }
}
