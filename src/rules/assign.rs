//! `asignaGrupo`: seat a student in a group, or give a teacher a section.

use std::fmt;

use crate::error::{Rejection, RuleResult};
use crate::models::{first_conflict, GroupKind, Section};
use crate::registry::{Collection, Registry};

use super::{parse_kind, CommandTag, RuleChain};

/// Who is being assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Student,
    Teacher,
}

impl Profile {
    /// Recognizes `alumno` / `profesor` anywhere in the role token.
    pub fn from_role(role: &str) -> Option<Self> {
        let role = role.to_lowercase();
        if role.contains("profesor") {
            Some(Self::Teacher)
        } else if role.contains("alumno") {
            Some(Self::Student)
        } else {
            None
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => f.write_str("alumno"),
            Self::Teacher => f.write_str("profesor"),
        }
    }
}

/// Assign-group command.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignGroup {
    pub profile: Profile,
    /// Student or teacher id.
    pub id: String,
    pub subject: String,
    /// Raw group-kind token.
    pub kind: String,
    pub group: u32,
}

impl AssignGroup {
    /// Creates an assignment.
    pub fn new(
        profile: Profile,
        id: impl Into<String>,
        subject: impl Into<String>,
        kind: impl Into<String>,
        group: u32,
    ) -> Self {
        Self {
            profile,
            id: id.into(),
            subject: subject.into(),
            kind: kind.into(),
            group,
        }
    }

    fn check_person_exists(&self, registry: &Registry) -> RuleResult {
        let found = match self.profile {
            Profile::Student => registry.student(&self.id).is_some(),
            Profile::Teacher => registry.teacher(&self.id).is_some(),
        };
        match (found, self.profile) {
            (true, _) => Ok(()),
            (false, Profile::Student) => Err(Rejection::UnknownStudent(self.id.clone())),
            (false, Profile::Teacher) => Err(Rejection::UnknownTeacher(self.id.clone())),
        }
    }

    fn check_teacher(&self, registry: &Registry, kind: GroupKind) -> RuleResult {
        let (subject, group) = (self.subject.as_str(), self.group);
        if registry.section_holder(subject, kind, group).is_some() {
            return Err(Rejection::SectionTaken {
                subject: self.subject.clone(),
                kind,
                id: group,
            });
        }

        let teacher = registry
            .teacher(&self.id)
            .ok_or_else(|| Rejection::UnknownTeacher(self.id.clone()))?;
        let quota = registry
            .quota(&self.id, subject, kind)
            .ok_or_else(|| Rejection::QuotaMissing {
                subject: self.subject.clone(),
                kind,
            })?;
        if !quota.admits(teacher.section_count(subject, kind)) {
            return Err(Rejection::QuotaExceeded {
                subject: self.subject.clone(),
                kind,
                max: quota.max_groups,
            });
        }

        if let Some(target) = registry.group_range(subject, kind, group) {
            let busy = registry.teacher_commitments(teacher);
            if let Some(conflict) = first_conflict(&target, &busy) {
                return Err(Rejection::ScheduleOverlap(conflict));
            }
        }
        Ok(())
    }

    fn check_student(&self, registry: &Registry, kind: GroupKind) -> RuleResult {
        let (subject, group) = (self.subject.as_str(), self.group);
        let student = registry
            .student(&self.id)
            .ok_or_else(|| Rejection::UnknownStudent(self.id.clone()))?;
        if !student.is_enrolled(subject) {
            return Err(Rejection::NotEnrolled(self.subject.clone()));
        }

        if let Some(target) = registry.group_range(subject, kind, group) {
            let busy = registry.student_commitments(student, Some((subject, kind)));
            if let Some(conflict) = first_conflict(&target, &busy) {
                return Err(Rejection::ScheduleOverlap(conflict));
            }
        }

        let room = registry
            .subject(subject)
            .and_then(|s| s.group(kind, group))
            .map(|g| g.classroom.as_str())
            .unwrap_or_default();
        let classroom = registry
            .classroom(room)
            .ok_or_else(|| Rejection::UnknownClassroom(room.to_string()))?;
        let limit = classroom.seat_limit(kind);
        let mut seated = registry.seated_count(subject, kind, group);
        if student.is_seated_in(subject, kind, group) {
            seated -= 1;
        }
        if seated >= limit as usize {
            return Err(Rejection::RoomFull(limit));
        }
        Ok(())
    }
}

impl RuleChain for AssignGroup {
    type Plan = GroupKind;

    fn tag(&self) -> CommandTag {
        CommandTag::AssignGroup
    }

    fn check(&self, registry: &Registry) -> RuleResult<GroupKind> {
        self.check_person_exists(registry)?;
        let subject = registry
            .subject(&self.subject)
            .ok_or_else(|| Rejection::UnknownSubject(self.subject.clone()))?;
        let kind = parse_kind(&self.kind)?;
        if subject.group(kind, self.group).is_none() {
            return Err(Rejection::UnknownGroup {
                subject: self.subject.clone(),
                kind,
                id: self.group,
            });
        }
        match self.profile {
            Profile::Teacher => self.check_teacher(registry, kind)?,
            Profile::Student => self.check_student(registry, kind)?,
        }
        Ok(kind)
    }

    fn commit(&self, kind: GroupKind, registry: &mut Registry) -> Collection {
        match self.profile {
            Profile::Student => {
                if let Some(student) = registry.students.get_mut(&self.id) {
                    student.seat(&self.subject, kind, self.group);
                }
                Collection::Students
            }
            Profile::Teacher => {
                if let Some(teacher) = registry.teachers.get_mut(&self.id) {
                    teacher
                        .sections
                        .push(Section::new(self.subject.as_str(), kind, self.group));
                }
                Collection::Teachers
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Enrollment, Group, HourRange, Quota, Student, Weekday};
    use crate::registry::tests::{date, sample_registry};

    fn student(id: &str, subject: &str, kind: &str, group: u32) -> AssignGroup {
        AssignGroup::new(Profile::Student, id, subject, kind, group)
    }

    fn teacher(id: &str, subject: &str, kind: &str, group: u32) -> AssignGroup {
        AssignGroup::new(Profile::Teacher, id, subject, kind, group)
    }

    #[test]
    fn test_profile_from_role() {
        assert_eq!(Profile::from_role("alumno"), Some(Profile::Student));
        assert_eq!(Profile::from_role("Profesor"), Some(Profile::Teacher));
        assert_eq!(Profile::from_role("profesores"), Some(Profile::Teacher));
        assert_eq!(Profile::from_role("bedel"), None);
    }

    #[test]
    fn test_referential_checks_in_order() {
        let r = sample_registry();
        assert_eq!(
            student("99999999Q", "NOPE", "C", 0).check(&r),
            Err(Rejection::UnknownStudent("99999999Q".into()))
        );
        assert_eq!(
            teacher("99999999Q", "PROG", "A", 1).check(&r),
            Err(Rejection::UnknownTeacher("99999999Q".into()))
        );
        assert_eq!(
            student("12345678Z", "NOPE", "C", 1).check(&r),
            Err(Rejection::UnknownSubject("NOPE".into()))
        );
        assert_eq!(
            student("12345678Z", "PROG", "C", 1).check(&r),
            Err(Rejection::InvalidKind("C".into()))
        );
        assert_eq!(
            student("12345678Z", "PROG", "A", 7).check(&r),
            Err(Rejection::UnknownGroup {
                subject: "PROG".into(),
                kind: GroupKind::A,
                id: 7
            })
        );
    }

    #[test]
    fn test_teacher_assignment() {
        let mut r = sample_registry();
        assert_eq!(
            teacher("22222222B", "PROG", "B", 1).run(&mut r),
            Ok(Collection::Teachers)
        );
        assert!(r.teacher("22222222B").unwrap().teaches("PROG", GroupKind::B, 1));
    }

    #[test]
    fn test_section_taken_by_any_teacher() {
        let mut r = sample_registry();
        r.insert_quota(Quota::new("22222222B", "PROG", GroupKind::A, 3.0));
        assert_eq!(
            teacher("22222222B", "PROG", "A", 1).run(&mut r),
            Err(Rejection::SectionTaken {
                subject: "PROG".into(),
                kind: GroupKind::A,
                id: 1
            })
        );
    }

    #[test]
    fn test_quota_missing() {
        let r = sample_registry();
        assert_eq!(
            teacher("22222222B", "MATH", "A", 1).check(&r),
            Err(Rejection::QuotaMissing {
                subject: "MATH".into(),
                kind: GroupKind::A
            })
        );
    }

    #[test]
    fn test_quota_maximum_rejected_without_mutation() {
        let mut r = sample_registry();
        if let Some(algo) = r.subjects.get_mut("ALGO") {
            algo.add_group(Group::new(2, GroupKind::A, Weekday::Thursday, 9, "AUL2"));
        }
        assert!(teacher("22222222B", "ALGO", "A", 1).run(&mut r).is_ok());
        let before = r.teacher("22222222B").unwrap().sections.clone();

        assert_eq!(
            teacher("22222222B", "ALGO", "A", 2).run(&mut r),
            Err(Rejection::QuotaExceeded {
                subject: "ALGO".into(),
                kind: GroupKind::A,
                max: 1.0
            })
        );
        assert_eq!(r.teacher("22222222B").unwrap().sections, before);
    }

    #[test]
    fn test_teacher_schedule_overlap() {
        let mut r = sample_registry();
        r.insert_quota(Quota::new("11111111A", "ALGO", GroupKind::A, 1.0));
        // ALGO A1 is Mon 10-12, PROG A1 is Mon 9-11
        assert_eq!(
            teacher("11111111A", "ALGO", "A", 1).run(&mut r),
            Err(Rejection::ScheduleOverlap(HourRange::new(Weekday::Monday, 9, 2)))
        );
    }

    #[test]
    fn test_student_must_be_enrolled() {
        let r = sample_registry();
        assert_eq!(
            student("12345678Z", "MATH", "A", 1).check(&r),
            Err(Rejection::NotEnrolled("MATH".into()))
        );
    }

    #[test]
    fn test_student_schedule_overlap() {
        let mut r = sample_registry();
        if let Some(ana) = r.students.get_mut("12345678Z") {
            ana.enroll("ALGO");
        }
        assert_eq!(
            student("12345678Z", "ALGO", "A", 1).run(&mut r),
            Err(Rejection::ScheduleOverlap(HourRange::new(Weekday::Monday, 9, 2)))
        );
    }

    #[test]
    fn test_student_seated() {
        let mut r = sample_registry();
        assert_eq!(
            student("87654321X", "MATH", "A", 1).run(&mut r),
            Ok(Collection::Students)
        );
        assert!(r.student("87654321X").unwrap().is_seated_in("MATH", GroupKind::A, 1));
    }

    #[test]
    fn test_reassignment_moves_student() {
        let mut r = sample_registry();
        if let Some(prog) = r.subjects.get_mut("PROG") {
            // overlaps the vacated A1 slot, which must not count
            prog.add_group(Group::new(2, GroupKind::A, Weekday::Monday, 10, "AUL2"));
        }
        assert_eq!(
            student("12345678Z", "PROG", "A", 2).run(&mut r),
            Ok(Collection::Students)
        );
        let ana = r.student("12345678Z").unwrap();
        assert!(ana.is_seated_in("PROG", GroupKind::A, 2));
        assert!(!ana.is_seated_in("PROG", GroupKind::A, 1));
        assert_eq!(ana.enrollments.len(), 1);
    }

    #[test]
    fn test_room_full() {
        let mut r = sample_registry();
        for (id, name) in [("30000000A", "Uno"), ("30000001B", "Dos"), ("30000002C", "Tres")] {
            r.insert_student(
                Student::new(id, name, date(1999, 1, 1), date(2017, 9, 1))
                    .with_enrollment(Enrollment::unassigned("PROG")),
            );
        }
        // LAB1 seats two
        assert!(student("30000000A", "PROG", "B", 1).run(&mut r).is_ok());
        assert!(student("30000001B", "PROG", "B", 1).run(&mut r).is_ok());
        assert_eq!(
            student("30000002C", "PROG", "B", 1).run(&mut r),
            Err(Rejection::RoomFull(2))
        );
        assert!(!r.student("30000002C").unwrap().is_seated_in("PROG", GroupKind::B, 1));
        // the other lab group still has room
        assert!(student("30000002C", "PROG", "B", 2).run(&mut r).is_ok());
    }

    #[test]
    fn test_unknown_classroom() {
        let mut r = sample_registry();
        r.classrooms.remove("AUL1");
        assert_eq!(
            student("87654321X", "MATH", "A", 1).check(&r),
            Err(Rejection::UnknownClassroom("AUL1".into()))
        );
    }
}
