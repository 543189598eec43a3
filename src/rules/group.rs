//! `creaGrupoAsig`: add a group to a subject.

use crate::error::{Rejection, RuleResult};
use crate::models::{first_conflict, Group, HourRange, Weekday};
use crate::registry::{Collection, Registry};

use super::{parse_kind, CommandTag, RuleChain};

/// Create-group command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGroup {
    pub subject: String,
    /// Raw group-kind token.
    pub kind: String,
    pub id: u32,
    /// Raw weekday code (`L M X J V`).
    pub day: String,
    pub start_hour: u32,
    pub classroom: String,
}

impl RuleChain for CreateGroup {
    type Plan = Group;

    fn tag(&self) -> CommandTag {
        CommandTag::CreateGroup
    }

    fn check(&self, registry: &Registry) -> RuleResult<Group> {
        let subject = registry
            .subject(&self.subject)
            .ok_or_else(|| Rejection::UnknownSubject(self.subject.clone()))?;
        let kind = parse_kind(&self.kind)?;
        if subject.group(kind, self.id).is_some() {
            return Err(Rejection::DuplicateGroup {
                subject: self.subject.clone(),
                kind,
                id: self.id,
            });
        }
        let day = Weekday::from_code(&self.day)
            .ok_or_else(|| Rejection::InvalidDay(self.day.clone()))?;
        if registry.classroom(&self.classroom).is_none() {
            return Err(Rejection::UnknownClassroom(self.classroom.clone()));
        }

        let target = HourRange::new(day, self.start_hour, subject.session_length(kind));
        let taken: Vec<HourRange> = registry
            .classroom_groups(&self.classroom, Some(day))
            .map(|placed| placed.range)
            .collect();
        if let Some(conflict) = first_conflict(&target, &taken) {
            return Err(Rejection::ClassroomOverlap(conflict));
        }

        Ok(Group::new(self.id, kind, day, self.start_hour, self.classroom.as_str()))
    }

    fn commit(&self, group: Group, registry: &mut Registry) -> Collection {
        if let Some(subject) = registry.subjects.get_mut(&self.subject) {
            subject.add_group(group);
        }
        Collection::Subjects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupKind, Subject};
    use crate::registry::tests::sample_registry;

    fn create(subject: &str, kind: &str, id: u32, day: &str, hour: u32, room: &str) -> CreateGroup {
        CreateGroup {
            subject: subject.into(),
            kind: kind.into(),
            id,
            day: day.into(),
            start_hour: hour,
            classroom: room.into(),
        }
    }

    #[test]
    fn test_create_group() {
        let mut r = sample_registry();
        assert_eq!(
            create("MATH", "B", 1, "V", 12, "LAB1").run(&mut r),
            Ok(Collection::Subjects)
        );
        assert_eq!(
            r.group_range("MATH", GroupKind::B, 1),
            Some(HourRange::new(Weekday::Friday, 12, 1))
        );
    }

    #[test]
    fn test_classroom_overlap_across_subjects() {
        let mut r = sample_registry();
        // PROG A1 holds AUL1 on Monday 9-11; MATH A is three hours long
        assert_eq!(
            create("MATH", "A", 2, "L", 10, "AUL1").run(&mut r),
            Err(Rejection::ClassroomOverlap(HourRange::new(Weekday::Monday, 9, 2)))
        );
        assert!(r.subject("MATH").unwrap().group(GroupKind::A, 2).is_none());

        // back-to-back is fine
        assert!(create("MATH", "A", 2, "L", 11, "AUL1").run(&mut r).is_ok());
        // AUL2 is busy Monday 10-12 but free on Tuesday
        assert!(create("ALGO", "A", 2, "L", 9, "AUL2").run(&mut r).is_err());
        assert!(create("ALGO", "A", 2, "M", 9, "AUL2").run(&mut r).is_ok());
    }

    #[test]
    fn test_create_group_rejections() {
        let r = sample_registry();
        assert_eq!(
            create("NOPE", "A", 1, "L", 9, "AUL1").check(&r),
            Err(Rejection::UnknownSubject("NOPE".into()))
        );
        assert_eq!(
            create("PROG", "T", 1, "L", 9, "AUL1").check(&r),
            Err(Rejection::InvalidKind("T".into()))
        );
        assert_eq!(
            create("PROG", "B", 2, "J", 9, "LAB1").check(&r),
            Err(Rejection::DuplicateGroup {
                subject: "PROG".into(),
                kind: GroupKind::B,
                id: 2
            })
        );
        assert_eq!(
            create("PROG", "B", 3, "S", 9, "LAB1").check(&r),
            Err(Rejection::InvalidDay("S".into()))
        );
        assert_eq!(
            create("PROG", "B", 3, "J", 9, "LAB9").check(&r),
            Err(Rejection::UnknownClassroom("LAB9".into()))
        );
    }

    #[test]
    fn test_zero_length_session_occupies_nothing() {
        let mut r = sample_registry();
        r.insert_subject(Subject::new("SEM", "Seminar").with_year(1, 2).with_lengths(0, 1));
        // AUL1 is busy Monday 9-11
        assert!(create("SEM", "A", 1, "L", 10, "AUL1").run(&mut r).is_ok());
        assert!(create("SEM", "A", 2, "L", 12, "AUL1").run(&mut r).is_ok());
        assert!(r.subject("SEM").unwrap().group(GroupKind::A, 1).is_some());
        // an empty group blocks nobody
        assert!(create("MATH", "B", 1, "L", 12, "AUL1").run(&mut r).is_ok());
    }
}
