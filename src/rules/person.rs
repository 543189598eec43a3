//! `insertaPersona`: register a new student or teacher.

use crate::error::{Rejection, RuleResult};
use crate::models::{Category, Student, Teacher};
use crate::registry::{Collection, Registry};
use crate::validation::{validate_admission_date, validate_birth_date, validate_national_id};

use super::{CommandTag, RuleChain};

/// Insert-person command, with its raw date arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertPerson {
    Teacher {
        id: String,
        name: String,
        birth_date: String,
        category: String,
        department: String,
    },
    Student {
        id: String,
        name: String,
        birth_date: String,
        admission_date: String,
    },
}

/// A validated person ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub enum NewPerson {
    Teacher(Teacher),
    Student(Student),
}

impl InsertPerson {
    fn id(&self) -> &str {
        match self {
            Self::Teacher { id, .. } | Self::Student { id, .. } => id,
        }
    }
}

impl RuleChain for InsertPerson {
    type Plan = NewPerson;

    fn tag(&self) -> CommandTag {
        CommandTag::InsertPerson
    }

    fn check(&self, registry: &Registry) -> RuleResult<NewPerson> {
        validate_national_id(self.id())?;
        match self {
            Self::Teacher {
                id,
                name,
                birth_date,
                category,
                department,
            } => {
                let birth = validate_birth_date(birth_date)?;
                if registry.teacher(id).is_some() {
                    return Err(Rejection::DuplicateTeacher(id.clone()));
                }
                Ok(NewPerson::Teacher(Teacher::new(
                    id.as_str(),
                    name.as_str(),
                    birth,
                    Category::from_name(category),
                    department.as_str(),
                )))
            }
            Self::Student {
                id,
                name,
                birth_date,
                admission_date,
            } => {
                let birth = validate_birth_date(birth_date)?;
                let admission = validate_admission_date(birth, admission_date)?;
                if registry.student(id).is_some() {
                    return Err(Rejection::DuplicateStudent(id.clone()));
                }
                Ok(NewPerson::Student(Student::new(
                    id.as_str(),
                    name.as_str(),
                    birth,
                    admission,
                )))
            }
        }
    }

    fn commit(&self, plan: NewPerson, registry: &mut Registry) -> Collection {
        match plan {
            NewPerson::Teacher(t) => {
                registry.insert_teacher(t);
                Collection::Teachers
            }
            NewPerson::Student(s) => {
                registry.insert_student(s);
                Collection::Students
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::{date, sample_registry};

    fn student(id: &str, birth: &str, admission: &str) -> InsertPerson {
        InsertPerson::Student {
            id: id.into(),
            name: "Eva Sanz".into(),
            birth_date: birth.into(),
            admission_date: admission.into(),
        }
    }

    fn teacher(id: &str, category: &str) -> InsertPerson {
        InsertPerson::Teacher {
            id: id.into(),
            name: "Pablo Mora".into(),
            birth_date: "12/3/1975".into(),
            category: category.into(),
            department: "Maths".into(),
        }
    }

    #[test]
    fn test_insert_student() {
        let mut r = sample_registry();
        let cmd = student("33333333C", "3/4/1999", "1/9/2017");
        assert_eq!(cmd.run(&mut r), Ok(Collection::Students));

        let s = r.student("33333333C").unwrap();
        assert_eq!(s.birth_date, date(1999, 4, 3));
        assert_eq!(s.admission_date, date(2017, 9, 1));
        assert!(s.enrollments.is_empty());
    }

    #[test]
    fn test_insert_teacher() {
        let mut r = sample_registry();
        assert_eq!(teacher("33333333C", "TITULAR").run(&mut r), Ok(Collection::Teachers));
        assert_eq!(r.teacher("33333333C").unwrap().category, Category::Tenured);

        assert_eq!(teacher("44444444D", "interino").run(&mut r), Ok(Collection::Teachers));
        assert_eq!(r.teacher("44444444D").unwrap().category, Category::Associate);
    }

    #[test]
    fn test_checks_run_in_order() {
        let r = sample_registry();
        // bad id wins over bad dates
        assert_eq!(
            student("1234", "x", "y").check(&r),
            Err(Rejection::InvalidId("1234".into()))
        );
        // bad birth date wins over bad admission date
        assert_eq!(
            student("33333333C", "1/1/1950", "y").check(&r),
            Err(Rejection::InvalidBirthDate("1/1/1950".into()))
        );
        // dates are checked before the duplicate lookup
        assert_eq!(
            student("12345678Z", "3/4/1999", "1/9/2010").check(&r),
            Err(Rejection::InvalidAdmissionDate("1/9/2010".into()))
        );
    }

    #[test]
    fn test_duplicates_rejected_per_collection() {
        let mut r = sample_registry();
        assert_eq!(
            student("12345678Z", "3/4/1999", "1/9/2017").run(&mut r),
            Err(Rejection::DuplicateStudent("12345678Z".into()))
        );
        assert_eq!(
            teacher("11111111A", "titular").run(&mut r),
            Err(Rejection::DuplicateTeacher("11111111A".into()))
        );
        // a student id may also be registered as a teacher
        assert!(teacher("12345678Z", "asociado").run(&mut r).is_ok());
    }
}
