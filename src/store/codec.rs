//! Field layouts of each collection's records.
//!
//! | Collection | Fields |
//! |------------|--------|
//! | classroom | id, kind, capacity |
//! | subject | code, name, year, term, coordinator, prerequisites, length A, length B, groups A, groups B |
//! | quota | teacher, subject, kind, max |
//! | teacher | id, name, birth date, category, department, sections |
//! | student | id, name, email, birth date, admission date, passed, enrollments |
//!
//! Decoders return a plain reason string; the loader adds file and record
//! context.

use chrono::NaiveDate;
use std::str::FromStr;

use crate::models::{
    Category, Classroom, Enrollment, Group, GroupKind, PassedSubject, Quota, Section, Student,
    Subject, Teacher, Weekday,
};
use crate::registry::AcademicCalendar;
use crate::validation::{format_date, parse_date};

use super::records::{join_list, split_list, Block};

type Decoded<T> = Result<T, String>;

fn required<'a>(block: &'a Block, index: usize, name: &str) -> Decoded<&'a str> {
    block.field(index).ok_or_else(|| format!("missing {name}"))
}

fn number<T: FromStr>(text: &str, name: &str) -> Decoded<T> {
    text.parse()
        .map_err(|_| format!("{name} is not a number: {text}"))
}

fn kind(text: &str) -> Decoded<GroupKind> {
    GroupKind::from_code(text).ok_or_else(|| format!("invalid group kind: {text}"))
}

fn date(text: &str, name: &str) -> Decoded<NaiveDate> {
    parse_date(text).ok_or_else(|| format!("invalid {name}: {text}"))
}

/// Formats a real with at least one decimal (`2.0`, `7.25`).
pub fn format_real(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

// Classrooms

pub fn decode_classroom(block: &Block) -> Decoded<Classroom> {
    Ok(Classroom::new(
        required(block, 0, "id")?,
        kind(required(block, 1, "kind")?)?,
        number(required(block, 2, "capacity")?, "capacity")?,
    ))
}

pub fn encode_classroom(c: &Classroom) -> Vec<String> {
    vec![c.id.clone(), c.kind.to_string(), c.capacity.to_string()]
}

// Subjects

fn decode_group(text: &str, group_kind: GroupKind) -> Decoded<Group> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    match parts.as_slice() {
        [id, day, start, room] => Ok(Group::new(
            number(id, "group id")?,
            group_kind,
            Weekday::from_code(day).ok_or_else(|| format!("invalid weekday: {day}"))?,
            number(start, "start hour")?,
            *room,
        )),
        _ => Err(format!("malformed group: {text}")),
    }
}

fn encode_group(g: &Group) -> String {
    format!("{} {} {} {}", g.id, g.day, g.start_hour, g.classroom)
}

pub fn decode_subject(block: &Block) -> Decoded<Subject> {
    let mut subject = Subject::new(required(block, 0, "code")?, required(block, 1, "name")?)
        .with_year(
            number(required(block, 2, "year")?, "year")?,
            number(required(block, 3, "term")?, "term")?,
        )
        .with_coordinator(block.field(4).unwrap_or_default())
        .with_lengths(
            number(required(block, 6, "length A")?, "length A")?,
            number(required(block, 7, "length B")?, "length B")?,
        );
    for code in split_list(block.field(5)) {
        subject = subject.with_prerequisite(code);
    }
    for (index, group_kind) in [(8, GroupKind::A), (9, GroupKind::B)] {
        for text in split_list(block.field(index)) {
            subject = subject.with_group(decode_group(text, group_kind)?);
        }
    }
    Ok(subject)
}

pub fn encode_subject(s: &Subject) -> Vec<String> {
    vec![
        s.code.clone(),
        s.name.clone(),
        s.year.to_string(),
        s.term.to_string(),
        s.coordinator.clone(),
        s.prerequisites.join(";"),
        s.length_a.to_string(),
        s.length_b.to_string(),
        join_list(s.groups_a.iter().map(encode_group)),
        join_list(s.groups_b.iter().map(encode_group)),
    ]
}

// Quotas

pub fn decode_quota(block: &Block) -> Decoded<Quota> {
    Ok(Quota::new(
        required(block, 0, "teacher")?,
        required(block, 1, "subject")?,
        kind(required(block, 2, "kind")?)?,
        number(required(block, 3, "max")?, "max")?,
    ))
}

pub fn encode_quota(q: &Quota) -> Vec<String> {
    vec![
        q.key.teacher.clone(),
        q.key.subject.clone(),
        q.key.kind.to_string(),
        format_real(q.max_groups),
    ]
}

// Teachers

/// `CODE A 1`, or the older `CODE A1`.
fn decode_section(text: &str) -> Decoded<Section> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    match parts.as_slice() {
        [code, k, id] => Ok(Section::new(*code, kind(k)?, number(id, "group id")?)),
        [code, joined] if joined.len() > 1 && joined.is_char_boundary(1) => {
            let (k, id) = joined.split_at(1);
            Ok(Section::new(*code, kind(k)?, number(id, "group id")?))
        }
        _ => Err(format!("malformed section: {text}")),
    }
}

pub fn decode_teacher(block: &Block) -> Decoded<Teacher> {
    let mut teacher = Teacher::new(
        required(block, 0, "id")?,
        required(block, 1, "name")?,
        date(required(block, 2, "birth date")?, "birth date")?,
        Category::from_name(block.field(3).unwrap_or_default()),
        block.field(4).unwrap_or_default(),
    );
    for text in split_list(block.field(5)) {
        teacher = teacher.with_section(decode_section(text)?);
    }
    Ok(teacher)
}

pub fn encode_teacher(t: &Teacher) -> Vec<String> {
    vec![
        t.id.clone(),
        t.name.clone(),
        format_date(t.birth_date),
        t.category.name().to_string(),
        t.department.clone(),
        join_list(
            t.sections
                .iter()
                .map(|s| format!("{} {} {}", s.subject, s.kind, s.group)),
        ),
    ]
}

// Students

fn decode_passed(text: &str) -> Decoded<PassedSubject> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    match parts.as_slice() {
        [code, year, grade] => Ok(PassedSubject {
            subject: code.to_string(),
            academic_year: year.to_string(),
            grade: number(grade, "grade")?,
        }),
        _ => Err(format!("malformed passed subject: {text}")),
    }
}

/// Folds one enrollment entry into the list: `CODE` or `CODE A 1`.
/// Entries for a subject already listed are merged into it.
fn merge_enrollment(enrollments: &mut Vec<Enrollment>, text: &str) -> Decoded<()> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let (code, seat) = match parts.as_slice() {
        [code] => (*code, None),
        [code, k, id] => (*code, Some((kind(k)?, number(id, "group id")?))),
        _ => return Err(format!("malformed enrollment: {text}")),
    };
    let index = match enrollments.iter().position(|e| e.subject == code) {
        Some(i) => i,
        None => {
            enrollments.push(Enrollment::unassigned(code));
            enrollments.len() - 1
        }
    };
    if let Some((k, id)) = seat {
        enrollments[index].seat(k, id);
    }
    Ok(())
}

fn encode_enrollment(e: &Enrollment) -> Vec<String> {
    if e.is_unassigned() {
        return vec![e.subject.clone()];
    }
    e.seats()
        .map(|(k, id)| format!("{} {} {}", e.subject, k, id))
        .collect()
}

pub fn decode_student(block: &Block) -> Decoded<Student> {
    let birth = date(required(block, 3, "birth date")?, "birth date")?;
    let admission = date(required(block, 4, "admission date")?, "admission date")?;
    let mut student = Student::new(
        required(block, 0, "id")?,
        required(block, 1, "name")?,
        birth,
        admission,
    );
    student.email = block.field(2).map(str::to_string);
    for text in split_list(block.field(5)) {
        student.passed.push(decode_passed(text)?);
    }
    for text in split_list(block.field(6)) {
        merge_enrollment(&mut student.enrollments, text)?;
    }
    Ok(student)
}

pub fn encode_student(s: &Student) -> Vec<String> {
    vec![
        s.id.clone(),
        s.name.clone(),
        s.email.clone().unwrap_or_default(),
        format_date(s.birth_date),
        format_date(s.admission_date),
        join_list(s.passed.iter().map(|p| {
            format!("{} {} {}", p.subject, p.academic_year, format_real(p.grade))
        })),
        join_list(s.enrollments.iter().flat_map(encode_enrollment)),
    ]
}

// Calendar

/// Line 1: academic-year label; line 2: starting week.
pub fn decode_calendar(text: &str) -> Decoded<AcademicCalendar> {
    let mut lines = text.lines().map(str::trim);
    let year = lines
        .next()
        .filter(|l| !l.is_empty())
        .ok_or("missing academic year")?;
    let week = lines.next().ok_or("missing start week")?;
    Ok(AcademicCalendar::new(year, number(week, "start week")?))
}

pub fn encode_calendar(c: &AcademicCalendar) -> String {
    format!("{}\n{}\n", c.year, c.start_week)
}
