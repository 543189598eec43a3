//! Well-formedness checks shared by students and teachers.
//!
//! Detects:
//! - Malformed national ids
//! - Malformed or impossible dates (`d/M/yyyy`, no lenient roll-over)
//! - Birth dates outside the accepted window
//! - Admission ages outside [16, 60]

use chrono::NaiveDate;

use crate::error::{Rejection, RuleResult};

/// Earliest accepted birth date.
pub const MIN_BIRTH_DATE: (i32, u32, u32) = (1960, 1, 1);

/// Latest accepted birth date.
pub const MAX_BIRTH_DATE: (i32, u32, u32) = (2018, 1, 1);

/// Admission age bounds, in whole years.
pub const ADMISSION_AGE: std::ops::RangeInclusive<u32> = 16..=60;

/// Checks a national id: 8 digits followed by one uppercase letter.
pub fn validate_national_id(id: &str) -> RuleResult {
    let chars: Vec<char> = id.chars().collect();
    let well_formed = chars.len() == 9
        && chars[..8].iter().all(|c| c.is_ascii_digit())
        && chars[8].is_uppercase();
    if well_formed {
        Ok(())
    } else {
        Err(Rejection::InvalidId(id.to_string()))
    }
}

/// Parses a `d/M/yyyy` date. Day and month may omit the leading zero;
/// the year must have four digits. Impossible dates (31/4) are rejected.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('/');
    let (d, m, y) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || y.len() != 4 {
        return None;
    }
    let short_numeric =
        |s: &str| !s.is_empty() && s.len() <= 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !short_numeric(d) || !short_numeric(m) || !y.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
}

/// Formats a date as `d/M/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

fn bound((y, m, d): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Validates a birth date and returns it parsed.
///
/// Accepted window: [1960-01-01, 2018-01-01], both ends included.
pub fn validate_birth_date(text: &str) -> RuleResult<NaiveDate> {
    let invalid = || Rejection::InvalidBirthDate(text.to_string());
    let date = parse_date(text).ok_or_else(invalid)?;
    match (bound(MIN_BIRTH_DATE), bound(MAX_BIRTH_DATE)) {
        (Some(min), Some(max)) if (min..=max).contains(&date) => Ok(date),
        _ => Err(invalid()),
    }
}

/// Validates an admission date against a birth date and returns it parsed.
///
/// The student's age at admission, in completed years, must be in [16, 60].
pub fn validate_admission_date(birth: NaiveDate, text: &str) -> RuleResult<NaiveDate> {
    let invalid = || Rejection::InvalidAdmissionDate(text.to_string());
    let admission = parse_date(text).ok_or_else(invalid)?;
    let age = admission.years_since(birth).ok_or_else(invalid)?;
    if ADMISSION_AGE.contains(&age) {
        Ok(admission)
    } else {
        Err(invalid())
    }
}
