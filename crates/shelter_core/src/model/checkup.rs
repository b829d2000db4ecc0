//! Checkup domain model.
//!
//! # Responsibility
//! - Define the checkup sub-record owned by a parent animal.
//! - Validate calendar dates kept as `YYYY-MM-DD` text.
//!
//! # Invariants
//! - A checkup exists only inside one animal's checkup list; it has no
//!   independent lifecycle.
//! - `vet_name` mirrors the referenced vet's name at write time.
//! - `date` is a real calendar date in `YYYY-MM-DD` form.

use crate::model::reference::VetId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a checkup entry.
pub type CheckupId = Uuid;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid date regex"));

/// One checkup entry in an animal's medical history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkup {
    /// Stable ID, unique within the whole store.
    pub uuid: CheckupId,
    /// Stable ID of the vet who performed the checkup.
    pub vet_uuid: VetId,
    /// Vet name as of the last write to this checkup.
    pub vet_name: String,
    /// Diagnosis, free text.
    pub diagnosis: String,
    /// Treatment, free text.
    pub treatment: String,
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
}

/// Validation failure for a checkup write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckupValidationError {
    /// Date text does not match `YYYY-MM-DD`.
    InvalidDateFormat(String),
    /// Date text matched the shape but is not a real calendar date.
    DateOutOfRange(String),
}

impl Display for CheckupValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateFormat(value) => {
                write!(f, "checkup date `{value}` is not in YYYY-MM-DD form")
            }
            Self::DateOutOfRange(value) => {
                write!(f, "checkup date `{value}` is not a valid calendar date")
            }
        }
    }
}

impl Error for CheckupValidationError {}

impl Checkup {
    /// Creates a checkup entry with a generated stable ID.
    ///
    /// This constructor does not validate; call [`Checkup::validate`] before
    /// persisting.
    pub fn new(
        vet_uuid: VetId,
        vet_name: impl Into<String>,
        diagnosis: impl Into<String>,
        treatment: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            vet_uuid,
            vet_name: vet_name.into(),
            diagnosis: diagnosis.into(),
            treatment: treatment.into(),
            date: date.into(),
        }
    }

    /// Checks the calendar-date rule.
    pub fn validate(&self) -> Result<(), CheckupValidationError> {
        validate_checkup_date(&self.date)
    }
}

/// Validates `YYYY-MM-DD` date text, including day-in-month and leap years.
pub fn validate_checkup_date(value: &str) -> Result<(), CheckupValidationError> {
    let captures = DATE_RE
        .captures(value)
        .ok_or_else(|| CheckupValidationError::InvalidDateFormat(value.to_string()))?;

    // The regex guarantees digit-only groups within u32 range.
    let year: u32 = captures[1].parse().expect("year digits");
    let month: u32 = captures[2].parse().expect("month digits");
    let day: u32 = captures[3].parse().expect("day digits");

    if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
        return Err(CheckupValidationError::DateOutOfRange(value.to_string()));
    }

    Ok(())
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::{validate_checkup_date, CheckupValidationError};

    #[test]
    fn accepts_plain_calendar_date() {
        assert!(validate_checkup_date("2020-06-01").is_ok());
    }

    #[test]
    fn accepts_leap_day_only_in_leap_years() {
        assert!(validate_checkup_date("2020-02-29").is_ok());
        assert!(matches!(
            validate_checkup_date("2021-02-29"),
            Err(CheckupValidationError::DateOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_malformed_text() {
        for value in ["01-06-2020", "2020/06/01", "2020-6-1", "yesterday", ""] {
            assert!(matches!(
                validate_checkup_date(value),
                Err(CheckupValidationError::InvalidDateFormat(_))
            ));
        }
    }

    #[test]
    fn rejects_impossible_components() {
        for value in ["2020-13-01", "2020-00-10", "2020-04-31", "2020-01-00"] {
            assert!(matches!(
                validate_checkup_date(value),
                Err(CheckupValidationError::DateOutOfRange(_))
            ));
        }
    }
}
