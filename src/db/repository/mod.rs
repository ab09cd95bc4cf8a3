//! Repository layer: entity-scoped database operations.
//!
//! Each repository borrows a connection owned by the caller. Every
//! operation is a single statement; nothing is cached between calls.

mod appointment;
mod patient;

use chrono::{NaiveDate, NaiveDateTime};

use super::DatabaseError;

pub use appointment::*;
pub use patient::*;

/// Storage format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Storage format for date-times; SQLite's `date()` reads its prefix.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Operations shared by every entity repository.
///
/// `N` is the unsaved form handed to `create`, `T` the stored row.
pub trait Repository<T, N> {
    fn create(&self, new: &N) -> Result<i64, DatabaseError>;
    fn get_by_id(&self, id: i64) -> Result<Option<T>, DatabaseError>;
    fn update(&self, entity: &T) -> Result<bool, DatabaseError>;
}

pub(crate) fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn format_date_time(at: &NaiveDateTime) -> String {
    at.format(DATE_TIME_FORMAT).to_string()
}

pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DatabaseError::InvalidTimestamp {
        field: field.into(),
        value: value.into(),
    })
}

pub(crate) fn parse_date_time(field: &str, value: &str) -> Result<NaiveDateTime, DatabaseError> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).map_err(|_| {
        DatabaseError::InvalidTimestamp {
            field: field.into(),
            value: value.into(),
        }
    })
}

/// Reject blank required text before it reaches the store.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), DatabaseError> {
    if value.trim().is_empty() {
        return Err(DatabaseError::ConstraintViolation(format!("{field} must not be empty")));
    }
    Ok(())
}
