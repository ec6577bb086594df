#![forbid(unsafe_code)]

//! A single colleague record and its validation rules
//!
//! A `Colleague` can only be obtained through [`Colleague::new`], which trims
//! and validates every field. Records read back from disk go through the same
//! constructor.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use thiserror::Error;

/// Maximum length of a colleague name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a city, in characters
pub const MAX_CITY_LEN: usize = 100;

/// Maximum length of a time zone identifier, in characters
pub const MAX_TIMEZONE_LEN: usize = 64;

/// Reasons a colleague record is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColleagueError {
    #[error("missing name")]
    MissingName,

    #[error("missing city")]
    MissingCity,

    #[error("missing timezone")]
    MissingTimezone,

    #[error("name is too long ({len} characters, max {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("city is too long ({len} characters, max {max})")]
    CityTooLong { len: usize, max: usize },

    #[error("timezone is too long ({len} characters, max {max})")]
    TimezoneTooLong { len: usize, max: usize },

    /// The identifier is not in the IANA time zone database
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// A colleague: who they are, where they are, and which clock they live by
///
/// The JSON field names (`name`, `city`, `timezone`) are the on-disk format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Colleague {
    name: String,
    city: String,
    timezone: String,
}

impl Colleague {
    /// Creates a validated colleague from raw user input
    ///
    /// Leading and trailing whitespace is stripped from every field before
    /// validation, and the trimmed values are what get stored.
    ///
    /// # Errors
    ///
    /// Fields are checked in the order name, city, timezone; the first
    /// failing check is returned.
    pub fn new(name: &str, city: &str, timezone: &str) -> Result<Self, ColleagueError> {
        let colleague = Colleague {
            name: name.trim().to_string(),
            city: city.trim().to_string(),
            timezone: timezone.trim().to_string(),
        };
        colleague.validate()?;
        Ok(colleague)
    }

    /// Re-runs the construction checks against this record
    pub fn validate(&self) -> Result<(), ColleagueError> {
        let name = self.name.trim();
        let city = self.city.trim();
        let timezone = self.timezone.trim();

        if name.is_empty() {
            return Err(ColleagueError::MissingName);
        }
        if city.is_empty() {
            return Err(ColleagueError::MissingCity);
        }
        if timezone.is_empty() {
            return Err(ColleagueError::MissingTimezone);
        }

        check_len(name, MAX_NAME_LEN)
            .map_err(|(len, max)| ColleagueError::NameTooLong { len, max })?;
        check_len(city, MAX_CITY_LEN)
            .map_err(|(len, max)| ColleagueError::CityTooLong { len, max })?;
        check_len(timezone, MAX_TIMEZONE_LEN)
            .map_err(|(len, max)| ColleagueError::TimezoneTooLong { len, max })?;

        if timezone.parse::<Tz>().is_err() {
            return Err(ColleagueError::InvalidTimezone(timezone.to_string()));
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Resolves the stored identifier against the time zone database
    pub fn tz(&self) -> Option<Tz> {
        self.timezone.trim().parse::<Tz>().ok()
    }

    /// The colleague's wall-clock time at the given instant
    ///
    /// Returns `None` if the time zone no longer resolves.
    pub fn local_time(&self, now: DateTime<Utc>) -> Option<DateTime<Tz>> {
        self.tz().map(|tz| now.with_timezone(&tz))
    }

    /// Case-insensitive comparison against the trimmed name
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.trim().to_lowercase() == query.trim().to_lowercase()
    }
}

fn check_len(value: &str, max: usize) -> Result<(), (usize, usize)> {
    let len = value.chars().count();
    if len > max { Err((len, max)) } else { Ok(()) }
}
