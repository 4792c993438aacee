use crate::error::CoreError;
use chrono::{Local, NaiveDate};

/// Canonical on-disk and on-wire date layout (`YYYYMMDD`).
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Parse a canonical `YYYYMMDD` date.
///
/// Exactly eight ASCII digits are accepted; anything else, including
/// calendar-invalid dates such as `20230229`, is an `InvalidInput` error.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::invalid(format!(
            "Invalid date '{}': expected YYYYMMDD",
            raw
        )));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| CoreError::invalid(format!("Invalid date '{}': no such calendar day", raw)))
}

/// Render a date in canonical `YYYYMMDD` form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Source of "today".
///
/// Only the calendar day is exposed, so every comparison made with it is a
/// date comparison rather than an instant comparison.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The local calendar day of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a single day, for tests and reproducible runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Serde adapter for `NaiveDate` fields in canonical `YYYYMMDD` form.
pub mod compact {
    use super::{parse_date, DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(serde::de::Error::custom)
    }
}
