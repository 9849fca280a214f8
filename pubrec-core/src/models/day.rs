//! Calendar day used by the block index

use chrono::{Days, NaiveDate};

use crate::error::{RecordError, Result};

/// Accepted day format: `DD-MM-YYYY`, one-digit day and month allowed.
const DAY_FORMAT: &str = "%d-%m-%Y";

/// A UTC calendar day, covering `[start, end)` in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Day(NaiveDate);

impl Day {
    /// Parse a `DD-MM-YYYY` string.
    ///
    /// Impossible dates (`31-02-2014`, `111-990-2014`) are malformed input.
    pub fn parse(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s, DAY_FORMAT)
            .map(Self)
            .map_err(|e| RecordError::malformed("day", format!("'{}': {}", s, e)))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Unix time of midnight UTC starting this day.
    pub fn start(&self) -> i64 {
        self.0.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
    }

    /// Unix time of midnight UTC starting the next day.
    pub fn end(&self) -> i64 {
        match self.0.checked_add_days(Days::new(1)) {
            Some(next) => Self(next).start(),
            None => i64::MAX,
        }
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}
