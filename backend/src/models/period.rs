use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// A calendar month, the grouping period of the KPI views.
///
/// The textual form is `YYYY-MM`, e.g. `2024-03`. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month, rejecting month numbers outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, EngineError> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::invalid_period(
                &format!("{:04}-{:02}", year, month),
                "month out of range",
            ));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whether `date` falls in this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for Month {
    type Err = EngineError;

    /// Parse a `YYYY-MM` label. Anything else, including `YYYY-M` and
    /// `YYYY/MM`, is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (year_part, month_part) = trimmed
            .split_once('-')
            .ok_or_else(|| EngineError::invalid_period(s, "missing '-' separator"))?;

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if year_part.len() != 4 || !all_digits(year_part) {
            return Err(EngineError::invalid_period(s, "year must be four digits"));
        }
        if month_part.len() != 2 || !all_digits(month_part) {
            return Err(EngineError::invalid_period(s, "month must be two digits"));
        }

        let year: i32 = year_part
            .parse()
            .map_err(|_| EngineError::invalid_period(s, "year is not a number"))?;
        let month: u32 = month_part
            .parse()
            .map_err(|_| EngineError::invalid_period(s, "month is not a number"))?;

        if !(1..=12).contains(&month) {
            return Err(EngineError::invalid_period(s, "month out of range"));
        }
        Ok(Self { year, month })
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for Month {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}
