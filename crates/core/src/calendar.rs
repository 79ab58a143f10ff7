use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::errors::{BookingError, BookingResult};

/// A calendar month, parsed from `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> BookingResult<Self> {
        // Rejects months chrono cannot represent as well as 0 and 13+.
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or_else(|| invalid(&format!("{}-{}", year, month)))
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(self) -> u32 {
        let first = self.first_day();
        let next = first
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(NaiveDate::MAX);
        (next - first).num_days() as u32
    }

    /// Every calendar day of the month, in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let count = self.days_in_month() as usize;
        self.first_day().iter_days().take(count)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for YearMonth {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (year, month) = trimmed.split_once('-').ok_or_else(|| invalid(s))?;
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || !all_digits(year) || month.len() > 2 || !all_digits(month) {
            return Err(invalid(s));
        }

        let year = year.parse::<i32>().map_err(|_| invalid(s))?;
        let month = month.parse::<u32>().map_err(|_| invalid(s))?;
        YearMonth::new(year, month).map_err(|_| invalid(s))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

fn invalid(value: &str) -> BookingError {
    BookingError::Validation(format!("yearMonth is not valid (expected YYYY-MM): {}", value))
}
