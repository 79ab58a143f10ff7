//! # Interval Expansion
//!
//! Turns a provider's `{startDate, endDate}` bounds into the discrete hours a
//! client can book. Only the hour component before the first `:` is read, so
//! `"09"`, `"09:00"` and `"09:30:00"` all mean hour 9.
//!
//! Expansion never fails. A malformed or inverted interval expands to
//! [`Expansion::Rejected`], which carries the reason and contributes no hours,
//! so one bad interval cannot take down a whole month of availability.

use std::fmt;

use crate::models::schedule::Interval;

const LAST_START_HOUR: u32 = 23;
const LAST_END_HOUR: u32 = 24;

/// Why an interval produced no candidate hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalDefect {
    MalformedStart,
    MalformedEnd,
    /// `end <= start`
    Inverted,
}

impl fmt::Display for IntervalDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalDefect::MalformedStart => write!(f, "start bound is not an hour (0-23)"),
            IntervalDefect::MalformedEnd => write!(f, "end bound is not an hour (0-24)"),
            IntervalDefect::Inverted => write!(f, "end bound is not after start bound"),
        }
    }
}

/// Outcome of expanding one interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Ascending, distinct hours in `[start, end)`.
    Hours(Vec<u32>),
    Rejected(IntervalDefect),
}

impl Expansion {
    pub fn hours(&self) -> &[u32] {
        match self {
            Expansion::Hours(hours) => hours,
            Expansion::Rejected(_) => &[],
        }
    }

    pub fn into_hours(self) -> Vec<u32> {
        match self {
            Expansion::Hours(hours) => hours,
            Expansion::Rejected(_) => Vec::new(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Expansion::Rejected(_))
    }
}

pub fn expand(interval: &Interval) -> Expansion {
    expand_bounds(&interval.start_date, &interval.end_date)
}

pub fn expand_bounds(start: &str, end: &str) -> Expansion {
    let Some(start) = parse_hour(start, LAST_START_HOUR) else {
        return Expansion::Rejected(IntervalDefect::MalformedStart);
    };
    let Some(end) = parse_hour(end, LAST_END_HOUR) else {
        return Expansion::Rejected(IntervalDefect::MalformedEnd);
    };
    if end <= start {
        return Expansion::Rejected(IntervalDefect::Inverted);
    }

    Expansion::Hours((start..end).collect())
}

fn parse_hour(bound: &str, max: u32) -> Option<u32> {
    let head = bound.split(':').next()?.trim();
    if head.is_empty() || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    head.parse::<u32>().ok().filter(|hour| *hour <= max)
}
