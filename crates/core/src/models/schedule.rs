use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{BookingError, BookingResult};

/// How a rule is anchored on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    Date,
    WeekDay,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Date => "DATE",
            RuleType::WeekDay => "WEEK_DAY",
        }
    }
}

impl FromStr for RuleType {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DATE" => Ok(RuleType::Date),
            "WEEK_DAY" => Ok(RuleType::WeekDay),
            other => Err(BookingError::Validation(format!(
                "Unknown rule type: {}",
                other
            ))),
        }
    }
}

/// Weekdays a recurring rule can be anchored to. Sunday is not bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekDay {
    pub const ALL: [WeekDay; 6] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
    ];

    /// Maps a calendar weekday onto a rule weekday; `None` for Sunday.
    pub fn from_chrono(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(WeekDay::Monday),
            Weekday::Tue => Some(WeekDay::Tuesday),
            Weekday::Wed => Some(WeekDay::Wednesday),
            Weekday::Thu => Some(WeekDay::Thursday),
            Weekday::Fri => Some(WeekDay::Friday),
            Weekday::Sat => Some(WeekDay::Saturday),
            Weekday::Sun => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekDay::Monday => "monday",
            WeekDay::Tuesday => "tuesday",
            WeekDay::Wednesday => "wednesday",
            WeekDay::Thursday => "thursday",
            WeekDay::Friday => "friday",
            WeekDay::Saturday => "saturday",
        }
    }
}

impl FromStr for WeekDay {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeekDay::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| BookingError::Validation(format!("Unknown week day: {}", s)))
    }
}

/// Half-open hour range as written by the provider, e.g. `{"09:00", "17:00"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    #[serde(alias = "startHour")]
    pub start_date: String,
    #[serde(alias = "endHour")]
    pub end_date: String,
}

impl Interval {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_date: start.into(),
            end_date: end.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRule {
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_day: Option<WeekDay>,
    #[serde(default)]
    pub intervals: Vec<Interval>,
}

/// Resolved calendar anchor of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAnchor {
    Date(NaiveDate),
    WeekDay(WeekDay),
}

impl ScheduleRule {
    pub fn on_date(day: impl Into<String>, intervals: Vec<Interval>) -> Self {
        Self {
            rule_type: RuleType::Date,
            day: Some(day.into()),
            week_day: None,
            intervals,
        }
    }

    pub fn on_week_day(week_day: WeekDay, intervals: Vec<Interval>) -> Self {
        Self {
            rule_type: RuleType::WeekDay,
            day: None,
            week_day: Some(week_day),
            intervals,
        }
    }

    /// Checks that exactly the field selected by `type` is populated and
    /// returns the typed anchor.
    pub fn anchor(&self) -> BookingResult<RuleAnchor> {
        match (self.rule_type, self.day.as_deref(), self.week_day) {
            (RuleType::Date, Some(day), None) => parse_rule_day(day).map(RuleAnchor::Date),
            (RuleType::WeekDay, None, Some(week_day)) => Ok(RuleAnchor::WeekDay(week_day)),
            (RuleType::Date, _, _) => Err(BookingError::Validation(
                "DATE rule requires `day` and must not set `weekDay`".to_string(),
            )),
            (RuleType::WeekDay, _, _) => Err(BookingError::Validation(
                "WEEK_DAY rule requires `weekDay` and must not set `day`".to_string(),
            )),
        }
    }
}

fn parse_rule_day(day: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d").map_err(|_| {
        BookingError::Validation(format!("Rule day is not a calendar date (YYYY-MM-DD): {}", day))
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: i64,
    pub name: String,
    pub time_zone: String,
    pub rules: Vec<ScheduleRule>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub name: String,
    pub time_zone: String,
    #[serde(default)]
    pub rules: Vec<ScheduleRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleResponse {
    pub schedule: Schedule,
}
