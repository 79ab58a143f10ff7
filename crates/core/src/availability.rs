//! # Availability Resolution
//!
//! Resolves a schedule's declarative rules into concrete, bookable hours for
//! one calendar month.
//!
//! ## Algorithm
//!
//! 1. Load the schedule; an unknown id fails before anything else is checked
//! 2. Validate the client zone and the requested month
//! 3. Plan the month: for every provider-local day, collect the rules that
//!    apply to it. A `DATE` rule replaces all weekday rules for its day (the
//!    last one wins if several name the same day); otherwise every matching
//!    `WEEK_DAY` rule contributes
//! 4. Expand each planned day's intervals into hours, convert them to instants
//!    in the provider zone and look each instant up in the booking store
//! 5. Emit one entry per planned day, in date order, with every slot rendered
//!    in the client zone
//!
//! Days that no rule applies to are left out. Any store failure aborts the
//! whole resolution so callers never see a partial month.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use futures::future::try_join_all;
use tracing::{debug, warn};

use crate::calendar::YearMonth;
use crate::errors::{BookingError, BookingResult};
use crate::interval::{self, Expansion};
use crate::models::availability::{DayAvailability, SlotAvailability, SlotState};
use crate::models::schedule::{Interval, RuleAnchor, ScheduleRule, WeekDay};
use crate::store::BookingStore;
use crate::timezone;

/// Rules that apply to a single calendar day.
#[derive(Debug, Default, Clone)]
pub struct DayPlan<'a> {
    date_rule: Option<&'a ScheduleRule>,
    week_day_rules: Vec<&'a ScheduleRule>,
}

impl<'a> DayPlan<'a> {
    pub fn is_empty(&self) -> bool {
        self.date_rule.is_none() && self.week_day_rules.is_empty()
    }

    /// The date override, if one applies.
    pub fn date_rule(&self) -> Option<&'a ScheduleRule> {
        self.date_rule
    }

    /// Rules whose intervals make up the day: the date override alone, or
    /// every matching weekday rule.
    pub fn effective_rules(&self) -> Vec<&'a ScheduleRule> {
        match self.date_rule {
            Some(rule) => vec![rule],
            None => self.week_day_rules.clone(),
        }
    }

    /// Distinct candidate hours in ascending order.
    pub fn candidate_hours(&self) -> Vec<u32> {
        let mut hours = BTreeSet::new();
        for rule in self.effective_rules() {
            for interval in &rule.intervals {
                match interval::expand(interval) {
                    Expansion::Hours(expanded) => hours.extend(expanded),
                    Expansion::Rejected(defect) => log_rejected(interval, defect),
                }
            }
        }
        hours.into_iter().collect()
    }
}

fn log_rejected(interval: &Interval, defect: interval::IntervalDefect) {
    warn!(
        "Skipping interval {}-{}: {}",
        interval.start_date, interval.end_date, defect
    );
}

/// Works out which rules apply to each day of `month`.
///
/// The returned map only holds days with at least one applying rule.
pub fn plan_month(rules: &[ScheduleRule], month: YearMonth) -> BTreeMap<NaiveDate, DayPlan<'_>> {
    let anchored: Vec<(&ScheduleRule, RuleAnchor)> = rules
        .iter()
        .filter_map(|rule| match rule.anchor() {
            Ok(anchor) => Some((rule, anchor)),
            Err(err) => {
                warn!("Skipping unreadable schedule rule: {}", err);
                None
            }
        })
        .collect();

    let mut plans = BTreeMap::new();
    for date in month.days() {
        let week_day = WeekDay::from_chrono(date.weekday());
        let mut plan = DayPlan::default();

        for (rule, anchor) in &anchored {
            match anchor {
                RuleAnchor::Date(day) if *day == date => plan.date_rule = Some(*rule),
                RuleAnchor::WeekDay(day) if Some(*day) == week_day => {
                    plan.week_day_rules.push(*rule)
                }
                _ => {}
            }
        }

        if !plan.is_empty() {
            plans.insert(date, plan);
        }
    }

    plans
}

/// Resolves the bookable hours of a schedule for one month.
///
/// # Arguments
///
/// * `store` - Booking store holding the schedule and existing slots
/// * `schedule_id` - Id of the schedule to resolve
/// * `time_zone` - IANA zone the client wants slots rendered in
/// * `year_month` - Month to resolve, as `YYYY-MM`, taken in the provider's zone
///
/// # Errors
///
/// * `BookingError::NotFound` - No schedule with `schedule_id`
/// * `BookingError::Validation` - Invalid client zone or month
/// * `BookingError::Store` - Any store failure; no partial result is returned
pub async fn resolve_availability<S>(
    store: &S,
    schedule_id: i64,
    time_zone: &str,
    year_month: &str,
) -> BookingResult<Vec<DayAvailability>>
where
    S: BookingStore + ?Sized,
{
    let schedule = store
        .find_schedule_by_id(schedule_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Schedule with ID {} does not exist", schedule_id))
        })?;

    let client_zone = timezone::parse_zone(time_zone)?;
    let month: YearMonth = year_month.parse()?;
    let provider_zone = timezone::parse_zone(&schedule.time_zone)?;

    debug!(
        "Resolving availability: schedule={}, month={}, provider_zone={}, client_zone={}",
        schedule.id, month, provider_zone, client_zone
    );

    let plans = plan_month(&schedule.rules, month);
    let mut days = Vec::with_capacity(plans.len());

    for (date, plan) in plans {
        let instants: Vec<DateTime<Utc>> = plan
            .candidate_hours()
            .into_iter()
            .filter_map(|hour| {
                let instant = timezone::local_to_instant(date, hour, provider_zone);
                if instant.is_none() {
                    debug!("Skipping {} {:02}:00, not a wall-clock time in {}", date, hour, provider_zone);
                }
                instant
            })
            .collect();

        // try_join_all keeps input order and stops at the first store error.
        let states = try_join_all(instants.iter().map(|instant| classify(store, *instant))).await?;

        let intervals = instants
            .into_iter()
            .zip(states)
            .map(|(instant, status)| SlotAvailability {
                status,
                slot: timezone::to_display(instant, client_zone),
            })
            .collect();

        days.push(DayAvailability { date, intervals });
    }

    debug!("Resolved {} days for schedule {}", days.len(), schedule.id);
    Ok(days)
}

async fn classify<S>(store: &S, instant: DateTime<Utc>) -> BookingResult<SlotState>
where
    S: BookingStore + ?Sized,
{
    let booked = store.find_slot_by_instant(instant).await?;
    Ok(match booked {
        Some(_) => SlotState::Unavailable,
        None => SlotState::Available,
    })
}
