//! PostgreSQL implementation of the core `BookingStore` trait.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use slotsync_core::{
    errors::{BookingError, BookingResult},
    models::{
        schedule::{Schedule, ScheduleRule},
        session::{NewSessionSlot, Session, SessionSlot, SessionStatus},
    },
    store::BookingStore,
};

use crate::models::{DbSchedule, DbScheduleRule, DbSession, DbSessionSlot};
use crate::repositories::{schedule, session};
use crate::schema::UNIQUE_SLOT_TIME;
use crate::DbPool;

const GENERIC_CONFLICT: &str = "One of the requested slots is already booked";

#[derive(Debug, Clone)]
pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // The insert is rolled back, so any hit belongs to another session
    async fn first_booked(&self, slots: &[NewSessionSlot]) -> BookingResult<Option<DateTime<Utc>>> {
        for slot in slots {
            if session::find_slot_by_time(&self.pool, slot.time).await?.is_some() {
                return Ok(Some(slot.time));
            }
        }
        Ok(None)
    }

    /// Names the booked instant when it can be found; a failed lookup still
    /// leaves the caller with a conflict.
    async fn conflict_message(&self, slots: &[NewSessionSlot]) -> String {
        let taken = match self.first_booked(slots).await {
            Ok(taken) => taken,
            Err(err) => {
                warn!("Could not look up the conflicting slot: {}", err);
                None
            }
        };

        match taken {
            Some(time) => format!("Slot {} is already booked", time.to_rfc3339()),
            None => GENERIC_CONFLICT.to_string(),
        }
    }

    async fn attach_rules(&self, schedules: Vec<DbSchedule>) -> BookingResult<Vec<Schedule>> {
        let ids: Vec<i64> = schedules.iter().map(|s| s.id).collect();
        let mut rules = group_rules(schedule::get_rules_by_schedule_ids(&self.pool, &ids).await?)?;

        Ok(schedules
            .into_iter()
            .map(|s| {
                let own = rules.remove(&s.id).unwrap_or_default();
                s.into_schedule(own)
            })
            .collect())
    }
}

fn group_rules(rows: Vec<DbScheduleRule>) -> BookingResult<HashMap<i64, Vec<ScheduleRule>>> {
    let mut grouped: HashMap<i64, Vec<ScheduleRule>> = HashMap::new();
    for row in rows {
        let schedule_id = row.schedule_id;
        grouped.entry(schedule_id).or_default().push(row.into_rule()?);
    }
    Ok(grouped)
}

fn group_slots(rows: Vec<DbSessionSlot>) -> BookingResult<HashMap<i64, Vec<SessionSlot>>> {
    let mut grouped: HashMap<i64, Vec<SessionSlot>> = HashMap::new();
    for row in rows {
        let session_id = row.session_id;
        grouped.entry(session_id).or_default().push(row.into_slot()?);
    }
    Ok(grouped)
}

fn is_slot_conflict(report: &eyre::Report) -> bool {
    match report.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db)) => {
            db.is_unique_violation() && db.constraint().is_none_or(|c| c == UNIQUE_SLOT_TIME)
        }
        _ => false,
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn find_schedule_by_id(&self, id: i64) -> BookingResult<Option<Schedule>> {
        let Some(db_schedule) = schedule::get_schedule_by_id(&self.pool, id).await? else {
            return Ok(None);
        };

        Ok(self.attach_rules(vec![db_schedule]).await?.pop())
    }

    async fn find_slot_by_instant(
        &self,
        instant: DateTime<Utc>,
    ) -> BookingResult<Option<SessionSlot>> {
        let slot = session::find_slot_by_time(&self.pool, instant).await?;
        Ok(slot.map(DbSessionSlot::into_slot).transpose()?)
    }

    async fn create_session(
        &self,
        status: SessionStatus,
        time_zone: String,
    ) -> BookingResult<Session> {
        let db_session = session::create_session(&self.pool, status.as_str(), &time_zone).await?;
        Ok(db_session.into_session(Vec::new())?)
    }

    async fn create_slots_for_session(
        &self,
        session_id: i64,
        slots: Vec<NewSessionSlot>,
    ) -> BookingResult<Vec<SessionSlot>> {
        let rows = match session::create_slots(&self.pool, session_id, &slots).await {
            Ok(rows) => rows,
            Err(report) if is_slot_conflict(&report) => {
                let message = self.conflict_message(&slots).await;
                debug!("Slot conflict for session {}: {}", session_id, message);
                return Err(BookingError::Conflict(message));
            }
            Err(report) => return Err(BookingError::Store(report)),
        };

        rows.into_iter()
            .map(|row| row.into_slot().map_err(BookingError::Store))
            .collect()
    }

    async fn delete_session(&self, session_id: i64) -> BookingResult<()> {
        session::delete_session(&self.pool, session_id).await?;
        Ok(())
    }

    async fn create_schedule(
        &self,
        name: String,
        time_zone: String,
        rules: Vec<ScheduleRule>,
    ) -> BookingResult<Schedule> {
        let (db_schedule, rule_rows) =
            schedule::create_schedule(&self.pool, &name, &time_zone, &rules).await?;
        let rules = rule_rows
            .into_iter()
            .map(DbScheduleRule::into_rule)
            .collect::<eyre::Result<Vec<_>>>()?;

        Ok(db_schedule.into_schedule(rules))
    }

    async fn list_schedules(&self) -> BookingResult<Vec<Schedule>> {
        let schedules = schedule::list_schedules(&self.pool).await?;
        self.attach_rules(schedules).await
    }

    async fn list_sessions(&self) -> BookingResult<Vec<Session>> {
        let sessions: Vec<DbSession> = session::list_sessions(&self.pool).await?;
        let ids: Vec<i64> = sessions.iter().map(|s| s.id).collect();
        let mut slots = group_slots(session::get_slots_by_session_ids(&self.pool, &ids).await?)?;

        sessions
            .into_iter()
            .map(|s| {
                let own = slots.remove(&s.id).unwrap_or_default();
                s.into_session(own).map_err(BookingError::Store)
            })
            .collect()
    }
}
