use chrono::{DateTime, Utc};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use slotsync_core::models::{
    schedule::{Interval, RuleType, Schedule, ScheduleRule, WeekDay},
    session::{Session, SessionSlot, SessionStatus, SlotStatus},
};
use sqlx::FromRow;
use sqlx::types::Json;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: i64,
    pub name: String,
    pub time_zone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleRule {
    pub id: i64,
    pub schedule_id: i64,
    pub position: i32,
    pub rule_type: String,
    pub day: Option<String>,
    pub week_day: Option<String>,
    pub intervals: Json<Vec<Interval>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSession {
    pub id: i64,
    pub status: String,
    pub time_zone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSessionSlot {
    pub id: i64,
    pub session_id: i64,
    pub slot_time: DateTime<Utc>,
    pub status: String,
}

impl DbSchedule {
    pub fn into_schedule(self, rules: Vec<ScheduleRule>) -> Schedule {
        Schedule {
            id: self.id,
            name: self.name,
            time_zone: self.time_zone,
            rules,
            created_at: self.created_at,
        }
    }
}

impl DbScheduleRule {
    pub fn into_rule(self) -> Result<ScheduleRule> {
        let rule_type = self
            .rule_type
            .parse::<RuleType>()
            .wrap_err_with(|| format!("Invalid type on schedule rule {}", self.id))?;
        let week_day = self
            .week_day
            .as_deref()
            .map(str::parse::<WeekDay>)
            .transpose()
            .wrap_err_with(|| format!("Invalid week day on schedule rule {}", self.id))?;

        Ok(ScheduleRule {
            rule_type,
            day: self.day,
            week_day,
            intervals: self.intervals.0,
        })
    }
}

impl DbSession {
    pub fn into_session(self, slots: Vec<SessionSlot>) -> Result<Session> {
        let status = self
            .status
            .parse::<SessionStatus>()
            .wrap_err_with(|| format!("Invalid status on session {}", self.id))?;

        Ok(Session {
            id: self.id,
            status,
            time_zone: self.time_zone,
            created_at: self.created_at,
            slots,
        })
    }
}

impl DbSessionSlot {
    pub fn into_slot(self) -> Result<SessionSlot> {
        let status = self
            .status
            .parse::<SlotStatus>()
            .wrap_err_with(|| format!("Invalid status on session slot {}", self.id))?;

        Ok(SessionSlot {
            id: self.id,
            session_id: self.session_id,
            time: self.slot_time,
            status,
        })
    }
}
