use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::BookingResult;
use crate::models::schedule::{Schedule, ScheduleRule};
use crate::models::session::{NewSessionSlot, Session, SessionSlot, SessionStatus};

/// Persistence boundary for schedules, sessions and booked slots.
///
/// Implementations must guarantee that a slot instant is booked at most once
/// and report a second booking as `BookingError::Conflict`. Every other
/// persistence failure is `BookingError::Store`.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn find_schedule_by_id(&self, id: i64) -> BookingResult<Option<Schedule>>;

    async fn find_slot_by_instant(&self, instant: DateTime<Utc>)
    -> BookingResult<Option<SessionSlot>>;

    async fn create_session(
        &self,
        status: SessionStatus,
        time_zone: String,
    ) -> BookingResult<Session>;

    async fn create_slots_for_session(
        &self,
        session_id: i64,
        slots: Vec<NewSessionSlot>,
    ) -> BookingResult<Vec<SessionSlot>>;

    /// Removes a session and its slots.
    async fn delete_session(&self, session_id: i64) -> BookingResult<()>;

    async fn create_schedule(
        &self,
        name: String,
        time_zone: String,
        rules: Vec<ScheduleRule>,
    ) -> BookingResult<Schedule>;

    /// Newest first.
    async fn list_schedules(&self) -> BookingResult<Vec<Schedule>>;

    /// Highest id first, each with its slots.
    async fn list_sessions(&self) -> BookingResult<Vec<Session>>;
}
