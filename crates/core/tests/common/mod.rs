#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotsync_core::{
    errors::{BookingError, BookingResult},
    models::{
        schedule::{Schedule, ScheduleRule},
        session::{NewSessionSlot, Session, SessionSlot, SessionStatus, SlotStatus},
    },
    store::BookingStore,
};

/// In-memory booking store for exercising the engine without Postgres.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    pub slot_lookups: AtomicUsize,
    pub fail_slot_lookups: AtomicBool,
    pub fail_slot_creation: AtomicBool,
}

#[derive(Default)]
struct State {
    next_id: i64,
    schedules: Vec<Schedule>,
    sessions: Vec<Session>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_schedule(&self, time_zone: &str, rules: Vec<ScheduleRule>) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.schedules.push(Schedule {
            id,
            name: format!("schedule-{}", id),
            time_zone: time_zone.to_string(),
            rules,
            created_at: Utc::now(),
        });
        id
    }

    /// Books `instant` under a fresh session, bypassing the booking flow.
    pub fn add_booked_slot(&self, instant: DateTime<Utc>) {
        let mut state = self.state.lock().unwrap();
        let session_id = state.next_id();
        let slot_id = state.next_id();
        state.sessions.push(Session {
            id: session_id,
            status: SessionStatus::Approved,
            time_zone: "UTC".to_string(),
            created_at: Utc::now(),
            slots: vec![SessionSlot {
                id: slot_id,
                session_id,
                time: instant,
                status: SlotStatus::Pending,
            }],
        });
    }

    pub fn session_count(&self) -> usize {
        self.state.lock().unwrap().sessions.len()
    }

    pub fn lookups(&self) -> usize {
        self.slot_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn find_schedule_by_id(&self, id: i64) -> BookingResult<Option<Schedule>> {
        let state = self.state.lock().unwrap();
        Ok(state.schedules.iter().find(|s| s.id == id).cloned())
    }

    async fn find_slot_by_instant(
        &self,
        instant: DateTime<Utc>,
    ) -> BookingResult<Option<SessionSlot>> {
        self.slot_lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_slot_lookups.load(Ordering::SeqCst) {
            return Err(BookingError::Store(eyre::eyre!("connection reset")));
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .sessions
            .iter()
            .flat_map(|s| s.slots.iter())
            .find(|slot| slot.time == instant)
            .cloned())
    }

    async fn create_session(
        &self,
        status: SessionStatus,
        time_zone: String,
    ) -> BookingResult<Session> {
        let mut state = self.state.lock().unwrap();
        let session = Session {
            id: state.next_id(),
            status,
            time_zone,
            created_at: Utc::now(),
            slots: Vec::new(),
        };
        state.sessions.push(session.clone());
        Ok(session)
    }

    async fn create_slots_for_session(
        &self,
        session_id: i64,
        slots: Vec<NewSessionSlot>,
    ) -> BookingResult<Vec<SessionSlot>> {
        if self.fail_slot_creation.load(Ordering::SeqCst) {
            return Err(BookingError::Store(eyre::eyre!("disk full")));
        }
        let mut state = self.state.lock().unwrap();
        for slot in &slots {
            let taken = state
                .sessions
                .iter()
                .flat_map(|s| s.slots.iter())
                .any(|existing| existing.time == slot.time);
            if taken {
                return Err(BookingError::Conflict(format!(
                    "Slot {} is already booked",
                    slot.time.to_rfc3339()
                )));
            }
        }

        let mut created = Vec::with_capacity(slots.len());
        for slot in slots {
            created.push(SessionSlot {
                id: state.next_id(),
                session_id,
                time: slot.time,
                status: slot.status,
            });
        }
        let session = state
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| BookingError::NotFound(format!("Session {}", session_id)))?;
        session.slots.extend(created.iter().cloned());
        Ok(created)
    }

    async fn delete_session(&self, session_id: i64) -> BookingResult<()> {
        let mut state = self.state.lock().unwrap();
        state.sessions.retain(|s| s.id != session_id);
        Ok(())
    }

    async fn create_schedule(
        &self,
        name: String,
        time_zone: String,
        rules: Vec<ScheduleRule>,
    ) -> BookingResult<Schedule> {
        let mut state = self.state.lock().unwrap();
        let schedule = Schedule {
            id: state.next_id(),
            name,
            time_zone,
            rules,
            created_at: Utc::now(),
        };
        state.schedules.push(schedule.clone());
        Ok(schedule)
    }

    async fn list_schedules(&self) -> BookingResult<Vec<Schedule>> {
        let state = self.state.lock().unwrap();
        Ok(state.schedules.iter().rev().cloned().collect())
    }

    async fn list_sessions(&self) -> BookingResult<Vec<Session>> {
        let state = self.state.lock().unwrap();
        let mut sessions = state.sessions.clone();
        sessions.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(sessions)
    }
}
