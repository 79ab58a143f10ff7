#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use slotsync_api::{ApiState, build_router};
use slotsync_core::models::{
    schedule::{Interval, Schedule, ScheduleRule, WeekDay},
    session::{Session, SessionSlot, SessionStatus, SlotStatus},
};
use slotsync_db::MockBookingStore;

pub struct TestContext {
    pub store: MockBookingStore,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            store: MockBookingStore::new(),
        }
    }

    // Hands the configured mock to a router; expectations are checked on drop
    pub fn into_server(self) -> TestServer {
        let state = Arc::new(ApiState::new(Arc::new(self.store)));
        TestServer::new(build_router(state)).expect("Failed to start test server")
    }
}

pub fn schedule(id: i64, time_zone: &str) -> Schedule {
    Schedule {
        id,
        name: "Dr. Smith".to_string(),
        time_zone: time_zone.to_string(),
        rules: vec![ScheduleRule::on_week_day(
            WeekDay::Monday,
            vec![Interval::new("09", "11")],
        )],
        created_at: Utc.with_ymd_and_hms(2022, 12, 1, 8, 0, 0).unwrap(),
    }
}

pub fn session(id: i64) -> Session {
    Session {
        id,
        status: SessionStatus::Pending,
        time_zone: "UTC".to_string(),
        created_at: Utc.with_ymd_and_hms(2022, 12, 20, 8, 0, 0).unwrap(),
        slots: Vec::new(),
    }
}

pub fn booked_slot(session_id: i64, hour: u32) -> SessionSlot {
    SessionSlot {
        id: 100 + i64::from(hour),
        session_id,
        time: Utc.with_ymd_and_hms(2023, 1, 2, hour, 0, 0).unwrap(),
        status: SlotStatus::Pending,
    }
}
