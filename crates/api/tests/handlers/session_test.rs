use axum::http::StatusCode;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slotsync_core::{errors::BookingError, models::session::SessionStatus};

use crate::common::{TestContext, booked_slot, session};

fn booking_body(time_zone: &str, times: &[&str]) -> Value {
    json!({
        "status": "PENDING",
        "timeZone": time_zone,
        "slots": times
            .iter()
            .map(|time| json!({"time": time, "status": "PENDING"}))
            .collect::<Vec<_>>()
    })
}

#[tokio::test]
async fn test_book_session() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_create_session()
        .with(eq(SessionStatus::Pending), eq("UTC".to_string()))
        .times(1)
        .returning(|_, _| Ok(session(4)));
    ctx.store
        .expect_create_slots_for_session()
        .withf(|session_id, slots| *session_id == 4 && slots.len() == 1)
        .times(1)
        .returning(|session_id, _| Ok(vec![booked_slot(session_id, 9)]));
    ctx.store.expect_delete_session().never();
    let server = ctx.into_server();

    let response = server
        .post("/api/sessions")
        .json(&booking_body("UTC", &["2023-01-02T09:00:00Z"]))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["session"]["id"], 4);
    assert_eq!(body["session"]["slots"][0]["time"], "2023-01-02T09:00:00Z");
}

#[tokio::test]
async fn test_book_with_invalid_zone_writes_nothing() {
    let mut ctx = TestContext::new();
    ctx.store.expect_create_session().never();
    let server = ctx.into_server();

    let response = server
        .post("/api/sessions")
        .json(&booking_body("Atlantis/Central", &["2023-01-02T09:00:00Z"]))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_book_without_slots_is_rejected() {
    let mut ctx = TestContext::new();
    ctx.store.expect_create_session().never();
    let server = ctx.into_server();

    let response = server
        .post("/api/sessions")
        .json(&booking_body("UTC", &[]))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_book_already_booked_slot_is_conflict() {
    let mut ctx = TestContext::new();
    ctx.store.expect_create_session().returning(|_, _| Ok(session(6)));
    ctx.store.expect_create_slots_for_session().returning(|_, _| {
        Err(BookingError::Conflict(
            "One of the requested slots is already booked: 2023-01-02T09:00:00+00:00".to_string(),
        ))
    });
    ctx.store
        .expect_delete_session()
        .with(eq(6))
        .times(1)
        .returning(|_| Ok(()));
    let server = ctx.into_server();

    let response = server
        .post("/api/sessions")
        .json(&booking_body("UTC", &["2023-01-02T09:00:00Z"]))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_sessions() {
    let mut ctx = TestContext::new();
    ctx.store.expect_list_sessions().returning(|| {
        let mut newest = session(2);
        newest.slots = vec![booked_slot(2, 9)];
        Ok(vec![newest, session(1)])
    });
    let server = ctx.into_server();

    let sessions: Vec<Value> = server.get("/api/sessions").await.json();

    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0]["id"], 2);
    assert_eq!(sessions[0]["slots"].as_array().unwrap().len(), 1);
    assert_eq!(sessions[1]["slots"], json!([]));
}
