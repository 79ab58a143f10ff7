use axum::http::StatusCode;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slotsync_core::errors::BookingError;

use crate::common::{TestContext, booked_slot, schedule};

#[tokio::test]
async fn test_get_availability_marks_booked_hours() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_find_schedule_by_id()
        .with(eq(1))
        .returning(|id| Ok(Some(schedule(id, "UTC"))));
    ctx.store.expect_find_slot_by_instant().returning(|instant| {
        let taken = booked_slot(9, 10);
        Ok((instant == taken.time).then_some(taken))
    });
    let server = ctx.into_server();

    let response = server
        .get("/api/schedules/1/availability")
        .add_query_param("timeZone", "UTC")
        .add_query_param("yearMonth", "2023-01")
        .await;

    response.assert_status_ok();
    let days: Vec<Value> = response.json();
    assert_eq!(days.len(), 5);
    assert_eq!(
        days[0],
        json!({
            "date": "2023-01-02",
            "intervals": [
                {"status": "available", "slot": "2023-01-02T09:00:00+00:00"},
                {"status": "unavailable", "slot": "2023-01-02T10:00:00+00:00"}
            ]
        })
    );
}

#[tokio::test]
async fn test_get_availability_renders_in_client_zone() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_find_schedule_by_id()
        .returning(|id| Ok(Some(schedule(id, "UTC"))));
    ctx.store.expect_find_slot_by_instant().returning(|_| Ok(None));
    let server = ctx.into_server();

    let days: Vec<Value> = server
        .get("/api/schedules/1/availability")
        .add_query_param("timeZone", "America/Sao_Paulo")
        .add_query_param("yearMonth", "2023-01")
        .await
        .json();

    assert_eq!(days[0]["date"], "2023-01-02");
    assert_eq!(days[0]["intervals"][0]["slot"], "2023-01-02T06:00:00-03:00");
}

#[tokio::test]
async fn test_unknown_schedule_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.store.expect_find_schedule_by_id().returning(|_| Ok(None));
    ctx.store.expect_find_slot_by_instant().never();
    let server = ctx.into_server();

    let response = server
        .get("/api/schedules/77/availability")
        .add_query_param("timeZone", "UTC")
        .add_query_param("yearMonth", "2023-01")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({
        "error": "Resource not found: Schedule with ID 77 does not exist"
    }));
}

#[tokio::test]
async fn test_invalid_zone_is_bad_request() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_find_schedule_by_id()
        .returning(|id| Ok(Some(schedule(id, "UTC"))));
    ctx.store.expect_find_slot_by_instant().never();
    let server = ctx.into_server();

    let response = server
        .get("/api/schedules/1/availability")
        .add_query_param("timeZone", "Moon/Base")
        .add_query_param("yearMonth", "2023-01")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_find_schedule_by_id()
        .returning(|id| Ok(Some(schedule(id, "UTC"))));
    ctx.store
        .expect_find_slot_by_instant()
        .returning(|_| Err(BookingError::Store(eyre::eyre!("connection reset"))));
    let server = ctx.into_server();

    let response = server
        .get("/api/schedules/1/availability")
        .add_query_param("timeZone", "UTC")
        .add_query_param("yearMonth", "2023-01")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}
