use axum::http::StatusCode;
use mockall::predicate::{always, eq};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slotsync_core::models::schedule::{Interval, Schedule, ScheduleRule, WeekDay};

use crate::common::{TestContext, schedule};

#[tokio::test]
async fn test_create_schedule() {
    let mut ctx = TestContext::new();
    let expected_rules = vec![ScheduleRule::on_week_day(
        WeekDay::Monday,
        vec![Interval::new("09", "11")],
    )];
    ctx.store
        .expect_create_schedule()
        .with(eq("Dr. Smith".to_string()), eq("UTC".to_string()), eq(expected_rules))
        .times(1)
        .returning(|_, _, _| Ok(schedule(5, "UTC")));
    let server = ctx.into_server();

    let response = server
        .post("/api/schedules")
        .json(&json!({
            "name": "Dr. Smith",
            "timeZone": "UTC",
            "rules": [{"type": "WEEK_DAY", "weekDay": "monday", "intervals": [{"startDate": "09", "endDate": "11"}]}]
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["schedule"]["id"], 5);
    assert_eq!(body["schedule"]["timeZone"], "UTC");
}

#[tokio::test]
async fn test_create_schedule_with_unanchored_rule_is_rejected() {
    let mut ctx = TestContext::new();
    ctx.store.expect_create_schedule().never();
    let server = ctx.into_server();

    let response = server
        .post("/api/schedules")
        .json(&json!({
            "name": "Dr. Smith",
            "timeZone": "UTC",
            "rules": [{"type": "DATE", "intervals": []}]
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("rules[0]"));
}

#[tokio::test]
async fn test_create_schedule_with_invalid_zone_is_rejected() {
    let mut ctx = TestContext::new();
    ctx.store.expect_create_schedule().with(always(), always(), always()).never();
    let server = ctx.into_server();

    let response = server
        .post("/api/schedules")
        .json(&json!({"name": "Dr. Smith", "timeZone": "Nowhere", "rules": []}))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_schedules() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_list_schedules()
        .returning(|| Ok(vec![schedule(2, "Europe/Paris"), schedule(1, "UTC")]));
    let server = ctx.into_server();

    let schedules: Vec<Schedule> = server.get("/api/schedules").await.json();

    let ids: Vec<i64> = schedules.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2, 1]);
}
