use crate::models::{DbSchedule, DbScheduleRule};
use eyre::Result;
use slotsync_core::models::schedule::ScheduleRule;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};

/// Inserts a schedule and its rules in one transaction.
pub async fn create_schedule(
    pool: &Pool<Postgres>,
    name: &str,
    time_zone: &str,
    rules: &[ScheduleRule],
) -> Result<(DbSchedule, Vec<DbScheduleRule>)> {
    tracing::debug!(
        "Creating schedule: name={}, time_zone={}, rules={}",
        name,
        time_zone,
        rules.len()
    );

    let mut tx = pool.begin().await?;

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        INSERT INTO schedules (name, time_zone)
        VALUES ($1, $2)
        RETURNING id, name, time_zone, created_at
        "#,
    )
    .bind(name)
    .bind(time_zone)
    .fetch_one(&mut *tx)
    .await?;

    let mut rule_rows = Vec::with_capacity(rules.len());
    for (position, rule) in rules.iter().enumerate() {
        let row = sqlx::query_as::<_, DbScheduleRule>(
            r#"
            INSERT INTO schedule_rules (schedule_id, position, rule_type, day, week_day, intervals)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, schedule_id, position, rule_type, day, week_day, intervals
            "#,
        )
        .bind(schedule.id)
        .bind(position as i32)
        .bind(rule.rule_type.as_str())
        .bind(rule.day.as_deref())
        .bind(rule.week_day.map(|day| day.as_str()))
        .bind(Json(&rule.intervals))
        .fetch_one(&mut *tx)
        .await?;
        rule_rows.push(row);
    }

    tx.commit().await?;

    tracing::debug!("Schedule created successfully: id={}", schedule.id);
    Ok((schedule, rule_rows))
}

pub async fn get_schedule_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbSchedule>> {
    tracing::debug!("Getting schedule by id: {}", id);

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, name, time_zone, created_at
        FROM schedules
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if schedule.is_none() {
        tracing::debug!("Schedule not found: id={}", id);
    }

    Ok(schedule)
}

pub async fn list_schedules(pool: &Pool<Postgres>) -> Result<Vec<DbSchedule>> {
    let schedules = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, name, time_zone, created_at
        FROM schedules
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

/// Rules of the given schedules, in definition order per schedule.
pub async fn get_rules_by_schedule_ids(
    pool: &Pool<Postgres>,
    schedule_ids: &[i64],
) -> Result<Vec<DbScheduleRule>> {
    if schedule_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rules = sqlx::query_as::<_, DbScheduleRule>(
        r#"
        SELECT id, schedule_id, position, rule_type, day, week_day, intervals
        FROM schedule_rules
        WHERE schedule_id = ANY($1)
        ORDER BY schedule_id, position ASC
        "#,
    )
    .bind(schedule_ids)
    .fetch_all(pool)
    .await?;

    Ok(rules)
}
