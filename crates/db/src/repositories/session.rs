use crate::models::{DbSession, DbSessionSlot};
use chrono::{DateTime, Utc};
use eyre::Result;
use slotsync_core::models::session::NewSessionSlot;
use sqlx::{Pool, Postgres};

pub async fn create_session(
    pool: &Pool<Postgres>,
    status: &str,
    time_zone: &str,
) -> Result<DbSession> {
    let session = sqlx::query_as::<_, DbSession>(
        r#"
        INSERT INTO sessions (status, time_zone)
        VALUES ($1, $2)
        RETURNING id, status, time_zone, created_at
        "#,
    )
    .bind(status)
    .bind(time_zone)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

pub async fn delete_session(pool: &Pool<Postgres>, id: i64) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn list_sessions(pool: &Pool<Postgres>) -> Result<Vec<DbSession>> {
    let sessions = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT id, status, time_zone, created_at
        FROM sessions
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

/// Inserts all slots of a session atomically.
///
/// A slot instant that is already booked fails the whole insert with a
/// unique violation on `session_slots.slot_time`; the returned report still
/// downcasts to the underlying `sqlx::Error`.
pub async fn create_slots(
    pool: &Pool<Postgres>,
    session_id: i64,
    slots: &[NewSessionSlot],
) -> Result<Vec<DbSessionSlot>> {
    let mut tx = pool.begin().await?;

    let mut rows = Vec::with_capacity(slots.len());
    for slot in slots {
        let row = sqlx::query_as::<_, DbSessionSlot>(
            r#"
            INSERT INTO session_slots (session_id, slot_time, status)
            VALUES ($1, $2, $3)
            RETURNING id, session_id, slot_time, status
            "#,
        )
        .bind(session_id)
        .bind(slot.time)
        .bind(slot.status.as_str())
        .fetch_one(&mut *tx)
        .await?;
        rows.push(row);
    }

    tx.commit().await?;
    Ok(rows)
}

pub async fn find_slot_by_time(
    pool: &Pool<Postgres>,
    slot_time: DateTime<Utc>,
) -> Result<Option<DbSessionSlot>> {
    let slot = sqlx::query_as::<_, DbSessionSlot>(
        r#"
        SELECT id, session_id, slot_time, status
        FROM session_slots
        WHERE slot_time = $1
        "#,
    )
    .bind(slot_time)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn get_slots_by_session_ids(
    pool: &Pool<Postgres>,
    session_ids: &[i64],
) -> Result<Vec<DbSessionSlot>> {
    if session_ids.is_empty() {
        return Ok(Vec::new());
    }

    let slots = sqlx::query_as::<_, DbSessionSlot>(
        r#"
        SELECT id, session_id, slot_time, status
        FROM session_slots
        WHERE session_id = ANY($1)
        ORDER BY session_id, slot_time ASC
        "#,
    )
    .bind(session_ids)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}
