use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Name of the constraint that keeps a slot instant from being booked twice.
pub const UNIQUE_SLOT_TIME: &str = "session_slots_slot_time_key";

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create schedules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            time_zone VARCHAR(64) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedule_rules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_rules (
            id BIGSERIAL PRIMARY KEY,
            schedule_id BIGINT NOT NULL REFERENCES schedules(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            rule_type VARCHAR(16) NOT NULL,
            day VARCHAR(32) NULL,
            week_day VARCHAR(16) NULL,
            intervals JSONB NOT NULL DEFAULT '[]'::jsonb,
            CONSTRAINT valid_rule_type CHECK (rule_type IN ('DATE', 'WEEK_DAY'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create sessions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id BIGSERIAL PRIMARY KEY,
            status VARCHAR(16) NOT NULL,
            time_zone VARCHAR(64) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create session_slots table
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS session_slots (
            id BIGSERIAL PRIMARY KEY,
            session_id BIGINT NOT NULL REFERENCES sessions(id) ON DELETE CASCADE,
            slot_time TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(16) NOT NULL,
            CONSTRAINT {} UNIQUE (slot_time)
        );
        "#,
        UNIQUE_SLOT_TIME
    ))
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_schedule_rules_schedule_id ON schedule_rules(schedule_id)",
        "CREATE INDEX IF NOT EXISTS idx_schedules_created_at ON schedules(created_at)",
        "CREATE INDEX IF NOT EXISTS idx_session_slots_session_id ON session_slots(session_id)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
