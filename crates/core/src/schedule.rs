use tracing::debug;

use crate::errors::{BookingError, BookingResult};
use crate::models::schedule::{CreateScheduleRequest, CreateScheduleResponse, Schedule};
use crate::store::BookingStore;
use crate::timezone;

/// Validates and stores a new schedule.
///
/// The provider zone and every rule anchor are checked before the store is
/// touched; the zone cannot change afterwards.
pub async fn define_schedule<S>(
    store: &S,
    request: CreateScheduleRequest,
) -> BookingResult<CreateScheduleResponse>
where
    S: BookingStore + ?Sized,
{
    if request.name.trim().is_empty() {
        return Err(BookingError::Validation(
            "Schedule name must not be empty".to_string(),
        ));
    }
    timezone::parse_zone(&request.time_zone)?;
    for (index, rule) in request.rules.iter().enumerate() {
        rule.anchor().map_err(|err| match err {
            BookingError::Validation(message) => {
                BookingError::Validation(format!("rules[{}]: {}", index, message))
            }
            other => other,
        })?;
    }

    let schedule = store
        .create_schedule(request.name, request.time_zone, request.rules)
        .await?;
    debug!("Schedule defined: id={}, rules={}", schedule.id, schedule.rules.len());

    Ok(CreateScheduleResponse { schedule })
}

/// All schedules, newest first.
pub async fn list_schedules<S>(store: &S) -> BookingResult<Vec<Schedule>>
where
    S: BookingStore + ?Sized,
{
    store.list_schedules().await
}
