//! # Booking Flow
//!
//! Books a session for a client: one `Session` row plus one slot per
//! requested instant. Validation happens before anything is written, and a
//! session whose slots could not be stored is removed again so the store never
//! keeps a session without slots.

use std::collections::HashSet;

use tracing::{debug, error, warn};

use crate::errors::{BookingError, BookingResult};
use crate::models::session::{BookSessionRequest, BookSessionResponse, NewSessionSlot, Session};
use crate::store::BookingStore;
use crate::timezone;

/// Books a session with its slots.
///
/// # Errors
///
/// * `BookingError::Validation` - Invalid zone, no slots, or an instant
///   requested twice; nothing has been written
/// * `BookingError::Conflict` - One of the instants is already booked; the
///   new session has been removed
/// * `BookingError::Store` - Persistence failure
pub async fn book<S>(store: &S, request: BookSessionRequest) -> BookingResult<BookSessionResponse>
where
    S: BookingStore + ?Sized,
{
    timezone::parse_zone(&request.time_zone)?;
    ensure_bookable(&request.slots)?;

    let session = store
        .create_session(request.status, request.time_zone)
        .await?;
    debug!("Created session: id={}, slots={}", session.id, request.slots.len());

    let slots = match store
        .create_slots_for_session(session.id, request.slots)
        .await
    {
        Ok(slots) => slots,
        Err(err) => {
            warn!("Slot creation failed for session {}, removing it: {}", session.id, err);
            if let Err(cleanup) = store.delete_session(session.id).await {
                error!("Failed to remove session {} after slot failure: {}", session.id, cleanup);
            }
            return Err(err);
        }
    };

    Ok(BookSessionResponse {
        session: Session { slots, ..session },
    })
}

/// All sessions, highest id first.
pub async fn list_sessions<S>(store: &S) -> BookingResult<Vec<Session>>
where
    S: BookingStore + ?Sized,
{
    store.list_sessions().await
}

fn ensure_bookable(slots: &[NewSessionSlot]) -> BookingResult<()> {
    if slots.is_empty() {
        return Err(BookingError::Validation(
            "At least one slot must be provided".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(slots.len());
    for slot in slots {
        if !seen.insert(slot.time) {
            return Err(BookingError::Validation(format!(
                "Slot {} is requested more than once",
                slot.time.to_rfc3339()
            )));
        }
    }

    Ok(())
}
