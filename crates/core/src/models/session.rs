use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Approved,
    Pending,
    Rejected,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Approved => "APPROVED",
            SessionStatus::Pending => "PENDING",
            SessionStatus::Rejected => "REJECTED",
        }
    }
}

impl FromStr for SessionStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPROVED" => Ok(SessionStatus::Approved),
            "PENDING" => Ok(SessionStatus::Pending),
            "REJECTED" => Ok(SessionStatus::Rejected),
            other => Err(BookingError::Validation(format!(
                "Unknown session status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    Pending,
    Completed,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Pending => "PENDING",
            SlotStatus::Completed => "COMPLETED",
        }
    }
}

impl FromStr for SlotStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(SlotStatus::Pending),
            "COMPLETED" => Ok(SlotStatus::Completed),
            other => Err(BookingError::Validation(format!(
                "Unknown slot status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    pub status: SessionStatus,
    pub time_zone: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub slots: Vec<SessionSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSlot {
    pub id: i64,
    pub session_id: i64,
    pub time: DateTime<Utc>,
    pub status: SlotStatus,
}

/// A slot as requested by a client, before it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSessionSlot {
    pub time: DateTime<Utc>,
    pub status: SlotStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSessionRequest {
    pub status: SessionStatus,
    pub time_zone: String,
    pub slots: Vec<NewSessionSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSessionResponse {
    pub session: Session,
}
