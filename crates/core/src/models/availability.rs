use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub time_zone: String,
    pub year_month: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    Available,
    Unavailable,
}

/// One candidate hour, rendered in the client's zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub status: SlotState,
    #[serde(serialize_with = "serialize_with_offset")]
    pub slot: DateTime<FixedOffset>,
}

// RFC 3339 with a numeric offset, `+00:00` included; chrono would write `Z`.
fn serialize_with_offset<S>(slot: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&slot.to_rfc3339_opts(SecondsFormat::Secs, false))
}

/// Resolved availability for one provider-local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub intervals: Vec<SlotAvailability>,
}
