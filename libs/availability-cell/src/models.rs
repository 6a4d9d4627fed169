use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A clinic-authored statement of when a dentist is open for booking,
/// as returned by the clinic backend. Time and date fields arrive as raw
/// strings and are parsed fail-closed where they are consumed, because
/// upstream data is known to contain malformed entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub id: Uuid,
    pub dentist_id: String,
    pub clinic_id: String,
    /// Raw day-of-week as stored upstream. The encoding is inconsistent
    /// across datasets (0=Sunday..6 vs 1=Monday..7) and is canonicalized
    /// to 0=Sunday..6=Saturday at ingest; `None` means undecodable.
    #[serde(default)]
    pub day_of_week: Option<i32>,
    /// Local time-of-day, "HH:MM:SS". "00:00:00" is the upstream sentinel
    /// for "not set".
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub is_recurring: bool,
    /// For recurring records the first calendar day in force; for one-time
    /// records the single day the record applies to.
    #[serde(default)]
    pub effective_from: Option<String>,
    /// Last calendar day in force, inclusive. Recurring records only.
    #[serde(default)]
    pub effective_until: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_blocked: bool,
}

fn default_true() -> bool {
    true
}

/// A fixed-duration bookable unit derived from an availability record for a
/// specific calendar date. Never persisted; identity is
/// `source_record_id + slot_start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedSlot {
    pub slot_start: NaiveTime,
    pub slot_end: NaiveTime,
    pub date: NaiveDate,
    pub source_record_id: Uuid,
    pub is_available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Month,
    Week,
    Day,
}

/// Inclusive calendar-day window to query or render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The (dentist, window) pair the store currently holds records for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedWindow {
    pub dentist_id: String,
    pub window: DateWindow,
}

/// Observable store state: what a caller needs to render records, a spinner
/// or an inline error.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub records: Vec<AvailabilityRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub loaded: Option<LoadedWindow>,
}
