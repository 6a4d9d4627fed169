use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::warn;

use crate::models::{AvailabilityRecord, ComputedSlot};

/// Upstream stores "00:00:00" when a start time was never set.
pub const UNSET_TIME_SENTINEL: &str = "00:00:00";

/// Partition a record's working window into consecutive fixed-duration
/// bookable slots for `date`, ascending by start time.
///
/// Inactive, blocked and sentinel records produce nothing, as do records
/// whose times fail to parse or run backwards; the trailing partial
/// remainder of the window is discarded rather than emitted short. Every
/// emitted slot is bookable (`is_available: true`) since exclusion has
/// already happened here. Deterministic and idempotent.
pub fn expand(record: &AvailabilityRecord, date: NaiveDate, slot_minutes: i64) -> Vec<ComputedSlot> {
    if !record.is_active || record.is_blocked {
        return Vec::new();
    }
    if record.start_time.trim() == UNSET_TIME_SENTINEL {
        return Vec::new();
    }

    let (Some(start), Some(end)) = (
        parse_time(&record.start_time),
        parse_time(&record.end_time),
    ) else {
        warn!(
            "Availability record {} has unparsable working window '{}'-'{}', skipping",
            record.id, record.start_time, record.end_time
        );
        return Vec::new();
    };

    if start >= end || slot_minutes <= 0 {
        return Vec::new();
    }

    // try_minutes bounds the duration; values too large to represent
    // cannot produce a slot that fits a working day anyway.
    let Some(step) = Duration::try_minutes(slot_minutes) else {
        return Vec::new();
    };
    let mut slots = Vec::new();
    let mut cursor = start;

    loop {
        let (slot_end, wrapped) = cursor.overflowing_add_signed(step);
        if wrapped != 0 || slot_end > end {
            break;
        }

        slots.push(ComputedSlot {
            slot_start: cursor,
            slot_end,
            date,
            source_record_id: record.id,
            is_available: true,
        });
        cursor = slot_end;
    }

    slots
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}
