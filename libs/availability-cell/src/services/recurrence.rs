use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::models::AvailabilityRecord;

/// Which day-of-week convention a dataset uses. Upstream data mixes the two,
/// so the convention is inferred per loaded dataset rather than per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOfWeekEncoding {
    /// 0=Sunday .. 6=Saturday (canonical).
    SundayZero,
    /// ISO-style 1=Monday .. 7=Sunday.
    IsoMonday1,
}

/// Infer the day-of-week convention of a dataset. A record carrying
/// `day_of_week == 7` alongside the absence of any `0` implies the ISO
/// 1..7 convention; everything else is treated as already canonical.
pub fn detect_encoding(records: &[AvailabilityRecord]) -> DayOfWeekEncoding {
    let mut has_seven = false;
    let mut has_zero = false;

    for record in records {
        match record.day_of_week {
            Some(7) => has_seven = true,
            Some(0) => has_zero = true,
            _ => {}
        }
    }

    if has_seven && !has_zero {
        DayOfWeekEncoding::IsoMonday1
    } else {
        DayOfWeekEncoding::SundayZero
    }
}

/// Normalize every record's `day_of_week` to canonical 0=Sunday..6=Saturday.
/// Runs once at the data-loading boundary so the heuristic cannot reach
/// different conclusions on different queries over the same dataset.
/// Undecodable values become `None` and never match any date.
pub fn canonicalize(mut records: Vec<AvailabilityRecord>) -> Vec<AvailabilityRecord> {
    let encoding = detect_encoding(&records);

    for record in &mut records {
        let raw = record.day_of_week;
        record.day_of_week = raw.and_then(|dow| normalize_day(dow, encoding));
        if raw.is_some() && record.day_of_week.is_none() {
            warn!(
                "Availability record {} has undecodable day_of_week {:?}, excluding",
                record.id, raw
            );
        }
    }

    records
}

fn normalize_day(dow: i32, encoding: DayOfWeekEncoding) -> Option<i32> {
    match encoding {
        DayOfWeekEncoding::SundayZero => (0..=6).contains(&dow).then_some(dow),
        DayOfWeekEncoding::IsoMonday1 => match dow {
            7 => Some(0),
            1..=6 => Some(dow),
            _ => None,
        },
    }
}

/// Select the records that apply on `date`. Expects canonicalized records
/// (see [`canonicalize`]). Returns them in no guaranteed order.
pub fn applicable_on<'a>(
    records: &'a [AvailabilityRecord],
    date: NaiveDate,
) -> Vec<&'a AvailabilityRecord> {
    let target_dow = date.weekday().num_days_from_sunday() as i32;

    records
        .iter()
        .filter(|record| applies_on(record, date, target_dow))
        .collect()
}

fn applies_on(record: &AvailabilityRecord, date: NaiveDate, target_dow: i32) -> bool {
    if !record.is_recurring {
        // One-time records apply on exactly their effective_from day.
        return match parse_day(record.effective_from.as_deref()) {
            Some(from) => from == date,
            None => {
                warn!(
                    "One-time availability record {} has unparsable effective_from, excluding",
                    record.id
                );
                false
            }
        };
    }

    if record.day_of_week != Some(target_dow) {
        return false;
    }

    // Boundaries are evaluated at day granularity: effective_from counts
    // from midnight, effective_until through end of day. Malformed or
    // missing boundary dates exclude the record rather than erroring.
    let (Some(from), Some(until)) = (
        parse_day(record.effective_from.as_deref()),
        parse_day(record.effective_until.as_deref()),
    ) else {
        warn!(
            "Recurring availability record {} has unparsable recurrence window, excluding",
            record.id
        );
        return false;
    };

    from <= date && date <= until
}

/// Parse an upstream date string down to calendar-day granularity. Accepts
/// plain dates and timestamped forms; time-of-day components are dropped.
pub(crate) fn parse_day(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }

    None
}
