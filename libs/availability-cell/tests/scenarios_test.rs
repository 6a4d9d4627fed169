// End-to-end resolver + expander scenarios over a single recurring record.

use chrono::NaiveDate;
use uuid::Uuid;

use availability_cell::models::AvailabilityRecord;
use availability_cell::services::recurrence::{applicable_on, canonicalize};
use availability_cell::services::slots::expand;

fn tuesday_morning_record(effective_until: &str) -> AvailabilityRecord {
    AvailabilityRecord {
        id: Uuid::new_v4(),
        dentist_id: "D1".to_string(),
        clinic_id: "C1".to_string(),
        day_of_week: Some(2), // Tuesday, 0=Sunday convention
        start_time: "09:00:00".to_string(),
        end_time: "09:30:00".to_string(),
        is_recurring: true,
        effective_from: Some("2025-06-01".to_string()),
        effective_until: Some(effective_until.to_string()),
        is_active: true,
        is_blocked: false,
    }
}

#[test]
fn recurring_tuesday_record_yields_one_slot_on_a_tuesday() {
    // 2025-06-10 is a Tuesday.
    let target = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
    let records = canonicalize(vec![tuesday_morning_record("2025-06-30")]);

    let matched = applicable_on(&records, target);
    assert_eq!(matched.len(), 1);

    let slots = expand(matched[0], target, 30);
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].slot_start.to_string(), "09:00:00");
    assert_eq!(slots[0].slot_end.to_string(), "09:30:00");
}

#[test]
fn record_expiring_the_day_before_yields_no_slots() {
    let target = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
    let records = canonicalize(vec![tuesday_morning_record("2025-06-09")]);

    let matched = applicable_on(&records, target);
    assert!(matched.is_empty());

    let slots: Vec<_> = matched
        .into_iter()
        .flat_map(|record| expand(record, target, 30))
        .collect();
    assert!(slots.is_empty());
}
