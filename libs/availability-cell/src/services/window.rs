use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::models::{CalendarView, DateWindow};

/// Compute the concrete date window to query for a calendar view.
///
/// Month views widen the query window past the visible month by
/// `prefetch_horizon_months` so forward navigation is served from the
/// already-loaded window instead of refetching every month. Pure: identical
/// inputs always produce identical windows.
pub fn range_for_view(
    reference: NaiveDate,
    view: CalendarView,
    prefetch_horizon_months: u32,
) -> DateWindow {
    match view {
        CalendarView::Day => DateWindow {
            start: reference,
            end: reference,
        },
        CalendarView::Week => {
            let offset = reference.weekday().num_days_from_sunday() as i64;
            let start = reference - Duration::days(offset);
            DateWindow {
                start,
                end: start + Duration::days(6),
            }
        }
        CalendarView::Month => {
            let first_of_month = reference.with_day(1).unwrap_or(reference);
            // Months arithmetic keeps year boundaries exact: the day after
            // the window is the first of the month past the horizon.
            let past_window = first_of_month + Months::new(prefetch_horizon_months + 1);
            let end = past_window.pred_opt().unwrap_or(past_window);
            DateWindow {
                start: first_of_month,
                end,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_view_without_horizon_covers_exactly_the_month() {
        let window = range_for_view(d(2025, 6, 10), CalendarView::Month, 0);
        assert_eq!(window.start, d(2025, 6, 1));
        assert_eq!(window.end, d(2025, 6, 30));
    }

    #[test]
    fn month_view_prefetches_ahead_across_year_boundary() {
        let window = range_for_view(d(2025, 11, 15), CalendarView::Month, 3);
        assert_eq!(window.start, d(2025, 11, 1));
        assert_eq!(window.end, d(2026, 2, 28));
        // No lost or duplicated days: window length matches the calendar.
        assert_eq!((window.end - window.start).num_days() + 1, 30 + 31 + 31 + 28);
    }

    #[test]
    fn week_view_runs_sunday_through_saturday() {
        // 2025-06-10 is a Tuesday.
        let window = range_for_view(d(2025, 6, 10), CalendarView::Week, 3);
        assert_eq!(window.start, d(2025, 6, 8));
        assert_eq!(window.end, d(2025, 6, 14));
    }

    #[test]
    fn day_view_is_a_single_date() {
        let window = range_for_view(d(2025, 12, 31), CalendarView::Day, 3);
        assert_eq!(window.start, window.end);
    }

    #[test]
    fn identical_inputs_produce_identical_windows() {
        let a = range_for_view(d(2024, 2, 29), CalendarView::Month, 2);
        let b = range_for_view(d(2024, 2, 29), CalendarView::Month, 2);
        assert_eq!(a, b);
    }
}
