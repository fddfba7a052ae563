#![forbid(unsafe_code)]
use chrono::NaiveDate;
use weekplan::calendar::{self, CalendarError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn day_index_is_monday_based_for_every_weekday() {
    // 2025-10-06 est un lundi
    let expected = [0u8, 1, 2, 3, 4, 5, 6];
    for (offset, want) in expected.iter().enumerate() {
        let d = date(2025, 10, 6 + offset as u32);
        assert_eq!(calendar::day_of_week_index(d), *want, "{d}");
    }
    assert_eq!(calendar::day_of_week_index(date(2025, 10, 12)), 6);
}

#[test]
fn week_dates_start_on_monday_from_any_anchor() {
    let monday = date(2025, 10, 6);
    for anchor in [date(2025, 10, 6), date(2025, 10, 9), date(2025, 10, 12)] {
        let week = calendar::week_dates(anchor);
        assert_eq!(week[0], monday);
        assert_eq!(week[6], date(2025, 10, 12));
        assert!(week.windows(2).all(|w| w[1] - w[0] == chrono::Duration::days(1)));
    }
}

#[test]
fn week_dates_across_month_and_year_boundaries() {
    let week = calendar::week_dates(date(2026, 1, 1));
    assert_eq!(week[0], date(2025, 12, 29));
    assert_eq!(week[6], date(2026, 1, 4));
}

#[test]
fn iso_round_trip_and_invalid_input() {
    let d = date(2025, 3, 7);
    assert_eq!(calendar::to_iso_date(d), "2025-03-07");
    assert_eq!(calendar::parse_iso_date("2025-03-07").unwrap(), d);

    for raw in ["2025-13-01", "07/03/2025", "", "tomorrow"] {
        assert_eq!(
            calendar::parse_iso_date(raw),
            Err(CalendarError::InvalidDate(raw.to_string()))
        );
    }
    assert!(calendar::week_of("2025-02-30").is_err());
}

#[test]
fn previous_and_next_week_move_by_seven_days() {
    let d = date(2025, 10, 8);
    assert_eq!(calendar::next_week(d), date(2025, 10, 15));
    assert_eq!(calendar::previous_week(d), date(2025, 10, 1));
}

#[test]
fn weekend_positions_get_short_shifts() {
    let hours: Vec<u8> = (0..7).map(calendar::default_hours).collect();
    assert_eq!(hours, vec![12, 12, 12, 12, 12, 11, 11]);
}
