//! Arithmétique de semaine : lundi = position 0, dimanche = position 6.
//!
//! Les dates sont des `NaiveDate` (pas de fuseau) ; la forme texte canonique
//! `YYYY-MM-DD` sert de clé entre souhaits et planning.

use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
}

pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Heures d'une journée travaillée en semaine.
pub const WEEKDAY_HOURS: u8 = 12;
/// Heures d'une journée travaillée le week-end.
pub const WEEKEND_HOURS: u8 = 11;

/// Les 7 dates (lundi..dimanche) de la semaine contenant `anchor`.
pub fn week_dates(anchor: NaiveDate) -> [NaiveDate; 7] {
    let monday = anchor - Duration::days(i64::from(day_of_week_index(anchor)));
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// Index du jour, lundi = 0 .. dimanche = 6.
pub fn day_of_week_index(date: NaiveDate) -> u8 {
    ((date.weekday().num_days_from_sunday() + 6) % 7) as u8
}

pub fn to_iso_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(raw.trim(), ISO_FORMAT)
        .map_err(|_| CalendarError::InvalidDate(raw.to_string()))
}

/// Semaine contenant la date texte `raw`.
pub fn week_of(raw: &str) -> Result<[NaiveDate; 7], CalendarError> {
    parse_iso_date(raw).map(week_dates)
}

pub fn previous_week(anchor: NaiveDate) -> NaiveDate {
    anchor - Duration::weeks(1)
}

pub fn next_week(anchor: NaiveDate) -> NaiveDate {
    anchor + Duration::weeks(1)
}

pub fn is_weekend_position(position: usize) -> bool {
    position >= 5
}

pub fn default_hours(position: usize) -> u8 {
    if is_weekend_position(position) {
        WEEKEND_HOURS
    } else {
        WEEKDAY_HOURS
    }
}

pub fn iso_week_strings(week: &[NaiveDate; 7]) -> [String; 7] {
    std::array::from_fn(|i| to_iso_date(week[i]))
}
