use super::types::PERFECT_SCORE;
use crate::calendar;
use crate::model::{DayPreference, Employee, ScheduleEntry, ScheduleSettings};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Effectif flexible différent du nombre exact demandé, par jour.
pub const HEADCOUNT_PENALTY: i32 = 50;
/// Repos souhaité mais journée travaillée, par souhait.
pub const PREFERENCE_PENALTY: i32 = 5;
/// Dépassement de `max_work_days` ou repos sous `min_off_days`, par borne et par employé.
pub const BOUNDS_PENALTY: i32 = 20;

/// Note 0..=100 d'un planning candidat (100 = aucune violation).
pub fn evaluate(
    candidate: &[ScheduleEntry],
    employees: &[Employee],
    preferences: &[DayPreference],
    week: &[NaiveDate; 7],
    settings: &ScheduleSettings,
) -> u8 {
    let dates = calendar::iso_week_strings(week);
    let flexible: HashSet<&str> = employees
        .iter()
        .filter(|e| e.is_flexible())
        .map(|e| e.id.as_str())
        .collect();

    let by_key: HashMap<(&str, &str), &ScheduleEntry> = candidate
        .iter()
        .map(|e| ((e.employee_id.as_str(), e.date.as_str()), e))
        .collect();

    let mut score = i32::from(PERFECT_SCORE);

    for date in &dates {
        let working_flexible = candidate
            .iter()
            .filter(|e| &e.date == date && e.status.is_working())
            .filter(|e| flexible.contains(e.employee_id.as_str()))
            .count();
        if working_flexible != settings.exact_employees_per_day {
            score -= HEADCOUNT_PENALTY;
        }

        // les souhaits d'un horaire fixe ne comptent pas : le générateur ne peut pas les honorer
        let violated = preferences
            .iter()
            .filter(|p| p.is_preferred && &p.date == date)
            .filter(|p| flexible.contains(p.employee_id.as_str()))
            .filter(|p| {
                by_key
                    .get(&(p.employee_id.as_str(), date.as_str()))
                    .is_some_and(|e| e.status.is_working())
            })
            .count();
        score -= PREFERENCE_PENALTY * violated as i32;
    }

    for employee in employees.iter().filter(|e| e.is_flexible()) {
        let (work_days, off_days) = candidate
            .iter()
            .filter(|e| e.employee_id == employee.id && dates.contains(&e.date))
            .fold((0u32, 0u32), |(w, o), e| {
                if e.status.is_working() {
                    (w + 1, o)
                } else {
                    (w, o + 1)
                }
            });
        if work_days > u32::from(employee.max_work_days) {
            score -= BOUNDS_PENALTY;
        }
        if off_days < u32::from(employee.min_off_days) {
            score -= BOUNDS_PENALTY;
        }
    }

    score.clamp(0, i32::from(PERFECT_SCORE)) as u8
}
