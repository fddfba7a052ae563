use crate::calendar;
use crate::model::{DayPreference, Employee, EmployeeId, ScheduleSettings, WorkScheduleMode};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("unknown employee: {0}")]
    UnknownEmployee(String),
    #[error("employee {0} has a fixed schedule and cannot pick days off")]
    FixedSchedule(String),
    #[error("{date} is already a fixed day off")]
    FixedOffDay { date: String },
    #[error("cannot pick more than {max} days off per week")]
    OffDaysLimitExceeded { max: usize },
    #[error("day-off selection is closed for this week")]
    SelectionClosed,
}

/// Nombre maximal de repos demandables : `7 - max_work_days`.
pub fn max_off_days_for_employee(employee: &Employee) -> usize {
    7usize.saturating_sub(usize::from(employee.max_work_days))
}

/// Repos demandés par `employee_id` sur la semaine `week`.
pub fn selected_off_days_count(
    employee_id: &EmployeeId,
    preferences: &[DayPreference],
    week: &[NaiveDate; 7],
) -> usize {
    let dates = calendar::iso_week_strings(week);
    preferences
        .iter()
        .filter(|p| &p.employee_id == employee_id && p.is_preferred && dates.contains(&p.date))
        .count()
}

pub fn is_off_days_limit_exceeded(
    employee: &Employee,
    preferences: &[DayPreference],
    week: &[NaiveDate; 7],
) -> bool {
    selected_off_days_count(&employee.id, preferences, week) > max_off_days_for_employee(employee)
}

/// Saisie ouverte tant que le jour de génération automatique n'est pas atteint.
pub fn is_day_off_selection_available(settings: &ScheduleSettings, today: NaiveDate) -> bool {
    if !settings.auto_generation_enabled {
        return true;
    }
    calendar::day_of_week_index(today) < settings.auto_generation_day
}

pub fn ensure_selection_open(
    settings: &ScheduleSettings,
    today: NaiveDate,
) -> Result<(), PreferenceError> {
    if is_day_off_selection_available(settings, today) {
        Ok(())
    } else {
        Err(PreferenceError::SelectionClosed)
    }
}

/// Insère ou remplace le souhait (employé, date). Jamais de doublon.
pub fn upsert_preference<'a>(
    preferences: &'a mut Vec<DayPreference>,
    employee_id: &EmployeeId,
    date: NaiveDate,
    is_preferred: bool,
) -> &'a DayPreference {
    let key = calendar::to_iso_date(date);
    // purge d'éventuels doublons hérités
    let mut seen = false;
    preferences.retain(|p| {
        if &p.employee_id != employee_id || p.date != key {
            return true;
        }
        let keep = !seen;
        seen = true;
        keep
    });

    match preferences
        .iter()
        .position(|p| &p.employee_id == employee_id && p.date == key)
    {
        Some(pos) => {
            preferences[pos].is_preferred = is_preferred;
            &preferences[pos]
        }
        None => {
            preferences.push(DayPreference::new(employee_id.clone(), date, is_preferred));
            &preferences[preferences.len() - 1]
        }
    }
}

/// Enregistre un souhait après contrôle : employé flexible, jour non fixé en repos,
/// plafond de repos hebdomadaire respecté.
pub fn set_preference<'a>(
    employees: &[Employee],
    preferences: &'a mut Vec<DayPreference>,
    employee_id: &EmployeeId,
    date: NaiveDate,
    is_preferred: bool,
) -> Result<&'a DayPreference, PreferenceError> {
    let employee = employees
        .iter()
        .find(|e| &e.id == employee_id)
        .ok_or_else(|| PreferenceError::UnknownEmployee(employee_id.as_str().to_string()))?;

    if employee.work_schedule_mode != WorkScheduleMode::Flexible {
        return Err(PreferenceError::FixedSchedule(employee.name.clone()));
    }

    if is_preferred {
        if employee
            .fixed_off_days
            .contains(&calendar::day_of_week_index(date))
        {
            return Err(PreferenceError::FixedOffDay {
                date: calendar::to_iso_date(date),
            });
        }

        let week = calendar::iso_week_strings(&calendar::week_dates(date));
        let key = calendar::to_iso_date(date);
        let others = preferences
            .iter()
            .filter(|p| &p.employee_id == employee_id && p.date != key)
            .filter(|p| p.is_preferred && week.contains(&p.date))
            .count();
        let max = max_off_days_for_employee(employee);
        if others >= max {
            return Err(PreferenceError::OffDaysLimitExceeded { max });
        }
    }

    Ok(upsert_preference(preferences, employee_id, date, is_preferred))
}

/// Inverse le souhait courant (absent = pas de souhait).
pub fn toggle_preference<'a>(
    employees: &[Employee],
    preferences: &'a mut Vec<DayPreference>,
    employee_id: &EmployeeId,
    date: NaiveDate,
) -> Result<&'a DayPreference, PreferenceError> {
    let key = calendar::to_iso_date(date);
    let current = preferences
        .iter()
        .any(|p| &p.employee_id == employee_id && p.date == key && p.is_preferred);
    set_preference(employees, preferences, employee_id, date, !current)
}
