use super::types::DayOffConflicts;
use crate::calendar;
use crate::model::{DayPreference, Employee, ScheduleSettings};
use chrono::NaiveDate;

/// Jours où trop d'employés flexibles demandent un repos pour garder l'effectif exact.
///
/// Purement indicatif : la génération n'est jamais bloquée. Avec moins d'employés
/// flexibles que l'effectif exigé, chaque jour est signalé, même sans aucun souhait.
pub fn detect_conflicts(
    employees: &[Employee],
    preferences: &[DayPreference],
    week: &[NaiveDate; 7],
    settings: &ScheduleSettings,
) -> DayOffConflicts {
    let flexible: Vec<&Employee> = employees.iter().filter(|e| e.is_flexible()).collect();
    let spare = flexible.len() as i64 - settings.exact_employees_per_day as i64;
    let mut out = DayOffConflicts::new();

    for date in calendar::iso_week_strings(week) {
        let names: Vec<String> = flexible
            .iter()
            .filter(|e| {
                preferences
                    .iter()
                    .any(|p| p.employee_id == e.id && p.date == date && p.is_preferred)
            })
            .map(|e| e.name.clone())
            .collect();

        if names.len() as i64 > spare {
            out.insert(date, names);
        }
    }

    out
}
