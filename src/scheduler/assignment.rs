use super::tally::Tally;
use crate::calendar;
use crate::model::{DayPreference, Employee, ScheduleEntry, ScheduleSettings, ShiftStatus, WorkScheduleMode};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Contraintes d'un employé flexible pour la journée courante.
struct DayConstraint<'a> {
    employee: &'a Employee,
    can_take_off: bool,
    can_work: bool,
    is_fixed_off_day: bool,
    wants_off: bool,
}

/// Une tentative complète : tous les employés, les 7 jours.
pub(super) fn generate_attempt<R: Rng + ?Sized>(
    employees: &[Employee],
    preferences: &[DayPreference],
    week: &[NaiveDate; 7],
    settings: &ScheduleSettings,
    rng: &mut R,
) -> Vec<ScheduleEntry> {
    let dates = calendar::iso_week_strings(week);
    let mut schedule = Vec::with_capacity(employees.len() * dates.len());

    for employee in employees
        .iter()
        .filter(|e| e.work_schedule_mode == WorkScheduleMode::FixedFiveTwo)
    {
        for (position, date) in dates.iter().enumerate() {
            let status = if position < 5 {
                ShiftStatus::Work
            } else {
                ShiftStatus::Off
            };
            schedule.push(ScheduleEntry::new(employee.id.clone(), date, position, status));
        }
    }

    for employee in employees
        .iter()
        .filter(|e| e.work_schedule_mode == WorkScheduleMode::FixedCustom)
    {
        for (position, date) in dates.iter().enumerate() {
            let status = if employee.fixed_work_days.contains(&(position as u8)) {
                ShiftStatus::working_on(position)
            } else {
                ShiftStatus::Off
            };
            schedule.push(ScheduleEntry::new(employee.id.clone(), date, position, status));
        }
    }

    let flexible: Vec<&Employee> = employees.iter().filter(|e| e.is_flexible()).collect();
    let mut tally = Tally::default();

    for (position, date) in dates.iter().enumerate() {
        let wanting_off: HashSet<&str> = preferences
            .iter()
            .filter(|p| p.is_preferred && &p.date == date)
            .map(|p| p.employee_id.as_str())
            .collect();

        let mut ordered = flexible.clone();
        ordered.shuffle(rng);
        ordered.sort_by_key(|e| !wanting_off.contains(e.id.as_str()));

        let working = if flexible.len() < settings.exact_employees_per_day {
            ordered.iter().map(|&e| e.id.as_str()).collect()
        } else {
            pick_working(&ordered, &wanting_off, &tally, position, settings.exact_employees_per_day)
        };

        for employee in ordered {
            let status = if working.contains(employee.id.as_str()) {
                ShiftStatus::working_on(position)
            } else {
                ShiftStatus::Off
            };
            tally.record(&employee.id, status);
            schedule.push(ScheduleEntry::new(employee.id.clone(), date, position, status));
        }
    }

    schedule
}

/// Choisit exactement `required` employés (si possible) parmi `ordered` pour la position donnée.
fn pick_working<'a>(
    ordered: &[&'a Employee],
    wanting_off: &HashSet<&str>,
    tally: &Tally,
    position: usize,
    required: usize,
) -> HashSet<&'a str> {
    let remaining_days = (7 - position - 1) as i32;

    let constraints: Vec<DayConstraint<'a>> = ordered
        .iter()
        .map(|&employee| {
            let so_far = tally.get(&employee.id);
            let max_work = i32::from(employee.max_work_days);
            let min_off = i32::from(employee.min_off_days);
            DayConstraint {
                employee,
                can_take_off: i32::from(so_far.work_days) + remaining_days
                    >= max_work - (7 - min_off),
                can_work: i32::from(so_far.off_days) + remaining_days >= min_off,
                is_fixed_off_day: employee.fixed_off_days.contains(&(position as u8)),
                wants_off: wanting_off.contains(employee.id.as_str()),
            }
        })
        .collect();

    let mut working: Vec<&'a Employee> = constraints
        .iter()
        .filter(|c| !c.can_take_off && !c.is_fixed_off_day)
        .map(|c| c.employee)
        .collect();

    if working.len() > required {
        working.truncate(required);
    } else if working.len() < required {
        let missing = required - working.len();
        let mut available: Vec<&DayConstraint<'a>> = constraints
            .iter()
            .filter(|c| c.can_work && !c.is_fixed_off_day)
            .filter(|c| !working.iter().any(|w| w.id == c.employee.id))
            .collect();
        available.sort_by_key(|c| c.wants_off);
        working.extend(available.into_iter().take(missing).map(|c| c.employee));
    }

    working.into_iter().map(|e| e.id.as_str()).collect()
}
