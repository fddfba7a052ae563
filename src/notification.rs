use crate::calendar;
use crate::model::{DayPreference, Employee, ScheduleEntry, Workspace};
use crate::preferences;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

/// Message prêt à être transmis à un employé (le canal d'envoi est externe).
#[derive(Debug, Clone)]
pub struct Message {
    pub employee_name: String,
    pub content: String,
}

/// Permet de customiser le rendu des messages (texte, HTML de messagerie, etc.).
pub trait MessageRenderer {
    fn weekly_schedule(
        &self,
        employee: &Employee,
        entries: &[&ScheduleEntry],
        week: &[NaiveDate; 7],
    ) -> String;
    fn selected_days_off(
        &self,
        employee: &Employee,
        preferences: &[DayPreference],
        week: &[NaiveDate; 7],
    ) -> String;
    fn schedule_ready(&self, week: &[NaiveDate; 7]) -> String;
    fn work_day_reminder(&self, employee: &Employee, date: NaiveDate, hours: u8) -> String;
}

/// Gabarit texte brut.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextMessages;

impl MessageRenderer for TextMessages {
    fn weekly_schedule(
        &self,
        employee: &Employee,
        entries: &[&ScheduleEntry],
        week: &[NaiveDate; 7],
    ) -> String {
        let mut out = format!(
            "Planning de {}\nSemaine : {}\n\n",
            employee.name,
            week_label(week)
        );
        for (position, date) in week.iter().enumerate() {
            let iso = calendar::to_iso_date(*date);
            let entry = entries
                .iter()
                .find(|e| e.employee_id == employee.id && e.date == iso);
            let status = match entry.and_then(|e| e.effective_hours(position)) {
                Some(hours) => format!("travail ({hours} h)"),
                None if entry.is_some() => "repos".to_string(),
                None => "non planifié".to_string(),
            };
            out.push_str(&format!("{} : {status}\n", day_label(*date)));
        }
        out
    }

    fn selected_days_off(
        &self,
        employee: &Employee,
        preferences: &[DayPreference],
        week: &[NaiveDate; 7],
    ) -> String {
        let dates = calendar::iso_week_strings(week);
        let mut out = format!(
            "Repos demandés par {}\nSemaine : {}\n\n",
            employee.name,
            week_label(week)
        );
        let selected: Vec<String> = week
            .iter()
            .zip(dates.iter())
            .filter(|(_, iso)| {
                preferences
                    .iter()
                    .any(|p| p.employee_id == employee.id && &p.date == *iso && p.is_preferred)
            })
            .map(|(date, _)| format!("- {}", day_label(*date)))
            .collect();
        if selected.is_empty() {
            out.push_str("Aucun repos demandé pour cette semaine.\n");
        } else {
            out.push_str(&selected.join("\n"));
            out.push('\n');
        }
        out.push_str(&format!(
            "\nMaximum de repos : {}\n",
            preferences::max_off_days_for_employee(employee)
        ));
        out
    }

    fn schedule_ready(&self, week: &[NaiveDate; 7]) -> String {
        format!(
            "Le planning est prêt !\n\nLe planning de la semaine {} est disponible.\n",
            week_label(week)
        )
    }

    fn work_day_reminder(&self, employee: &Employee, date: NaiveDate, hours: u8) -> String {
        format!(
            "Rappel : {name}, tu travailles demain ({day}).\nDurée de la journée : {hours} h.\n",
            name = employee.name,
            day = day_label(date),
        )
    }
}

/// Prépare le message de planning hebdomadaire d'un employé.
pub fn prepare_schedule_message(
    workspace: &Workspace,
    name: &str,
    week: &[NaiveDate; 7],
    renderer: &dyn MessageRenderer,
) -> Result<Message> {
    let employee = workspace
        .find_employee_by_name(name)
        .with_context(|| format!("unknown employee: {name}"))?;
    let entries: Vec<&ScheduleEntry> = workspace
        .week_entries(week)
        .into_iter()
        .filter(|e| e.employee_id == employee.id)
        .collect();
    if entries.is_empty() {
        bail!("no schedule for {name} in week {}", week_label(week));
    }
    Ok(Message {
        employee_name: employee.name.clone(),
        content: renderer.weekly_schedule(employee, &entries, week),
    })
}

/// Prépare le récapitulatif des repos demandés par un employé.
pub fn prepare_days_off_message(
    workspace: &Workspace,
    name: &str,
    week: &[NaiveDate; 7],
    renderer: &dyn MessageRenderer,
) -> Result<Message> {
    let employee = workspace
        .find_employee_by_name(name)
        .with_context(|| format!("unknown employee: {name}"))?;
    Ok(Message {
        employee_name: employee.name.clone(),
        content: renderer.selected_days_off(employee, &workspace.preferences, week),
    })
}

/// Rappels pour la veille de `date` : un message par employé qui travaille ce jour-là.
pub fn prepare_work_day_reminders(
    workspace: &Workspace,
    date: NaiveDate,
    renderer: &dyn MessageRenderer,
) -> Vec<Message> {
    let iso = calendar::to_iso_date(date);
    let position = usize::from(calendar::day_of_week_index(date));
    workspace
        .employees
        .iter()
        .filter_map(|employee| {
            let entry = workspace
                .schedule
                .iter()
                .find(|e| e.employee_id == employee.id && e.date == iso)?;
            let hours = entry.effective_hours(position)?;
            Some(Message {
                employee_name: employee.name.clone(),
                content: renderer.work_day_reminder(employee, date, hours),
            })
        })
        .collect()
}

fn week_label(week: &[NaiveDate; 7]) -> String {
    format!("{} - {}", week[0].format("%d.%m"), week[6].format("%d.%m"))
}

const DAY_NAMES: [&str; 7] = ["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."];

fn day_label(date: NaiveDate) -> String {
    format!(
        "{} {}",
        DAY_NAMES[usize::from(calendar::day_of_week_index(date))],
        date.format("%d.%m")
    )
}
