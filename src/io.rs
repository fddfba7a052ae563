use crate::calendar;
use crate::model::{Employee, WorkScheduleMode, Workspace};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::warn;

/// Import d'employés depuis CSV:
/// header `name,mode[,max_work_days][,min_off_days][,fixed_work_days][,fixed_off_days][,color]`.
///
/// `mode` vaut `5/2`, `flexible` ou `fixed` ; les listes de jours s'écrivent `0;1;2` (0 = lundi).
pub fn import_employees_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid employee row (empty name)");
        }
        let mode: WorkScheduleMode = rec
            .get(1)
            .context("missing mode")?
            .parse::<WorkScheduleMode>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid mode for {name}"))?;

        let column = |idx: usize| rec.get(idx).map(str::trim).filter(|s| !s.is_empty());

        let mut employee = match mode {
            WorkScheduleMode::FixedFiveTwo => Employee::five_two(name),
            WorkScheduleMode::FixedCustom => {
                let days = column(4)
                    .map(parse_days)
                    .transpose()
                    .with_context(|| format!("invalid fixed_work_days for {name}"))?
                    .unwrap_or_default();
                if days.is_empty() {
                    bail!("employee {name} has a fixed schedule without fixed_work_days");
                }
                Employee::fixed_custom(name, days)
            }
            WorkScheduleMode::Flexible => {
                let max_work: u8 = column(2)
                    .map(str::parse::<u8>)
                    .transpose()
                    .with_context(|| format!("invalid max_work_days for {name}"))?
                    .unwrap_or(5);
                let min_off: u8 = column(3)
                    .map(str::parse::<u8>)
                    .transpose()
                    .with_context(|| format!("invalid min_off_days for {name}"))?
                    .unwrap_or_else(|| 7u8.saturating_sub(max_work));
                let mut employee = Employee::flexible(name).with_bounds(max_work, min_off);
                if let Some(raw) = column(5) {
                    employee.fixed_off_days = parse_days(raw)
                        .with_context(|| format!("invalid fixed_off_days for {name}"))?;
                }
                if u16::from(employee.max_work_days) + u16::from(employee.min_off_days) > 7 {
                    warn!(
                        employee = name,
                        max_work_days = employee.max_work_days,
                        min_off_days = employee.min_off_days,
                        "max_work_days + min_off_days exceeds 7"
                    );
                }
                employee
            }
        };
        if let Some(color) = column(6) {
            employee.color = color.to_string();
        }
        out.push(employee);
    }
    Ok(out)
}

/// Liste de positions `0;3;6` -> ensemble, positions hors 0..=6 refusées.
pub fn parse_days(raw: &str) -> anyhow::Result<BTreeSet<u8>> {
    raw.split([';', ','])
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| -> anyhow::Result<u8> {
            let day: u8 = chunk
                .parse()
                .with_context(|| format!("invalid day index: {chunk}"))?;
            if day > 6 {
                bail!("day index out of range (0-6): {day}");
            }
            Ok(day)
        })
        .collect()
}

/// Export CSV d'une semaine: header `date,employee,status,hours`
pub fn export_week_csv<P: AsRef<Path>>(
    path: P,
    workspace: &Workspace,
    week: &[NaiveDate; 7],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "employee", "status", "hours"])?;
    let dates = calendar::iso_week_strings(week);
    for entry in workspace.week_entries(week) {
        let name = workspace
            .find_employee_by_id(&entry.employee_id)
            .map(|e| e.name.as_str())
            .unwrap_or("");
        let position = dates.iter().position(|d| *d == entry.date).unwrap_or(0);
        let status = entry.status.code().to_string();
        let hours = entry
            .effective_hours(position)
            .map(|h| h.to_string())
            .unwrap_or_default();
        w.write_record([entry.date.as_str(), name, status.as_str(), hours.as_str()])?;
    }
    w.flush()?;
    Ok(())
}
