use crate::calendar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Identifiant fort pour Employee
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour DayPreference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreferenceId(String);

impl PreferenceId {
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour ScheduleEntry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(String);

impl EntryId {
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Mode de planification d'un employé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkScheduleMode {
    /// Lundi-vendredi travaillés, samedi-dimanche de repos.
    FixedFiveTwo,
    /// Jours choisis par le générateur, bornés par `max_work_days` / `min_off_days`.
    Flexible,
    /// Jours travaillés fixés individuellement (`fixed_work_days`).
    FixedCustom,
}

impl WorkScheduleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkScheduleMode::FixedFiveTwo => "5/2",
            WorkScheduleMode::Flexible => "flexible",
            WorkScheduleMode::FixedCustom => "fixed",
        }
    }
}

impl std::str::FromStr for WorkScheduleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "5/2" | "fixed_five_two" | "five-two" => Ok(WorkScheduleMode::FixedFiveTwo),
            "flexible" | "flex" => Ok(WorkScheduleMode::Flexible),
            "fixed" | "fixed_custom" | "custom" => Ok(WorkScheduleMode::FixedCustom),
            other => Err(format!("unknown work schedule mode: {other}")),
        }
    }
}

/// Membre de l'équipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub color: String,
    pub work_schedule_mode: WorkScheduleMode,
    pub max_work_days: u8,
    pub min_off_days: u8,
    /// Jours (0 = lundi .. 6 = dimanche) travaillés, mode `FixedCustom`.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub fixed_work_days: BTreeSet<u8>,
    /// Jours de repos imposés (complément de `fixed_work_days`, ou contrainte partielle en `Flexible`).
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub fixed_off_days: BTreeSet<u8>,
}

impl Employee {
    /// Employé flexible, 5 jours max / 2 repos min par défaut.
    pub fn flexible<N: Into<String>>(name: N) -> Self {
        Self {
            id: EmployeeId::random(),
            name: name.into(),
            color: String::new(),
            work_schedule_mode: WorkScheduleMode::Flexible,
            max_work_days: 5,
            min_off_days: 2,
            fixed_work_days: BTreeSet::new(),
            fixed_off_days: BTreeSet::new(),
        }
    }

    pub fn five_two<N: Into<String>>(name: N) -> Self {
        Self {
            work_schedule_mode: WorkScheduleMode::FixedFiveTwo,
            fixed_work_days: (0..5).collect(),
            fixed_off_days: (5..7).collect(),
            ..Self::flexible(name)
        }
    }

    /// Jours hors `work_days` deviennent des repos fixes. Positions > 6 ignorées.
    pub fn fixed_custom<N: Into<String>, I: IntoIterator<Item = u8>>(name: N, work_days: I) -> Self {
        let fixed_work_days: BTreeSet<u8> = work_days.into_iter().filter(|d| *d < 7).collect();
        let fixed_off_days = (0..7).filter(|d| !fixed_work_days.contains(d)).collect();
        let work = fixed_work_days.len() as u8;
        Self {
            work_schedule_mode: WorkScheduleMode::FixedCustom,
            max_work_days: work,
            min_off_days: 7 - work,
            fixed_work_days,
            fixed_off_days,
            ..Self::flexible(name)
        }
    }

    pub fn with_bounds(mut self, max_work_days: u8, min_off_days: u8) -> Self {
        self.max_work_days = max_work_days.min(7);
        self.min_off_days = min_off_days.min(7);
        self
    }

    pub fn is_flexible(&self) -> bool {
        self.work_schedule_mode == WorkScheduleMode::Flexible
    }
}

/// Souhait de repos d'un employé pour une date donnée.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPreference {
    pub id: PreferenceId,
    pub employee_id: EmployeeId,
    /// YYYY-MM-DD
    pub date: String,
    pub day_of_week: u8,
    /// `true` : l'employé demande ce jour en repos.
    pub is_preferred: bool,
}

impl DayPreference {
    pub fn new(employee_id: EmployeeId, date: NaiveDate, is_preferred: bool) -> Self {
        Self {
            id: PreferenceId::random(),
            employee_id,
            date: calendar::to_iso_date(date),
            day_of_week: calendar::day_of_week_index(date),
            is_preferred,
        }
    }
}

/// Statut d'une journée dans le planning (code numérique 0 / 1 / 11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ShiftStatus {
    Off,
    Work,
    ShortWork,
}

impl ShiftStatus {
    pub fn code(self) -> u8 {
        match self {
            ShiftStatus::Off => 0,
            ShiftStatus::Work => 1,
            ShiftStatus::ShortWork => 11,
        }
    }

    pub fn is_working(self) -> bool {
        self != ShiftStatus::Off
    }

    /// Statut travaillé selon la position dans la semaine (samedi/dimanche = 11h).
    pub fn working_on(position: usize) -> Self {
        if calendar::is_weekend_position(position) {
            ShiftStatus::ShortWork
        } else {
            ShiftStatus::Work
        }
    }
}

impl From<ShiftStatus> for u8 {
    fn from(status: ShiftStatus) -> Self {
        status.code()
    }
}

impl TryFrom<u8> for ShiftStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ShiftStatus::Off),
            1 => Ok(ShiftStatus::Work),
            11 => Ok(ShiftStatus::ShortWork),
            other => Err(format!("invalid shift status code: {other}")),
        }
    }
}

/// Ligne du planning : un employé, une date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: EntryId,
    pub employee_id: EmployeeId,
    /// YYYY-MM-DD
    pub date: String,
    pub status: ShiftStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u8>,
}

impl ScheduleEntry {
    /// Entrée à la position `position` (0 = lundi) ; heures 12/11 si travaillé.
    pub fn new(employee_id: EmployeeId, date: &str, position: usize, status: ShiftStatus) -> Self {
        let hours = status
            .is_working()
            .then(|| calendar::default_hours(position));
        Self {
            id: EntryId::random(),
            employee_id,
            date: date.to_owned(),
            status,
            hours,
        }
    }

    /// Heures effectives ; `None` pour un repos.
    pub fn effective_hours(&self, position: usize) -> Option<u8> {
        if !self.status.is_working() {
            return None;
        }
        Some(self.hours.unwrap_or_else(|| calendar::default_hours(position)))
    }
}

/// Paramètres de génération.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    /// Nombre exact d'employés flexibles au travail chaque jour.
    pub exact_employees_per_day: usize,
    pub generation_attempts: u32,
    #[serde(default)]
    pub auto_generation_enabled: bool,
    /// Jour (0 = lundi) de génération automatique ; ferme la saisie des souhaits.
    #[serde(default)]
    pub auto_generation_day: u8,
    #[serde(default)]
    pub auto_generation_time: String,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            exact_employees_per_day: 3,
            generation_attempts: 10,
            auto_generation_enabled: true,
            auto_generation_day: 6,
            auto_generation_time: "10:00".to_string(),
        }
    }
}

/// Espace de travail complet (unité persistée).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Workspace {
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub preferences: Vec<DayPreference>,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
    #[serde(default)]
    pub settings: ScheduleSettings,
}

impl Workspace {
    pub fn find_employee_by_name<'a>(&'a self, name: &str) -> Option<&'a Employee> {
        self.employees.iter().find(|e| e.name == name)
    }
    pub fn find_employee_by_id<'a>(&'a self, id: &EmployeeId) -> Option<&'a Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }

    /// Remplace les entrées de la semaine `week` par `entries`, les autres semaines restent intactes.
    pub fn merge_week(&mut self, entries: Vec<ScheduleEntry>, week: &[NaiveDate; 7]) {
        let dates: Vec<String> = week.iter().map(|d| calendar::to_iso_date(*d)).collect();
        self.schedule.retain(|e| !dates.contains(&e.date));
        self.schedule.extend(entries);
    }

    /// Entrées de la semaine, dans l'ordre des employés puis des jours.
    pub fn week_entries<'a>(&'a self, week: &[NaiveDate; 7]) -> Vec<&'a ScheduleEntry> {
        let dates: Vec<String> = week.iter().map(|d| calendar::to_iso_date(*d)).collect();
        let mut out: Vec<&ScheduleEntry> = self
            .schedule
            .iter()
            .filter(|e| dates.contains(&e.date))
            .collect();
        out.sort_by(|a, b| {
            let pos = |id: &EmployeeId| self.employees.iter().position(|e| &e.id == id);
            pos(&a.employee_id)
                .cmp(&pos(&b.employee_id))
                .then_with(|| a.date.cmp(&b.date))
        });
        out
    }
}
