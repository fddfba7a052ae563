#![forbid(unsafe_code)]
//! Weekplan — génération du planning hebdomadaire d'une petite équipe (sans BD).
//!
//! - Employés 5/2, à jours fixes ou flexibles (bornes travail/repos).
//! - Effectif flexible exact par jour, souhaits de repos honorés au mieux.
//! - Tentatives aléatoires (graine injectable), notation 0..100, meilleure retenue.
//! - Stockage fichiers (JSON/CSV) ; semaine lundi..dimanche, dates `YYYY-MM-DD`.

pub mod calendar;
pub mod io;
pub mod model;
pub mod notification;
pub mod preferences;
pub mod scheduler;
pub mod storage;

pub use calendar::{day_of_week_index, to_iso_date, week_dates, CalendarError};
pub use model::{
    DayPreference, Employee, EmployeeId, ScheduleEntry, ScheduleSettings, ShiftStatus,
    WorkScheduleMode, Workspace,
};
pub use notification::{Message, MessageRenderer, TextMessages};
pub use preferences::{set_preference, toggle_preference, upsert_preference, PreferenceError};
pub use scheduler::{
    detect_conflicts, evaluate, generate_schedule, DayOffConflicts, GenerateOptions,
    GenerationOutcome, Scheduler,
};
pub use storage::{JsonStorage, Storage};
