mod assignment;
mod conflicts;
pub mod scoring;
mod tally;
mod types;

pub use conflicts::detect_conflicts;
pub use scoring::evaluate;
pub use types::{DayOffConflicts, GenerateOptions, GenerationOutcome, PERFECT_SCORE};

use crate::model::{DayPreference, Employee, ScheduleEntry, ScheduleSettings};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

/// Scheduler : vue en lecture seule sur l'effectif, les souhaits et les réglages.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler<'a> {
    employees: &'a [Employee],
    preferences: &'a [DayPreference],
    settings: &'a ScheduleSettings,
}

impl<'a> Scheduler<'a> {
    pub fn new(
        employees: &'a [Employee],
        preferences: &'a [DayPreference],
        settings: &'a ScheduleSettings,
    ) -> Self {
        Self {
            employees,
            preferences,
            settings,
        }
    }

    pub fn settings(&self) -> &ScheduleSettings {
        self.settings
    }

    /// Joue jusqu'à `generation_attempts` tentatives et garde la meilleure.
    pub fn generate(&self, week: &[NaiveDate; 7], opts: GenerateOptions) -> GenerationOutcome {
        let mut rng = match opts.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate_with_rng(week, &mut rng)
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        week: &[NaiveDate; 7],
        rng: &mut R,
    ) -> GenerationOutcome {
        let flexible = self.employees.iter().filter(|e| e.is_flexible()).count();
        if flexible < self.settings.exact_employees_per_day {
            warn!(
                flexible,
                required = self.settings.exact_employees_per_day,
                "not enough flexible employees, everyone works every day"
            );
        }

        let max_attempts = self.settings.generation_attempts.max(1);
        let mut best: Option<(u8, Vec<ScheduleEntry>)> = None;
        let mut attempts_run = 0;

        for attempt in 0..max_attempts {
            attempts_run += 1;
            let candidate = assignment::generate_attempt(
                self.employees,
                self.preferences,
                week,
                self.settings,
                rng,
            );
            let score = self.evaluate(&candidate, week);
            debug!(attempt, score, "schedule attempt evaluated");

            if best.as_ref().map_or(true, |(s, _)| score > *s) {
                best = Some((score, candidate));
            }
            if score == PERFECT_SCORE {
                info!(attempt, "perfect schedule found, stopping early");
                break;
            }
        }

        let (score, entries) = best.unwrap_or_default();
        info!(score, attempts_run, entries = entries.len(), "schedule generated");
        GenerationOutcome {
            entries,
            score,
            attempts_run,
        }
    }

    pub fn evaluate(&self, candidate: &[ScheduleEntry], week: &[NaiveDate; 7]) -> u8 {
        scoring::evaluate(
            candidate,
            self.employees,
            self.preferences,
            week,
            self.settings,
        )
    }

    pub fn detect_conflicts(&self, week: &[NaiveDate; 7]) -> DayOffConflicts {
        conflicts::detect_conflicts(self.employees, self.preferences, week, self.settings)
    }
}

/// Raccourci : meilleur planning de la semaine `week`, graine aléatoire.
pub fn generate_schedule(
    employees: &[Employee],
    preferences: &[DayPreference],
    week: &[NaiveDate; 7],
    settings: &ScheduleSettings,
) -> Vec<ScheduleEntry> {
    Scheduler::new(employees, preferences, settings)
        .generate(week, GenerateOptions::default())
        .entries
}
