use crate::model::ScheduleEntry;
use std::collections::BTreeMap;

/// Score d'un planning sans aucune violation.
pub const PERFECT_SCORE: u8 = 100;

/// Options de génération
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Graine du générateur aléatoire ; `None` = graine tirée de l'entropie système.
    pub seed: Option<u64>,
}

impl GenerateOptions {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

/// Résultat d'une génération : meilleur candidat, son score, nombre de tentatives jouées.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub entries: Vec<ScheduleEntry>,
    pub score: u8,
    pub attempts_run: u32,
}

impl GenerationOutcome {
    pub fn is_perfect(&self) -> bool {
        self.score == PERFECT_SCORE
    }
}

/// Date ISO -> noms des employés demandant ce repos en surnombre.
pub type DayOffConflicts = BTreeMap<String, Vec<String>>;
