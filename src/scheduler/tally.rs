use crate::model::{EmployeeId, ShiftStatus};
use std::collections::HashMap;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct DayTally {
    pub work_days: u8,
    pub off_days: u8,
}

/// Compteurs travail/repos par employé, tenus à jour jour après jour pendant une tentative.
#[derive(Debug, Default)]
pub(super) struct Tally {
    counts: HashMap<EmployeeId, DayTally>,
}

impl Tally {
    pub(super) fn get(&self, id: &EmployeeId) -> DayTally {
        self.counts.get(id).copied().unwrap_or_default()
    }

    pub(super) fn record(&mut self, id: &EmployeeId, status: ShiftStatus) {
        let entry = self.counts.entry(id.clone()).or_default();
        if status.is_working() {
            entry.work_days += 1;
        } else {
            entry.off_days += 1;
        }
    }
}
