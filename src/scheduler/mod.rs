mod manual;
mod policy;
mod types;
pub mod util;

pub use policy::{GridMedian, MiddayAnchor, Placement, PlacementPolicy, Policy, ShiftWindow};
pub use types::{AssignOptions, BreakError, BreakPlan, PlanEntry, Rejection};

use crate::model::{BreakAssignment, BreakOrigin, ShiftRecord, SkipReason};
use chrono::NaiveDate;
use manual::ManualBreak;
use tracing::{debug, warn};

/// Scheduler : calcule la pause de chaque ligne pour une date donnée.
///
/// Sans état entre deux appels ; chaque ligne est traitée indépendamment.
#[derive(Debug, Clone)]
pub struct BreakScheduler {
    date: NaiveDate,
    opts: AssignOptions,
}

impl BreakScheduler {
    pub fn new(date: NaiveDate, opts: AssignOptions) -> Self {
        Self { date, opts }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn options(&self) -> &AssignOptions {
        &self.opts
    }

    /// Vérifie qu'une ligne est exploitable et renvoie son service daté.
    pub fn validate(&self, record: &ShiftRecord) -> Result<ShiftWindow, BreakError> {
        if record.staff_name.trim().is_empty() {
            return Err(BreakError::EmptyStaffName);
        }
        if record.shift_end <= record.shift_start {
            return Err(BreakError::InvalidShiftWindow {
                staff: record.staff_name.clone(),
                start: record.shift_start,
                end: record.shift_end,
            });
        }
        Ok(ShiftWindow {
            start: util::on_date(self.date, record.shift_start),
            end: util::on_date(self.date, record.shift_end),
        })
    }

    pub fn assign(&self, record: &ShiftRecord) -> Result<BreakAssignment, BreakError> {
        let shift = self.validate(record)?;
        let name = record.staff_name.as_str();

        if !record.break_required {
            return Ok(BreakAssignment::none(name, SkipReason::NotRequired));
        }

        match manual::read_manual(record, self.date) {
            ManualBreak::Window(start, end) => {
                if util::within(start, end, shift.start, shift.end) {
                    return Ok(BreakAssignment::window(name, start, end, BreakOrigin::Manual));
                }
                warn!(staff = name, %start, %end, "manual break outside shift, ignored");
                return Ok(BreakAssignment::none(name, SkipReason::InvalidManual));
            }
            ManualBreak::Malformed => {
                warn!(staff = name, "malformed manual break, ignored");
                return Ok(BreakAssignment::none(name, SkipReason::InvalidManual));
            }
            ManualBreak::Absent => {}
        }

        let duration = self.opts.duration.as_duration();
        if shift.length() < duration {
            debug!(staff = name, "shift shorter than break");
            return Ok(BreakAssignment::none(name, SkipReason::ShiftTooShort));
        }

        let assignment = match self.opts.policy.place(&shift, duration) {
            Some(p) => BreakAssignment::window(name, p.start, p.start + duration, p.origin),
            None => BreakAssignment::none(name, SkipReason::NoSlot),
        };
        debug!(
            staff = name,
            policy = self.opts.policy.name(),
            origin = assignment.origin.label(),
            "break assigned"
        );
        Ok(assignment)
    }

    /// Un résultat par ligne, dans l'ordre d'entrée.
    pub fn assign_all(&self, records: &[ShiftRecord]) -> Vec<Result<BreakAssignment, BreakError>> {
        records.iter().map(|r| self.assign(r)).collect()
    }

    /// Planning complet : lignes valides d'un côté, rejets de l'autre.
    pub fn plan(&self, records: &[ShiftRecord]) -> BreakPlan {
        let mut entries = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        for (index, (record, result)) in records.iter().zip(self.assign_all(records)).enumerate() {
            match result {
                Ok(assignment) => entries.push(PlanEntry {
                    index,
                    record: record.clone(),
                    assignment,
                }),
                Err(err) => {
                    warn!(index, staff = record.staff_name.as_str(), %err, "record rejected");
                    rejected.push(Rejection {
                        index,
                        staff_name: record.staff_name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        BreakPlan {
            date: self.date,
            break_minutes: self.opts.duration.num_minutes(),
            entries,
            rejected,
        }
    }
}
