use super::policy::Policy;
use crate::model::{BreakAssignment, BreakDuration, ShiftRecord};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use thiserror::Error;

/// Options d'assignation
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignOptions {
    pub duration: BreakDuration,
    pub policy: Policy,
}

#[derive(Error, Debug)]
pub enum BreakError {
    #[error("staff name cannot be empty")]
    EmptyStaffName,
    #[error("invalid shift window for {staff}: end {end} must be after start {start}")]
    InvalidShiftWindow {
        staff: String,
        start: NaiveTime,
        end: NaiveTime,
    },
    #[error("invalid break duration: {0}h")]
    InvalidDuration(f64),
    #[error("break duration {hours}h outside [{min}h, {max}h]")]
    DurationOutOfBounds { hours: f64, min: f64, max: f64 },
}

/// Ligne valide du planning et sa pause.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    pub index: usize,
    pub record: ShiftRecord,
    pub assignment: BreakAssignment,
}

/// Ligne écartée à la validation (position dans l'entrée d'origine).
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub index: usize,
    pub staff_name: String,
    pub reason: String,
}

/// Résultat complet d'un passage du scheduler.
#[derive(Debug, Clone, Serialize)]
pub struct BreakPlan {
    pub date: NaiveDate,
    pub break_minutes: i64,
    pub entries: Vec<PlanEntry>,
    pub rejected: Vec<Rejection>,
}

impl BreakPlan {
    pub fn assignments(&self) -> impl Iterator<Item = &BreakAssignment> {
        self.entries.iter().map(|e| &e.assignment)
    }

    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Une ligne par membre, dans l'ordre d'entrée ; les rejets sont sans pause.
    pub fn staff_breaks(&self) -> Vec<(&str, Option<(NaiveDateTime, NaiveDateTime)>)> {
        let mut rows: Vec<(usize, &str, Option<(NaiveDateTime, NaiveDateTime)>)> = self
            .entries
            .iter()
            .map(|e| (e.index, e.assignment.staff_name.as_str(), e.assignment.bounds()))
            .chain(self.rejected.iter().map(|r| (r.index, r.staff_name.as_str(), None)))
            .collect();
        rows.sort_by_key(|(index, _, _)| *index);
        rows.into_iter().map(|(_, name, window)| (name, window)).collect()
    }
}
