use crate::export::XlsxOptions;
use crate::io::write_atomic;
use crate::model::BreakDuration;
use crate::scheduler::{AssignOptions, BreakError, GridMedian, Policy};
use crate::timeline::default_window;
use anyhow::{bail, Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Réglages d'un passage, lus depuis un fichier JSON optionnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Durée appliquée à toute ligne sans saisie manuelle valide.
    pub break_hours: f64,
    pub min_break_hours: f64,
    pub max_break_hours: f64,
    pub policy: Policy,
    pub display_start: NaiveTime,
    pub display_end: NaiveTime,
    pub xlsx: XlsxOptions,
}

impl Default for Settings {
    fn default() -> Self {
        let (display_start, display_end) = default_window();
        Self {
            break_hours: 2.0,
            min_break_hours: 1.0,
            max_break_hours: 3.0,
            policy: Policy::default(),
            display_start,
            display_end,
            xlsx: XlsxOptions::default(),
        }
    }
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let settings: Settings = serde_json::from_slice(&data)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.validate()?;
        let json = serde_json::to_vec_pretty(self)?;
        write_atomic(path, &json)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min_break_hours > 0.0 && self.min_break_hours <= self.max_break_hours) {
            bail!(
                "break bounds must satisfy 0 < min <= max (got {} / {})",
                self.min_break_hours,
                self.max_break_hours
            );
        }
        self.break_duration()?;
        if self.display_end <= self.display_start {
            bail!("display_end must be after display_start");
        }
        if let Policy::GridMedian(GridMedian {
            window_start,
            window_end,
            step_minutes,
        }) = self.policy
        {
            if step_minutes <= 0 {
                bail!("grid step_minutes must be > 0");
            }
            if window_end < window_start {
                bail!("grid window_end must not be before window_start");
            }
        }
        if self.xlsx.sheet_name.trim().is_empty() || self.xlsx.table_name.trim().is_empty() {
            bail!("sheet_name and table_name cannot be empty");
        }
        Ok(())
    }

    /// Durée de pause bornée par [min_break_hours, max_break_hours].
    pub fn break_duration(&self) -> Result<BreakDuration, BreakError> {
        let hours = self.break_hours;
        if !(hours >= self.min_break_hours && hours <= self.max_break_hours) {
            return Err(BreakError::DurationOutOfBounds {
                hours,
                min: self.min_break_hours,
                max: self.max_break_hours,
            });
        }
        BreakDuration::from_hours(hours).ok_or(BreakError::InvalidDuration(hours))
    }

    pub fn assign_options(&self) -> Result<AssignOptions, BreakError> {
        Ok(AssignOptions {
            duration: self.break_duration()?,
            policy: self.policy,
        })
    }
}
