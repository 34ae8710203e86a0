use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Ligne du planning : un membre de l'équipe et son service du jour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRecord {
    pub staff_name: String,
    pub shift_start: NaiveTime,
    pub shift_end: NaiveTime,
    #[serde(default)]
    pub break_required: bool,
    /// Saisie manuelle brute ("HH:MM"), validée seulement à l'assignation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_break_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_break_end: Option<String>,
}

impl ShiftRecord {
    pub fn new<S: Into<String>>(
        staff_name: S,
        shift_start: NaiveTime,
        shift_end: NaiveTime,
        break_required: bool,
    ) -> Self {
        Self {
            staff_name: staff_name.into(),
            shift_start,
            shift_end,
            break_required,
            manual_break_start: None,
            manual_break_end: None,
        }
    }

    /// Fixe une pause manuelle (les deux bornes en texte "HH:MM").
    pub fn with_manual_break<A: Into<String>, B: Into<String>>(mut self, start: A, end: B) -> Self {
        self.manual_break_start = Some(start.into());
        self.manual_break_end = Some(end.into());
        self
    }

    /// Durée du service.
    pub fn shift_length(&self) -> Duration {
        self.shift_end - self.shift_start
    }
}

/// Plafond d'une pause : une journée.
const MAX_BREAK_SECS: i64 = 24 * 60 * 60;

/// Durée de pause strictement positive, arrondie à la seconde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BreakDuration(Duration);

impl BreakDuration {
    pub fn from_hours(hours: f64) -> Option<Self> {
        if !hours.is_finite() || hours <= 0.0 {
            return None;
        }
        let secs = (hours * 3600.0).round();
        if secs <= 0.0 || secs > MAX_BREAK_SECS as f64 {
            return None;
        }
        Duration::try_seconds(secs as i64).map(Self)
    }

    pub fn from_minutes(minutes: i64) -> Option<Self> {
        if minutes <= 0 || minutes > MAX_BREAK_SECS / 60 {
            return None;
        }
        Duration::try_minutes(minutes).map(Self)
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn num_minutes(&self) -> i64 {
        self.0.num_minutes()
    }

    pub fn hours(&self) -> f64 {
        self.0.num_seconds() as f64 / 3600.0
    }
}

impl Default for BreakDuration {
    fn default() -> Self {
        Self(Duration::hours(2))
    }
}

/// Pourquoi aucune pause n'a été posée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotRequired,
    InvalidManual,
    ShiftTooShort,
    NoSlot,
}

/// Origine d'une pause (ou raison de son absence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakOrigin {
    Manual,
    Midday,
    Midpoint,
    Grid,
    Skipped(SkipReason),
}

impl BreakOrigin {
    pub fn label(&self) -> &'static str {
        match self {
            BreakOrigin::Manual => "manual",
            BreakOrigin::Midday => "midday",
            BreakOrigin::Midpoint => "midpoint",
            BreakOrigin::Grid => "grid",
            BreakOrigin::Skipped(SkipReason::NotRequired) => "not required",
            BreakOrigin::Skipped(SkipReason::InvalidManual) => "invalid manual entry",
            BreakOrigin::Skipped(SkipReason::ShiftTooShort) => "shift too short",
            BreakOrigin::Skipped(SkipReason::NoSlot) => "no slot",
        }
    }
}

/// Résultat pour un membre : une fenêtre [start, end) ou rien.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakAssignment {
    pub staff_name: String,
    pub break_start: Option<NaiveDateTime>,
    pub break_end: Option<NaiveDateTime>,
    pub origin: BreakOrigin,
}

impl BreakAssignment {
    pub fn none<S: Into<String>>(staff_name: S, reason: SkipReason) -> Self {
        Self {
            staff_name: staff_name.into(),
            break_start: None,
            break_end: None,
            origin: BreakOrigin::Skipped(reason),
        }
    }

    pub fn window<S: Into<String>>(
        staff_name: S,
        start: NaiveDateTime,
        end: NaiveDateTime,
        origin: BreakOrigin,
    ) -> Self {
        Self {
            staff_name: staff_name.into(),
            break_start: Some(start),
            break_end: Some(end),
            origin,
        }
    }

    pub fn has_break(&self) -> bool {
        self.bounds().is_some()
    }

    pub fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.break_start.zip(self.break_end)
    }

    /// Durée en minutes (0 sans pause).
    pub fn duration_minutes(&self) -> i64 {
        self.bounds()
            .map(|(start, end)| (end - start).num_minutes())
            .unwrap_or(0)
    }
}
