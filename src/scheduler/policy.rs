use super::util::{hm, within};
use crate::model::BreakOrigin;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Service d'une personne, ramené à la date du planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ShiftWindow {
    pub fn length(&self) -> Duration {
        self.end - self.start
    }
}

/// Début de pause retenu par une stratégie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub start: NaiveDateTime,
    pub origin: BreakOrigin,
}

/// Stratégie de placement automatique d'une pause dans un service.
///
/// Appelée seulement quand le service est au moins aussi long que la pause ;
/// `None` signifie qu'aucun créneau ne convient.
pub trait PlacementPolicy {
    fn place(&self, shift: &ShiftWindow, duration: Duration) -> Option<Placement>;
}

/// Ancre de midi : pause au plus tôt à `anchor`, sinon centrée sur le service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiddayAnchor {
    pub anchor: NaiveTime,
}

impl Default for MiddayAnchor {
    fn default() -> Self {
        Self { anchor: hm(12, 0) }
    }
}

impl PlacementPolicy for MiddayAnchor {
    fn place(&self, shift: &ShiftWindow, duration: Duration) -> Option<Placement> {
        let anchor = shift.start.date().and_time(self.anchor);
        let preferred = shift.start.max(anchor);
        if preferred + duration <= shift.end {
            return Some(Placement {
                start: preferred,
                origin: BreakOrigin::Midday,
            });
        }

        let center = shift.start + shift.length() / 2;
        let start = center - duration / 2;
        within(start, start + duration, shift.start, shift.end).then_some(Placement {
            start,
            origin: BreakOrigin::Midpoint,
        })
    }
}

/// Grille fixe : débuts possibles tous les `step_minutes` dans
/// [window_start, window_end], on garde le candidat médian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMedian {
    pub window_start: NaiveTime,
    pub window_end: NaiveTime,
    pub step_minutes: i64,
}

impl Default for GridMedian {
    fn default() -> Self {
        Self {
            window_start: hm(9, 0),
            window_end: hm(17, 0),
            step_minutes: 30,
        }
    }
}

impl GridMedian {
    /// Candidats compatibles avec le service, dans l'ordre chronologique.
    pub fn candidates(&self, shift: &ShiftWindow, duration: Duration) -> Vec<NaiveDateTime> {
        if self.step_minutes <= 0 {
            return Vec::new();
        }
        let step = Duration::minutes(self.step_minutes);
        let date = shift.start.date();
        let last = date.and_time(self.window_end);
        let latest_start = shift.end - duration;

        let mut out = Vec::new();
        let mut t = date.and_time(self.window_start);
        while t <= last {
            if shift.start <= t && t <= latest_start {
                out.push(t);
            }
            t += step;
        }
        out
    }
}

impl PlacementPolicy for GridMedian {
    fn place(&self, shift: &ShiftWindow, duration: Duration) -> Option<Placement> {
        let candidates = self.candidates(shift, duration);
        candidates.get(candidates.len() / 2).map(|&start| Placement {
            start,
            origin: BreakOrigin::Grid,
        })
    }
}

/// Stratégie configurable (fichier de settings, CLI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Policy {
    MiddayAnchor(MiddayAnchor),
    GridMedian(GridMedian),
}

impl Default for Policy {
    fn default() -> Self {
        Policy::MiddayAnchor(MiddayAnchor::default())
    }
}

impl Policy {
    pub fn name(&self) -> &'static str {
        match self {
            Policy::MiddayAnchor(_) => "midday_anchor",
            Policy::GridMedian(_) => "grid_median",
        }
    }
}

impl PlacementPolicy for Policy {
    fn place(&self, shift: &ShiftWindow, duration: Duration) -> Option<Placement> {
        match self {
            Policy::MiddayAnchor(p) => p.place(shift, duration),
            Policy::GridMedian(p) => p.place(shift, duration),
        }
    }
}
