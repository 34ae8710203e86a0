#![forbid(unsafe_code)]
//! Pause-midi — répartition des pauses de midi d'une équipe (sans BD).
//!
//! - Planning en CSV, réglages en JSON.
//! - Pause ancrée à midi ou médiane d'une grille, au choix.
//! - Saisies manuelles respectées si elles tiennent dans le service.
//! - Date du planning explicite ; aucune lecture d'horloge dans la lib.

pub mod config;
pub mod export;
pub mod io;
pub mod model;
pub mod sample;
pub mod scheduler;
pub mod timeline;

pub use config::Settings;
pub use export::{export_plan_xlsx, XlsxOptions};
pub use model::{BreakAssignment, BreakDuration, BreakOrigin, ShiftRecord, SkipReason};
pub use sample::sample_roster;
pub use scheduler::{
    AssignOptions, BreakError, BreakPlan, BreakScheduler, GridMedian, MiddayAnchor, PlacementPolicy,
    Policy,
};
pub use timeline::{build_timeline, TextTimeline, Timeline, TimelineRenderer};
