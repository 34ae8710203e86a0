use super::util::{on_date, parse_hm};
use crate::model::ShiftRecord;
use chrono::{NaiveDate, NaiveDateTime};

/// Lecture de la saisie manuelle d'une ligne.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ManualBreak {
    /// Aucune saisie, ou une seule des deux bornes renseignée.
    Absent,
    Malformed,
    Window(NaiveDateTime, NaiveDateTime),
}

fn filled(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

pub(super) fn read_manual(record: &ShiftRecord, date: NaiveDate) -> ManualBreak {
    let start = filled(record.manual_break_start.as_deref());
    let end = filled(record.manual_break_end.as_deref());
    let (Some(start), Some(end)) = (start, end) else {
        return ManualBreak::Absent;
    };
    match (parse_hm(start), parse_hm(end)) {
        (Some(s), Some(e)) => ManualBreak::Window(on_date(date, s), on_date(date, e)),
        _ => ManualBreak::Malformed,
    }
}
