use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parse strict "HH:MM" (24 h).
pub fn parse_hm(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

pub fn format_hm(t: NaiveDateTime) -> String {
    t.format("%H:%M").to_string()
}

pub(super) fn on_date(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Vrai si [start, end) est non vide et contenu dans [lo, hi].
pub(super) fn within(
    start: NaiveDateTime,
    end: NaiveDateTime,
    lo: NaiveDateTime,
    hi: NaiveDateTime,
) -> bool {
    start < end && lo <= start && end <= hi
}

pub(crate) fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}
