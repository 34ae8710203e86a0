use crate::scheduler::util::{format_hm, hm};
use crate::scheduler::BreakPlan;
use chrono::{NaiveDateTime, NaiveTime};
use unicode_width::UnicodeWidthStr;

/// Fenêtre d'affichage par défaut (08:00–18:00).
pub fn default_window() -> (NaiveTime, NaiveTime) {
    (hm(8, 0), hm(18, 0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarKind {
    Shift,
    Break,
}

/// Segment affiché, déjà borné à la fenêtre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub kind: BarKind,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Horaires réels, même si la barre est rognée.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRow {
    pub staff_name: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
    pub rows: Vec<TimelineRow>,
}

fn label(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{}–{}", format_hm(start), format_hm(end))
}

fn clipped_bar(
    kind: BarKind,
    start: NaiveDateTime,
    end: NaiveDateTime,
    window: (NaiveDateTime, NaiveDateTime),
) -> Option<Bar> {
    let (lo, hi) = window;
    let (s, e) = (start.max(lo), end.min(hi));
    (s < e).then(|| Bar {
        kind,
        start: s,
        end: e,
        label: label(start, end),
    })
}

/// Une ligne par membre : barre de service, puis barre de pause éventuelle.
pub fn build_timeline(plan: &BreakPlan, window_start: NaiveTime, window_end: NaiveTime) -> Timeline {
    let window = (plan.date.and_time(window_start), plan.date.and_time(window_end));
    let rows = plan
        .entries
        .iter()
        .map(|entry| {
            let shift_start = plan.date.and_time(entry.record.shift_start);
            let shift_end = plan.date.and_time(entry.record.shift_end);
            let mut bars: Vec<Bar> = clipped_bar(BarKind::Shift, shift_start, shift_end, window)
                .into_iter()
                .collect();
            if let Some((s, e)) = entry.assignment.bounds() {
                bars.extend(clipped_bar(BarKind::Break, s, e, window));
            }
            TimelineRow {
                staff_name: entry.record.staff_name.clone(),
                bars,
            }
        })
        .collect();
    Timeline {
        window_start: window.0,
        window_end: window.1,
        rows,
    }
}

/// Permet de changer le rendu (texte, HTML, etc.).
pub trait TimelineRenderer {
    fn render(&self, timeline: &Timeline) -> String;
}

/// Rendu texte : `#` service, `.` pause, une colonne par tranche de temps.
#[derive(Debug, Clone, Copy)]
pub struct TextTimeline {
    pub width: usize,
}

impl Default for TextTimeline {
    fn default() -> Self {
        Self { width: 40 }
    }
}

impl TextTimeline {
    fn cell(&self, row: &TimelineRow, at: NaiveDateTime) -> char {
        let covers = |kind: BarKind| {
            row.bars
                .iter()
                .any(|b| b.kind == kind && b.start <= at && at < b.end)
        };
        if covers(BarKind::Break) {
            '.'
        } else if covers(BarKind::Shift) {
            '#'
        } else {
            ' '
        }
    }
}

impl TimelineRenderer for TextTimeline {
    fn render(&self, timeline: &Timeline) -> String {
        let width = self.width.max(1);
        let span = (timeline.window_end - timeline.window_start).num_seconds().max(0);
        let name_width = timeline
            .rows
            .iter()
            .map(|r| UnicodeWidthStr::width(r.staff_name.as_str()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let start = format_hm(timeline.window_start);
        let end = format_hm(timeline.window_end);
        let gap = width.saturating_sub(start.len() + end.len());
        out.push_str(&format!(
            "{:name_width$} | {start}{:gap$}{end} |\n",
            "", ""
        ));

        for row in &timeline.rows {
            let pad = name_width - UnicodeWidthStr::width(row.staff_name.as_str());
            let track: String = (0..width)
                .map(|i| {
                    let offset = span * i as i64 / width as i64;
                    self.cell(row, timeline.window_start + chrono::Duration::seconds(offset))
                })
                .collect();
            let labels: Vec<&str> = row.bars.iter().map(|b| b.label.as_str()).collect();
            out.push_str(&format!(
                "{}{:pad$} | {track} | {}\n",
                row.staff_name,
                "",
                labels.join(" / ")
            ));
        }
        out
    }
}
