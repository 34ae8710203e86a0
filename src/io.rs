use crate::model::ShiftRecord;
use crate::scheduler::util::{format_hm, parse_hm};
use crate::scheduler::BreakPlan;
use anyhow::{bail, Context};
use chrono::NaiveTime;
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Cellule "pas de pause" dans les exports.
pub const NO_BREAK: &str = "-";

const ROSTER_HEADER: [&str; 6] = [
    "staff_name",
    "shift_start",
    "shift_end",
    "break_start",
    "break_end",
    "break_required",
];

/// Import du planning depuis CSV:
/// header `staff_name,shift_start,shift_end,break_start,break_end,break_required`
pub fn import_roster_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ShiftRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("reading {}", path.display()))?;
    read_roster_csv(file)
}

pub fn read_roster_csv<R: Read>(reader: R) -> anyhow::Result<Vec<ShiftRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = line + 2;
        // un nom vide est rejeté ligne à ligne par le scheduler
        let name = rec.get(0).unwrap_or("").trim();
        let start = parse_shift_time(rec.get(1), "shift_start", row)?;
        let end = parse_shift_time(rec.get(2), "shift_end", row)?;
        let required = match rec.get(5).map(str::trim) {
            None | Some("") => false,
            Some(flag) => parse_bool(flag)
                .with_context(|| format!("row {row}: invalid break_required value for {name}"))?,
        };
        out.push(ShiftRecord {
            staff_name: name.to_string(),
            shift_start: start,
            shift_end: end,
            break_required: required,
            manual_break_start: optional_cell(rec.get(3)),
            manual_break_end: optional_cell(rec.get(4)),
        });
    }
    Ok(out)
}

fn parse_shift_time(raw: Option<&str>, column: &str, row: usize) -> anyhow::Result<NaiveTime> {
    let raw = raw.with_context(|| format!("row {row}: missing {column}"))?;
    parse_hm(raw).with_context(|| format!("row {row}: invalid {column} (expected HH:MM): {raw}"))
}

fn optional_cell(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" | "要" => Ok(true),
        "false" | "0" | "no" | "n" | "non" | "否" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Export CSV du planning d'entrée (même format que l'import).
pub fn export_roster_csv<P: AsRef<Path>>(path: P, records: &[ShiftRecord]) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    write_roster_csv(&mut buf, records)?;
    write_atomic(path, &buf)
}

pub fn write_roster_csv<W: Write>(writer: W, records: &[ShiftRecord]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(writer);
    w.write_record(ROSTER_HEADER)?;
    for r in records {
        let start = r.shift_start.format("%H:%M").to_string();
        let end = r.shift_end.format("%H:%M").to_string();
        w.write_record([
            r.staff_name.as_str(),
            start.as_str(),
            end.as_str(),
            r.manual_break_start.as_deref().unwrap_or(""),
            r.manual_break_end.as_deref().unwrap_or(""),
            if r.break_required { "true" } else { "false" },
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Pause relue depuis un export CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedBreak {
    pub staff_name: String,
    pub window: Option<(NaiveTime, NaiveTime)>,
}

/// Export CSV des pauses: header `staff,break_start,break_end` (`-` sans pause ou ligne rejetée)
pub fn export_plan_csv<P: AsRef<Path>>(path: P, plan: &BreakPlan) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    write_plan_csv(&mut buf, plan)?;
    write_atomic(path, &buf)
}

pub fn write_plan_csv<W: Write>(writer: W, plan: &BreakPlan) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(writer);
    w.write_record(["staff", "break_start", "break_end"])?;
    for (name, window) in plan.staff_breaks() {
        let (start, end) = match window {
            Some((s, e)) => (format_hm(s), format_hm(e)),
            None => (NO_BREAK.to_string(), NO_BREAK.to_string()),
        };
        w.write_record([name, start.as_str(), end.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

pub fn import_plan_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ExportedBreak>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("reading {}", path.display()))?;
    read_plan_csv(file)
}

pub fn read_plan_csv<R: Read>(reader: R) -> anyhow::Result<Vec<ExportedBreak>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = line + 2;
        let name = rec.get(0).context("missing staff")?.trim().to_string();
        let start = break_cell(rec.get(1), row)?;
        let end = break_cell(rec.get(2), row)?;
        let window = match (start, end) {
            (Some(s), Some(e)) => Some((s, e)),
            (None, None) => None,
            _ => bail!("row {row}: break for {name} has only one bound"),
        };
        out.push(ExportedBreak {
            staff_name: name,
            window,
        });
    }
    Ok(out)
}

fn break_cell(raw: Option<&str>, row: usize) -> anyhow::Result<Option<NaiveTime>> {
    match raw.map(str::trim) {
        None | Some("") | Some(NO_BREAK) => Ok(None),
        Some(s) => parse_hm(s)
            .map(Some)
            .with_context(|| format!("row {row}: invalid break time: {s}")),
    }
}

/// Export JSON du planning calculé (jolie mise en forme)
pub fn export_plan_json<P: AsRef<Path>>(path: P, plan: &BreakPlan) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(plan)?;
    write_atomic(path, &json)
}

/// Écriture atomique : fichier temporaire voisin puis renommage.
pub fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}
