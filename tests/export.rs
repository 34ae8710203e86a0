#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime};
use pause_midi::{
    build_timeline, export::plan_rows, export_plan_xlsx, io, sample_roster, AssignOptions,
    BreakPlan, BreakScheduler, Policy, Settings, TextTimeline, TimelineRenderer, XlsxOptions,
};
use std::io::Read;
use tempfile::tempdir;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn sample_plan() -> BreakPlan {
    let date = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
    BreakScheduler::new(date, AssignOptions::default()).plan(&sample_roster())
}

#[test]
fn plan_csv_matches_snapshot() {
    let mut buf = Vec::new();
    io::write_plan_csv(&mut buf, &sample_plan()).unwrap();
    let out = String::from_utf8(buf).unwrap();
    insta::assert_snapshot!(out, @r"
    staff,break_start,break_end
    Kiosk 1,12:00,14:00
    Kiosk 2,12:00,14:00
    Part-time 1,-,-
    Part-time 2,-,-
    Part-time 3,-,-
    Part-time 4,-,-
    Shipping,12:00,14:00
    Counter 1,12:00,14:00
    Counter 2,12:00,14:00
    ");
}

#[test]
fn dash_cells_reparse_as_no_break() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.csv");
    io::export_plan_csv(&path, &sample_plan()).unwrap();

    let back = io::import_plan_csv(&path).unwrap();
    assert_eq!(back.len(), 9);
    assert_eq!(back[0].staff_name, "Kiosk 1");
    assert_eq!(back[0].window, Some((t(12, 0), t(14, 0))));
    assert_eq!(back[2].staff_name, "Part-time 1");
    assert_eq!(back[2].window, None);
}

#[test]
fn plan_csv_keeps_rejected_rows_as_dashes() {
    let date = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
    let roster = vec![
        pause_midi::ShiftRecord::new("Night", t(18, 0), t(8, 0), true),
        pause_midi::ShiftRecord::new("Day", t(8, 0), t(18, 0), true),
    ];
    let plan = BreakScheduler::new(date, AssignOptions::default()).plan(&roster);
    let mut buf = Vec::new();
    io::write_plan_csv(&mut buf, &plan).unwrap();
    insta::assert_snapshot!(String::from_utf8(buf).unwrap(), @r"
    staff,break_start,break_end
    Night,-,-
    Day,12:00,14:00
    ");
}

#[test]
fn plan_csv_rejects_half_window() {
    let data = "staff,break_start,break_end\nalice,12:00,-\n";
    assert!(io::read_plan_csv(data.as_bytes()).is_err());
}

#[test]
fn roster_csv_roundtrip_keeps_manual_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    let mut roster = sample_roster();
    roster[0] = roster[0].clone().with_manual_break("11:00", "12:00");
    io::export_roster_csv(&path, &roster).unwrap();

    let back = io::import_roster_csv(&path).unwrap();
    assert_eq!(back, roster);
}

#[test]
fn roster_csv_parses_flags_and_blank_cells() {
    let data = "\
staff_name,shift_start,shift_end,break_start,break_end,break_required
a,08:00,18:00,,,TRUE
b,09:00,12:00, , ,否
c,10:00,15:00,12:30,13:30,oui
d,10:00,15:00
";
    let recs = io::read_roster_csv(data.as_bytes()).unwrap();
    assert_eq!(recs.len(), 4);
    assert!(recs[0].break_required);
    assert_eq!(recs[0].manual_break_start, None);
    assert!(!recs[1].break_required);
    assert_eq!(recs[1].manual_break_end, None);
    assert_eq!(recs[2].manual_break_start.as_deref(), Some("12:30"));
    assert!(recs[2].break_required);
    assert!(!recs[3].break_required);
}

#[test]
fn roster_csv_keeps_blank_names_for_the_scheduler() {
    let data = "\
staff_name,shift_start,shift_end,break_start,break_end,break_required
,08:00,18:00,,,true
alice,08:00,18:00,,,true
";
    let recs = io::read_roster_csv(data.as_bytes()).unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].staff_name, "");

    let date = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
    let plan = BreakScheduler::new(date, AssignOptions::default()).plan(&recs);
    assert_eq!(plan.rejected.len(), 1);
    assert_eq!(plan.rejected[0].index, 0);
    assert_eq!(plan.entries[0].assignment.staff_name, "alice");
    assert!(plan.entries[0].assignment.has_break());
}

#[test]
fn roster_csv_rejects_bad_shift_time() {
    let data = "staff_name,shift_start,shift_end,break_start,break_end,break_required\na,8h,18:00,,,true\n";
    let err = io::read_roster_csv(data.as_bytes()).unwrap_err();
    assert!(format!("{err:#}").contains("shift_start"));
}

fn xlsx_part(path: &std::path::Path, name: &str) -> String {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut out = String::new();
    part.read_to_string(&mut out).unwrap();
    out
}

#[test]
fn xlsx_export_writes_named_table_with_every_row() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schedule.xlsx");
    let date = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
    let mut roster = sample_roster();
    roster.push(pause_midi::ShiftRecord::new("Night", t(18, 0), t(8, 0), true));
    let plan = BreakScheduler::new(date, AssignOptions::default()).plan(&roster);
    assert_eq!(plan_rows(&plan).len(), 10);

    let opts = XlsxOptions {
        sheet_name: "Pauses".into(),
        table_name: "Planning".into(),
    };
    export_plan_xlsx(&path, &plan, &opts).unwrap();

    let workbook = xlsx_part(&path, "xl/workbook.xml");
    assert!(workbook.contains(r#"name="Pauses""#));

    let table = xlsx_part(&path, "xl/tables/table1.xml");
    assert!(table.contains(r#"displayName="Planning""#));
    assert!(table.contains(r#"ref="A1:C11""#));
    assert!(table.contains("TableStyleMedium9"));
    assert!(table.contains(r#"name="Break start""#));

    let strings = xlsx_part(&path, "xl/sharedStrings.xml");
    assert!(strings.contains("<t>Kiosk 1</t>"));
    assert!(strings.contains("<t>-</t>"));
    assert!(strings.contains("<t>Night</t>"));
}

#[test]
fn xlsx_export_handles_empty_plan() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");
    let date = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
    let plan = BreakScheduler::new(date, AssignOptions::default()).plan(&[]);
    export_plan_xlsx(&path, &plan, &XlsxOptions::default()).unwrap();
    assert!(path.exists());
}

#[test]
fn export_rows_and_widths() {
    let rows = plan_rows(&sample_plan());
    assert_eq!(rows[0], ["Kiosk 1", "12:00", "14:00"]);
    assert_eq!(rows[3], ["Part-time 2", "-", "-"]);
    let widths = pause_midi::export::column_widths(&rows);
    assert_eq!(widths, [11, 11, 9]);
}

#[test]
fn json_export_contains_origins() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.json");
    io::export_plan_json(&path, &sample_plan()).unwrap();
    let json = std::fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"midday\""));
    assert!(json.contains("\"not_required\""));
    assert!(json.contains("\"break_minutes\": 120"));
}

#[test]
fn text_timeline_draws_shift_and_break() {
    let plan = sample_plan();
    let timeline = build_timeline(&plan, t(8, 0), t(18, 0));
    assert_eq!(timeline.rows.len(), 9);
    assert_eq!(timeline.rows[0].bars.len(), 2);
    assert_eq!(timeline.rows[2].bars.len(), 1);

    let text = TextTimeline { width: 20 }.render(&timeline);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(
        lines[1],
        "Kiosk 1     | ########....######## | 08:00–18:00 / 12:00–14:00"
    );
    assert_eq!(
        lines[3],
        "Part-time 1 |   ######             | 09:00–12:00"
    );
}

#[test]
fn timeline_clips_bars_to_window() {
    let date = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
    let roster = vec![pause_midi::ShiftRecord::new("night", t(6, 0), t(20, 0), false)];
    let plan = BreakScheduler::new(date, AssignOptions::default()).plan(&roster);
    let timeline = build_timeline(&plan, t(8, 0), t(18, 0));
    let bar = &timeline.rows[0].bars[0];
    assert_eq!(bar.start, date.and_time(t(8, 0)));
    assert_eq!(bar.end, date.and_time(t(18, 0)));
    assert_eq!(bar.label, "06:00–20:00");
}

#[test]
fn settings_roundtrip_and_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut settings = Settings::default();
    settings.break_hours = 1.5;
    settings.policy = Policy::GridMedian(Default::default());
    settings.save(&path).unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded, settings);
    assert_eq!(loaded.assign_options().unwrap().duration.num_minutes(), 90);

    settings.break_hours = 3.5;
    assert!(settings.validate().is_err());
    assert!(settings.save(&path).is_err());
}

#[test]
fn settings_file_may_be_partial() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.json");
    std::fs::write(&path, r#"{"break_hours": 1.0, "policy": {"kind": "grid_median", "window_start": "10:00:00", "window_end": "16:00:00", "step_minutes": 15}}"#).unwrap();
    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.max_break_hours, 3.0);
    assert_eq!(settings.xlsx, XlsxOptions::default());
    match settings.policy {
        Policy::GridMedian(g) => assert_eq!(g.step_minutes, 15),
        other => panic!("unexpected policy {other:?}"),
    }
}
