use crate::io::NO_BREAK;
use crate::scheduler::util::format_hm;
use crate::scheduler::BreakPlan;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, FormatAlign, Table, TableColumn, TableStyle, Workbook};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const HEADERS: [&str; 3] = ["Staff", "Break start", "Break end"];

/// Nom de la feuille et du tableau Excel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XlsxOptions {
    pub sheet_name: String,
    pub table_name: String,
}

impl Default for XlsxOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Schedule".to_string(),
            table_name: "Schedule".to_string(),
        }
    }
}

/// Lignes exportées : nom, début, fin (`-` sans pause ou ligne rejetée).
pub fn plan_rows(plan: &BreakPlan) -> Vec<[String; 3]> {
    plan.staff_breaks()
        .into_iter()
        .map(|(name, window)| match window {
            Some((start, end)) => [name.to_string(), format_hm(start), format_hm(end)],
            None => [
                name.to_string(),
                NO_BREAK.to_string(),
                NO_BREAK.to_string(),
            ],
        })
        .collect()
}

/// Largeur d'affichage par colonne, en-têtes compris.
pub fn column_widths(rows: &[[String; 3]]) -> [usize; 3] {
    let mut widths = HEADERS.map(|h| UnicodeWidthStr::width(h));
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }
    widths
}

/// Export XLSX : tableau stylé, cellules centrées, colonnes à largeur auto.
pub fn export_plan_xlsx<P: AsRef<Path>>(path: P, plan: &BreakPlan, opts: &XlsxOptions) -> Result<()> {
    let path = path.as_ref();
    let rows = plan_rows(plan);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(opts.sheet_name.as_str())
        .with_context(|| format!("invalid sheet name: {}", opts.sheet_name))?;

    if rows.is_empty() {
        worksheet.write(0, 0, "No data available")?;
        workbook
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "empty schedule exported");
        return Ok(());
    }

    let centered = Format::new().set_align(FormatAlign::Center);

    for (r, row) in rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            worksheet.write_string_with_format(r, c as u16, cell.as_str(), &centered)?;
        }
    }

    let columns: Vec<TableColumn> = HEADERS
        .iter()
        .map(|h| {
            TableColumn::new()
                .set_header(*h)
                .set_header_format(centered.clone())
                .set_format(centered.clone())
        })
        .collect();
    let table = Table::new()
        .set_name(opts.table_name.as_str())
        .set_style(TableStyle::Medium9)
        .set_banded_rows(true)
        .set_columns(&columns);
    worksheet.add_table(0, 0, rows.len() as u32, (HEADERS.len() - 1) as u16, &table)?;

    for (c, w) in column_widths(&rows).iter().enumerate() {
        worksheet.set_column_width(c as u16, *w as f64 + 2.0)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "schedule exported");
    Ok(())
}
