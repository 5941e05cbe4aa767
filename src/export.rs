use crate::models::ReportRow;
use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use clap::ValueEnum;
use rust_xlsxwriter::{Table, TableColumn, TableStyle, Workbook};
use serde::Deserialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const SHEET_TITLE: &str = "MFA Report";

/// Export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Json => "json",
        }
    }
}

/// `mfa_report_<tenant>_<YYYYMMDD>_<HH>_<MM>_<SS>.<ext>`
pub fn report_filename<Tz: TimeZone>(
    tenant_name: &str,
    started_at: &DateTime<Tz>,
    format: ExportFormat,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    // Tenant display names are free text, keep only filename-safe characters
    let tenant: String = tenant_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "mfa_report_{}_{}.{}",
        tenant,
        started_at.format("%Y%m%d_%H_%M_%S"),
        format.extension()
    )
}

/// Export report rows to a file
pub fn export_report(rows: &[ReportRow], format: ExportFormat, path: &Path) -> Result<String> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let result = match format {
        ExportFormat::Xlsx => export_to_xlsx(rows, path),
        ExportFormat::Json => export_to_json(rows, path),
    };
    result.with_context(|| format!("Failed to write report {}", path.display()))?;

    Ok(path.to_string_lossy().to_string())
}

fn export_to_xlsx(rows: &[ReportRow], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_TITLE)?;

    for (i, row) in rows.iter().enumerate() {
        let excel_row = (i + 1) as u32;
        for (col, cell) in row.cells().iter().enumerate() {
            worksheet.write_string(excel_row, col as u16, *cell)?;
        }
    }

    let columns: Vec<TableColumn> = ReportRow::COLUMNS
        .iter()
        .map(|name| TableColumn::new().set_header(*name))
        .collect();
    let table = Table::new()
        .set_name(SHEET_TITLE.replace(' ', "_").to_lowercase())
        .set_style(TableStyle::Medium9)
        .set_banded_columns(true)
        .set_columns(&columns);

    // A table needs at least one data row, an empty report keeps a blank one
    let last_row = rows.len().max(1) as u32;
    let last_col = (ReportRow::COLUMNS.len() - 1) as u16;
    worksheet.add_table(0, 0, last_row, last_col, &table)?;
    worksheet.autofit();

    workbook.save(path)?;
    Ok(())
}

fn export_to_json(rows: &[ReportRow], path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    let json = serde_json::to_string_pretty(rows)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
