//! Workbook writer: one sheet per period with a styled, banded table region
//! and columns fit to content.

use crate::error::ExportError;
use crate::normalize::CanonicalRecord;
use crate::stats::UsageRecord;
use rust_xlsxwriter::{Table, TableColumn, TableStyle, Workbook, Worksheet, XlsxError};
use std::collections::BTreeMap;
use std::path::Path;

const SHEET_NAME_MAX: usize = 31;
const SHEET_ILLEGAL: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Write the raw flat rows, one sheet per period (`model`, `usage_count`).
pub fn write_raw_workbook(records: &[UsageRecord], path: &Path) -> Result<(), ExportError> {
    let mut grouped: BTreeMap<&str, Vec<&UsageRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.period.as_str()).or_default().push(record);
    }

    let mut workbook = Workbook::new();
    for (period, rows) in &grouped {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name(period))?;
        for (i, row) in rows.iter().enumerate() {
            let at = i as u32 + 1;
            worksheet.write(at, 0, row.model.as_str())?;
            worksheet.write(at, 1, row.usage_count)?;
        }
        add_table(worksheet, rows.len(), &["model", "usage_count"])?;
        worksheet.autofit();
    }

    workbook.save(path)?;
    Ok(())
}

/// Write the normalized rows, one sheet per period (`model`, `usage_count`,
/// `whitelisted` as a `T`/`F` flag). Overwrites the raw workbook in place.
pub fn write_canonical_workbook(
    records: &[CanonicalRecord],
    path: &Path,
) -> Result<(), ExportError> {
    let mut grouped: BTreeMap<&str, Vec<&CanonicalRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.period.as_str()).or_default().push(record);
    }

    let mut workbook = Workbook::new();
    for (period, rows) in &grouped {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name(period))?;
        for (i, row) in rows.iter().enumerate() {
            let at = i as u32 + 1;
            worksheet.write(at, 0, row.canonical_model.as_str())?;
            worksheet.write(at, 1, row.usage_count)?;
            worksheet.write(at, 2, if row.whitelisted { "T" } else { "F" })?;
        }
        add_table(worksheet, rows.len(), &["model", "usage_count", "whitelisted"])?;
        worksheet.autofit();
    }

    workbook.save(path)?;
    Ok(())
}

fn add_table(worksheet: &mut Worksheet, rows: usize, headers: &[&str]) -> Result<(), XlsxError> {
    let columns: Vec<TableColumn> = headers
        .iter()
        .map(|header| TableColumn::new().set_header(*header))
        .collect();
    let table = Table::new()
        .set_style(TableStyle::Medium9)
        .set_columns(&columns);

    // row 0 is the table header; the region always spans at least one data row
    let last_row = rows.max(1) as u32;
    let last_col = headers.len() as u16 - 1;
    worksheet.add_table(0, 0, last_row, last_col, &table)?;
    Ok(())
}

/// Worksheet title for a period bucket: first letter upper-cased,
/// XLSX-illegal characters replaced, truncated to the sheet-name limit.
fn sheet_name(period: &str) -> String {
    let sanitized: String = period
        .chars()
        .map(|c| if SHEET_ILLEGAL.contains(&c) { '_' } else { c })
        .collect();
    let capitalized = match sanitized.chars().next() {
        Some(first) => first.to_uppercase().collect::<String>() + &sanitized[first.len_utf8()..].to_lowercase(),
        None => "Sheet".to_string(),
    };
    capitalized.chars().take(SHEET_NAME_MAX).collect()
}
