//! Popular-tag automation: rank models per period and rewrite the
//! whitelist's `tags` column from top-N membership.

use crate::error::{ExportError, HordeError, WhitelistError};
use crate::stats::UsageRecord;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Top-N records per period, usage-descending, ties broken by name.
#[must_use]
pub fn top_models(records: &[UsageRecord], n: usize) -> BTreeMap<String, Vec<UsageRecord>> {
    let mut per_period: BTreeMap<String, Vec<&UsageRecord>> = BTreeMap::new();
    for record in records {
        per_period
            .entry(record.period.clone())
            .or_default()
            .push(record);
    }

    per_period
        .into_iter()
        .map(|(period, mut rows)| {
            rows.sort_by(|a, b| {
                b.usage_count
                    .cmp(&a.usage_count)
                    .then_with(|| a.model.cmp(&b.model))
            });
            let top: Vec<UsageRecord> = rows.into_iter().take(n).cloned().collect();
            (period, top)
        })
        .collect()
}

/// Write the per-period rankings as a flat summary CSV.
pub fn write_top_csv(
    top: &BTreeMap<String, Vec<UsageRecord>>,
    path: &Path,
) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for rows in top.values() {
        for row in rows {
            writer.serialize(row)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Rewrite the whitelist's `tags` column in place: each row gets the
/// comma-joined `top-<period>` tags of every period whose top-N set
/// contains the row's full `name`. Other columns and row order are kept;
/// a missing `tags` column is appended. Returns the number of tagged rows.
pub fn apply_tags(
    whitelist_path: &Path,
    top: &BTreeMap<String, Vec<UsageRecord>>,
) -> Result<usize, HordeError> {
    let mut reader = csv::Reader::from_path(whitelist_path).map_err(WhitelistError::Read)?;
    let headers = reader.headers().map_err(WhitelistError::Read)?.clone();
    let name_idx = headers
        .iter()
        .position(|h| h == "name")
        .ok_or(WhitelistError::MissingNameColumn)?;
    let tags_idx = headers.iter().position(|h| h == "tags");

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record.map_err(WhitelistError::Read)?);
    }
    drop(reader);

    let top_sets: BTreeMap<&str, HashSet<&str>> = top
        .iter()
        .map(|(period, records)| {
            let names: HashSet<&str> = records.iter().map(|r| r.model.as_str()).collect();
            (period.as_str(), names)
        })
        .collect();

    let mut out_headers: Vec<&str> = headers.iter().collect();
    let tags_at = match tags_idx {
        Some(at) => at,
        None => {
            out_headers.push("tags");
            out_headers.len() - 1
        }
    };

    let mut writer = csv::Writer::from_path(whitelist_path).map_err(ExportError::Csv)?;
    writer.write_record(&out_headers).map_err(ExportError::Csv)?;

    let mut tagged = 0;
    for row in &rows {
        let name = row.get(name_idx).unwrap_or("");
        let tags: Vec<String> = top_sets
            .iter()
            .filter(|(_, names)| names.contains(name))
            .map(|(period, _)| format!("top-{period}"))
            .collect();
        if !tags.is_empty() {
            tagged += 1;
        }

        let mut fields: Vec<String> = row.iter().map(ToString::to_string).collect();
        let joined = tags.join(",");
        if tags_at < fields.len() {
            fields[tags_at] = joined;
        } else {
            fields.resize(tags_at, String::new());
            fields.push(joined);
        }
        writer.write_record(&fields).map_err(ExportError::Csv)?;
    }
    writer.flush().map_err(ExportError::Io)?;

    Ok(tagged)
}
