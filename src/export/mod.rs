//! Output artifacts: JSON snapshot, flat CSV, and the per-period workbook.

pub mod workbook;

pub use workbook::{write_canonical_workbook, write_raw_workbook};

use crate::error::ExportError;
use crate::stats::{RawStats, UsageRecord};
use std::fs;
use std::path::Path;

/// Write the endpoint response as pretty-printed JSON, untouched.
pub fn write_snapshot(stats: &RawStats, path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(stats)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write one CSV row per (period, model) pair.
pub fn write_flat_csv(records: &[UsageRecord], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_records() -> Vec<UsageRecord> {
        vec![
            UsageRecord {
                period: "day".into(),
                model: "org/model-a".into(),
                usage_count: 3,
            },
            UsageRecord {
                period: "month".into(),
                model: "model-b".into(),
                usage_count: 7,
            },
        ]
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut stats = RawStats::new();
        stats.insert(
            "day".into(),
            BTreeMap::from([("org/model-a".to_string(), 3_u64)]),
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        write_snapshot(&stats, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let parsed: RawStats = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, stats);
    }

    #[test]
    fn flat_csv_has_header_and_one_row_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usage.csv");
        write_flat_csv(&sample_records(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "period,model,usage_count");
        assert_eq!(lines[1], "day,org/model-a,3");
        assert_eq!(lines[2], "month,model-b,7");
        assert_eq!(lines.len(), 3);
    }
}
