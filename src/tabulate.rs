use crate::stats::{RawStats, UsageRecord};

/// Flatten the nested per-period counts into one record per (period, model)
/// pair, preserving every pair exactly once.
///
/// Order follows the decoded map's lexicographic iteration; downstream
/// consumers establish their own order.
#[must_use]
pub fn flatten(stats: &RawStats) -> Vec<UsageRecord> {
    let mut records = Vec::new();
    for (period, models) in stats {
        for (model, usage_count) in models {
            records.push(UsageRecord {
                period: period.clone(),
                model: model.clone(),
                usage_count: *usage_count,
            });
        }
    }
    records
}
