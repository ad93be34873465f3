use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Decoded response shape: period → raw model name → usage count.
///
/// `BTreeMap` gives deterministic iteration; anything other than a two-level
/// mapping of strings to non-negative integers is rejected at decode time.
pub type RawStats = BTreeMap<String, BTreeMap<String, u64>>;

/// One (period, raw model) observation, exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub period: String,
    pub model: String,
    pub usage_count: u64,
}
