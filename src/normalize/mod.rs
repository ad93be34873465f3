//! Model-name normalization: collapse noisy raw identifiers (quantization
//! variants, path prefixes, casing drift) into canonical names and
//! re-aggregate their usage counts.

pub mod whitelist;

pub use whitelist::{Whitelist, WhitelistEntry};

use crate::stats::UsageRecord;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// One aggregated row: every raw record in a period that collapsed into the
/// same canonical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalRecord {
    pub period: String,
    pub canonical_model: String,
    pub usage_count: u64,
    pub whitelisted: bool,
}

fn quant_tag_re() -> &'static Regex {
    static QUANT_TAG_RE: OnceLock<Regex> = OnceLock::new();
    QUANT_TAG_RE.get_or_init(|| {
        // separator, optional label, literal Q, optional -Int, 1-2 digits,
        // then any further separator-delimited groups to end of string
        Regex::new(r"(?i)[._-][a-z0-9]*?-?q(-int)?[0-9]{1,2}([._-][a-z0-9]+)*$")
            .expect("valid quant tag regex")
    })
}

fn suffix_keyword_re() -> &'static Regex {
    static SUFFIX_KEYWORD_RE: OnceLock<Regex> = OnceLock::new();
    SUFFIX_KEYWORD_RE.get_or_init(|| {
        Regex::new(r"(?i)[._-](imat|imatrix|i[0-9]+|b[0-9]+|c[0-9]+|ch[0-9]+|bpw|h[0-9]+|exl[0-9]+).*$")
            .expect("valid suffix keyword regex")
    })
}

/// Trailing path segment of a raw model identifier.
#[must_use]
pub fn short_name(raw: &str) -> &str {
    raw.rsplit('/').next().unwrap_or(raw)
}

/// Strip a trailing quantization tag, then any remaining known suffix
/// tokens, from a short model name. A name matching neither pattern is
/// returned unchanged, so cleaning is idempotent on its own output.
#[must_use]
pub fn strip_quant(name: &str) -> String {
    let after_quant = quant_tag_re().replace(name, "");
    suffix_keyword_re().replace(&after_quant, "").into_owned()
}

/// Canonical display name for one raw identifier, plus whether a whitelist
/// entry supplied it.
///
/// The whitelist is consulted twice: for the raw short name, and for the
/// cleaned short name — a quantized variant like `org/ModelX-Q4_0` only
/// reaches whitelist entry `ModelX` after its tag is stripped. Only when
/// both lookups miss does the cleaned name itself become canonical.
#[must_use]
pub fn canonical_name(raw: &str, whitelist: Option<&Whitelist>) -> (String, bool) {
    let short = short_name(raw);

    if let Some(list) = whitelist {
        if let Some(hit) = list.match_suffix(short) {
            return (hit.to_string(), true);
        }
    }

    let cleaned = strip_quant(short);
    if let Some(list) = whitelist {
        if let Some(hit) = list.match_suffix(&cleaned) {
            return (hit.to_string(), true);
        }
    }

    (cleaned, false)
}

/// Collapse raw records into canonical per-period rows.
///
/// Counts are summed per (period, canonical name) group and never dropped
/// or duplicated; a group is whitelisted if any member was. Within a period
/// the output is sorted by canonical name.
#[must_use]
pub fn canonicalize(
    records: &[UsageRecord],
    whitelist: Option<&Whitelist>,
) -> Vec<CanonicalRecord> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut grouped: Vec<CanonicalRecord> = Vec::new();

    for record in records {
        let (canonical, whitelisted) = canonical_name(&record.model, whitelist);
        let key = (record.period.clone(), canonical.clone());
        if let Some(&at) = index.get(&key) {
            grouped[at].usage_count += record.usage_count;
            grouped[at].whitelisted |= whitelisted;
        } else {
            index.insert(key, grouped.len());
            grouped.push(CanonicalRecord {
                period: record.period.clone(),
                canonical_model: canonical,
                usage_count: record.usage_count,
                whitelisted,
            });
        }
    }

    grouped.sort_by(|a, b| {
        a.period
            .cmp(&b.period)
            .then_with(|| a.canonical_model.cmp(&b.canonical_model))
    });
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(period: &str, model: &str, usage_count: u64) -> UsageRecord {
        UsageRecord {
            period: period.to_string(),
            model: model.to_string(),
            usage_count,
        }
    }

    #[test]
    fn short_name_drops_path_prefixes() {
        assert_eq!(short_name("org/team/ModelX"), "ModelX");
        assert_eq!(short_name("ModelX"), "ModelX");
    }

    #[test]
    fn strip_quant_removes_a_trailing_quantization_tag() {
        assert_eq!(
            strip_quant("Mixtral-8x7B-Instruct-v0.1.Q4_K_M"),
            "Mixtral-8x7B-Instruct-v0.1"
        );
        assert_eq!(strip_quant("ModelX-Q4_0"), "ModelX");
        assert_eq!(strip_quant("model-4bitQ8"), "model");
    }

    #[test]
    fn strip_quant_removes_known_suffix_keywords() {
        assert_eq!(strip_quant("model-name.iMatrix.i1"), "model-name");
        assert_eq!(strip_quant("model-name.i1-Q4_K_M"), "model-name");
        assert_eq!(strip_quant("some-model-exl2"), "some-model");
        assert_eq!(strip_quant("big-model.bpw"), "big-model");
    }

    #[test]
    fn strip_quant_leaves_clean_names_alone() {
        assert_eq!(strip_quant("Llama-3-8B-Instruct"), "Llama-3-8B-Instruct");
        assert_eq!(strip_quant("Mixtral-8x7B-Instruct-v0.1"), "Mixtral-8x7B-Instruct-v0.1");
    }

    #[test]
    fn strip_quant_is_idempotent() {
        for raw in [
            "Mixtral-8x7B-Instruct-v0.1.Q4_K_M",
            "model-name.iMatrix.i1",
            "ModelX-Q4_0",
            "already-clean",
        ] {
            let once = strip_quant(raw);
            assert_eq!(strip_quant(&once), once);
        }
    }

    #[test]
    fn whitelist_match_is_case_insensitive_and_canonicalizes_casing() {
        let whitelist = Whitelist::from_names(["llama-3-8b-instruct"]);
        let (name, whitelisted) = canonical_name("Llama-3-8B-Instruct", Some(&whitelist));
        assert_eq!(name, "llama-3-8b-instruct");
        assert!(whitelisted);
    }

    #[test]
    fn quantized_variant_reaches_the_whitelist_after_cleaning() {
        let whitelist = Whitelist::from_names(["org/ModelX"]);
        let (name, whitelisted) = canonical_name("orgA/ModelX-Q4_0", Some(&whitelist));
        assert_eq!(name, "ModelX");
        assert!(whitelisted);
    }

    #[test]
    fn unmatched_names_fall_back_to_cleaning_and_are_never_dropped() {
        let whitelist = Whitelist::from_names(["org/Unrelated"]);
        let (name, whitelisted) =
            canonical_name("some/Mixtral-8x7B-Instruct-v0.1.Q4_K_M", Some(&whitelist));
        assert_eq!(name, "Mixtral-8x7B-Instruct-v0.1");
        assert!(!whitelisted);
    }

    #[test]
    fn canonicalize_merges_variants_and_sums_counts() {
        // a quantized variant and a lowercase duplicate both collapse to ModelX
        let whitelist = Whitelist::from_names(["org/ModelX"]);
        let records = vec![
            record("day", "orgA/ModelX-Q4_0", 10),
            record("day", "orgB/modelx", 5),
        ];

        let canonical = canonicalize(&records, Some(&whitelist));

        assert_eq!(canonical.len(), 1);
        assert_eq!(canonical[0].period, "day");
        assert_eq!(canonical[0].canonical_model, "ModelX");
        assert_eq!(canonical[0].usage_count, 15);
        assert!(canonical[0].whitelisted);
    }

    #[test]
    fn without_a_whitelist_cleaning_does_not_fold_case() {
        let records = vec![
            record("day", "orgA/ModelX-Q4_0", 10),
            record("day", "orgB/modelx", 5),
        ];

        let canonical = canonicalize(&records, None);

        assert_eq!(canonical.len(), 2);
        let names: Vec<&str> = canonical.iter().map(|r| r.canonical_model.as_str()).collect();
        assert_eq!(names, vec!["ModelX", "modelx"]);
        assert!(canonical.iter().all(|r| !r.whitelisted));
    }

    #[test]
    fn canonicalize_conserves_counts_per_period() {
        let whitelist = Whitelist::from_names(["org/ModelX", "meta/Llama-3-8B-Instruct"]);
        let records = vec![
            record("day", "orgA/ModelX-Q4_0", 10),
            record("day", "orgB/modelx", 5),
            record("day", "odd/Custom-Net.Q5_K", 2),
            record("month", "llama-3-8b-instruct", 40),
            record("month", "orgB/modelx", 1),
        ];

        let canonical = canonicalize(&records, Some(&whitelist));

        for period in ["day", "month"] {
            let raw_sum: u64 = records
                .iter()
                .filter(|r| r.period == period)
                .map(|r| r.usage_count)
                .sum();
            let canonical_sum: u64 = canonical
                .iter()
                .filter(|r| r.period == period)
                .map(|r| r.usage_count)
                .sum();
            assert_eq!(raw_sum, canonical_sum, "conservation broken for {period}");
        }
    }

    #[test]
    fn canonicalize_is_idempotent_on_its_own_output() {
        let records = vec![
            record("day", "orgA/ModelX-Q4_0", 10),
            record("day", "some/Mixtral-8x7B-Instruct-v0.1.Q4_K_M", 3),
        ];

        let first = canonicalize(&records, None);
        let as_records: Vec<UsageRecord> = first
            .iter()
            .map(|r| record(&r.period, &r.canonical_model, r.usage_count))
            .collect();
        let second = canonicalize(&as_records, None);

        let first_names: Vec<&str> = first.iter().map(|r| r.canonical_model.as_str()).collect();
        let second_names: Vec<&str> = second.iter().map(|r| r.canonical_model.as_str()).collect();
        assert_eq!(first_names, second_names);
    }

    #[test]
    fn canonical_groups_are_unique_per_period() {
        let records = vec![
            record("day", "a/Same-Q4_0", 1),
            record("day", "b/Same-Q5_1", 2),
            record("month", "a/Same-Q4_0", 3),
        ];

        let canonical = canonicalize(&records, None);

        assert_eq!(canonical.len(), 2);
        assert_eq!(canonical[0].period, "day");
        assert_eq!(canonical[0].usage_count, 3);
        assert_eq!(canonical[1].period, "month");
        assert_eq!(canonical[1].usage_count, 3);
    }
}
