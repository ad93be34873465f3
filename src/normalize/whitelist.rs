use crate::error::WhitelistError;
use std::path::Path;

/// One row of the curated model list.
#[derive(Debug, Clone)]
pub struct WhitelistEntry {
    /// Full identifier as listed, possibly path-prefixed.
    pub name: String,
    /// Trailing path segment, the matching/display form.
    pub short: String,
    short_lower: String,
}

/// Curated list of known-good model identifiers, kept in file order.
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    entries: Vec<WhitelistEntry>,
}

impl Whitelist {
    /// Load the whitelist if the file exists.
    ///
    /// A missing file is not an error: normalization degrades to
    /// cleaning-only mode. A present file without a `name` column, or with
    /// an empty `name` cell, fails the run — silently skipping rows would
    /// corrupt canonicalization.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, WhitelistError> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    pub fn load(path: &Path) -> Result<Self, WhitelistError> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();
        let name_idx = headers
            .iter()
            .position(|h| h == "name")
            .ok_or(WhitelistError::MissingNameColumn)?;

        let mut entries = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let name = record.get(name_idx).unwrap_or("").trim();
            if name.is_empty() {
                // header line is row 1, data starts at row 2
                return Err(WhitelistError::EmptyName { row: i + 2 });
            }
            entries.push(WhitelistEntry::new(name));
        }

        Ok(Self { entries })
    }

    /// Build a whitelist from full identifiers, preserving order.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: names
                .into_iter()
                .map(|name| WhitelistEntry::new(name.as_ref()))
                .collect(),
        }
    }

    /// Map a raw short name to its whitelisted spelling, if any entry's
    /// short name is a case-insensitive suffix of it.
    ///
    /// Entries are scanned in file order and the first hit wins, so a name
    /// matching several entries resolves deterministically
    /// (first-inserted-wins).
    #[must_use]
    pub fn match_suffix(&self, short: &str) -> Option<&str> {
        let lower = short.to_lowercase();
        self.entries
            .iter()
            .find(|entry| lower.ends_with(&entry.short_lower))
            .map(|entry| entry.short.as_str())
    }

    #[must_use]
    pub fn entries(&self) -> &[WhitelistEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WhitelistEntry {
    fn new(name: &str) -> Self {
        let short = name.rsplit('/').next().unwrap_or(name).to_string();
        Self {
            name: name.to_string(),
            short_lower: short.to_lowercase(),
            short,
        }
    }
}
