use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `hordestat`.
///
/// Each pipeline stage defines its own error variant. Library callers can
/// match on these to decide recovery strategy; the binary glue continues to
/// use `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum HordeError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Fetch ────────────────────────────────────────────────────────────
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),

    // ── Whitelist ────────────────────────────────────────────────────────
    #[error("whitelist: {0}")]
    Whitelist(#[from] WhitelistError),

    // ── Export ───────────────────────────────────────────────────────────
    #[error("export: {0}")]
    Export(#[from] ExportError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Fetch errors ────────────────────────────────────────────────────────────

/// All fetch failures are fatal: the run aborts before writing anything.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("endpoint {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("response did not decode as period/model usage counts: {0}")]
    Decode(#[source] reqwest::Error),
}

// ─── Whitelist errors ────────────────────────────────────────────────────────

/// A missing whitelist file is not an error (the pipeline degrades to
/// cleaning-only mode); a present-but-malformed one fails the run.
#[derive(Debug, Error)]
pub enum WhitelistError {
    #[error("failed to read whitelist: {0}")]
    Read(#[from] csv::Error),

    #[error("whitelist has no `name` column")]
    MissingNameColumn,

    #[error("whitelist row {row} has an empty `name` value")]
    EmptyName { row: usize },
}

// ─── Export errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, HordeError>;
