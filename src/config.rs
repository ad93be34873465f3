use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ── File names inside the data directory ──────────────────────────

const SNAPSHOT_FILE: &str = "raw_model_usage.json";
const FLAT_CSV_FILE: &str = "usage_data.csv";
const WORKBOOK_FILE: &str = "usage_data.xlsx";
const WHITELIST_FILE: &str = "models.csv";
const TOP_MODELS_FILE: &str = "top_models.csv";

/// Optional config file, looked up in the working directory.
const CONFIG_FILE: &str = "hordestat.toml";

// ── Pipeline config ───────────────────────────────────────────────

/// Process-wide configuration, passed explicitly into each stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Statistics endpoint queried once per run.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bound on the single network fetch, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory holding the whitelist input and all written artifacts.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Default per-period cutoff for the `tag` command.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_api_url() -> String {
    "https://aihorde.net/api/v2/stats/text/models".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("user-files")
}

fn default_top_n() -> usize {
    25
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            data_dir: default_data_dir(),
            top_n: default_top_n(),
        }
    }
}

impl Config {
    /// Load `hordestat.toml` from the working directory if present,
    /// otherwise fall back to compiled defaults.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Self::load_or_default_from(Path::new(CONFIG_FILE))
    }

    /// Same as [`Config::load_or_default`], but with an explicit path.
    pub fn load_or_default_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| ConfigError::Load(e.to_string()))
    }

    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE)
    }

    #[must_use]
    pub fn flat_csv_path(&self) -> PathBuf {
        self.data_dir.join(FLAT_CSV_FILE)
    }

    #[must_use]
    pub fn workbook_path(&self) -> PathBuf {
        self.data_dir.join(WORKBOOK_FILE)
    }

    #[must_use]
    pub fn whitelist_path(&self) -> PathBuf {
        self.data_dir.join(WHITELIST_FILE)
    }

    #[must_use]
    pub fn top_models_path(&self) -> PathBuf {
        self.data_dir.join(TOP_MODELS_FILE)
    }
}
