//! Application configuration loaded from TOML.
//!
//! ```toml
//! result_limit = 20
//! catalog_path = "/srv/catalog/jumia.json"
//! vocabulary_path = "/etc/catalog-scout/vocabulary.toml"
//!
//! [search]
//! fuzzy = true
//! min_score = 30.0
//! confident_score = 40.0
//! fetch_timeout_ms = 2000
//! ```

use std::path::{Path, PathBuf};

use scout_search::{CachedFetcher, CatalogSearch, SearchConfig, StaticCatalog, Vocabulary};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoutError};

/// Default number of records returned per search.
pub const DEFAULT_RESULT_LIMIT: usize = 20;

/// Top-level configuration for catalog-scout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Number of ranked records returned per search.
    pub result_limit: usize,
    /// JSON catalog searched when the command line names none.
    pub catalog_path: Option<PathBuf>,
    /// TOML vocabulary file. Lists it omits keep their bundled values.
    pub vocabulary_path: Option<PathBuf>,
    /// Search engine tuning.
    pub search: SearchConfig,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
            catalog_path: None,
            vocabulary_path: None,
            search: SearchConfig::default(),
        }
    }
}

impl ScoutConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ScoutError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ScoutError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/catalog-scout/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config)
                .join("catalog-scout")
                .join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("catalog-scout")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/catalog-scout/config.toml")
        }
    }

    /// Check every field, including the nested search config.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Config`] for a zero result limit, or the search
    /// config's own validation error.
    pub fn validate(&self) -> Result<()> {
        if self.result_limit == 0 {
            return Err(ScoutError::Config(
                "result_limit must be greater than 0".into(),
            ));
        }
        self.search.validate()?;
        Ok(())
    }

    /// The configured vocabulary, or the bundled one.
    ///
    /// # Errors
    ///
    /// Returns an error if `vocabulary_path` is set but cannot be loaded.
    pub fn load_vocabulary(&self) -> Result<Vocabulary> {
        match &self.vocabulary_path {
            Some(path) => load_vocabulary_file(path),
            None => Ok(Vocabulary::default()),
        }
    }

    /// Build a search engine from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the vocabulary
    /// cannot be loaded.
    pub fn build_engine(&self) -> Result<CatalogSearch> {
        self.validate()?;
        let vocabulary = self.load_vocabulary()?;
        Ok(CatalogSearch::with_vocabulary(self.search.clone(), vocabulary)?)
    }

    /// Load a JSON catalog behind a fetch cache sized by
    /// `search.cache_ttl_seconds`. A TTL of 0 queries the catalog directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or parsed.
    pub fn load_catalog(&self, path: &Path) -> Result<CachedFetcher<StaticCatalog>> {
        let catalog = StaticCatalog::from_json_file(path)?;
        Ok(CachedFetcher::from_config(catalog, &self.search))
    }
}

/// Read a vocabulary from a TOML file.
///
/// ```toml
/// deny_list = ["tracteur", "moissonneuse"]
///
/// [[synonyms]]
/// canonical = "boubou"
/// synonyms = ["grand boubou", "kaftan"]
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_vocabulary_file(path: &Path) -> Result<Vocabulary> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ScoutError::Config(format!("{}: {e}", path.display())))
}
