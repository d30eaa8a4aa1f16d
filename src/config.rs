//! Build configuration.
//!
//! Handles loading, validating, and merging `config.toml` from the content
//! root. Stock defaults are serialized to a TOML table and the user file is
//! merged on top, so a config file only needs the keys it overrides.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! data_file = "site.toml"       # Presentation and projects, relative to the content root
//!
//! [content]
//! posts_dir = "posts"           # Post files, relative to the content root
//! extensions = ["md", "mdx", "markdown"]
//! drafts = "hidden"             # "hidden" or "preview"
//! check_filename_slug = true    # Warn when a file name disagrees with its slug
//!
//! [processing]
//! max_threads = 4               # Max parallel parsers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::collection::Audience;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// File holding the presentation and project tables.
    pub data_file: String,
    /// Post discovery and visibility settings.
    pub content: ContentConfig,
    /// Parallel parsing settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_file: "site.toml".to_string(),
            content: ContentConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "data_file must not be empty".into(),
            ));
        }
        if self.content.posts_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content.posts_dir must not be empty".into(),
            ));
        }
        if self.content.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "content.extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self
            .content
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "content.extensions entry `{ext}` must be a bare extension like \"md\""
            )));
        }
        if self.processing.max_threads == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_threads must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Post discovery and visibility settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Directory holding post files, relative to the content root.
    pub posts_dir: String,
    /// File extensions treated as posts, matched case-insensitively.
    pub extensions: Vec<String>,
    /// Whether slug lookups may return drafts.
    pub drafts: DraftMode,
    /// Warn when a file name disagrees with its front-matter slug or date.
    pub check_filename_slug: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts_dir: "posts".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string(), "markdown".to_string()],
            drafts: DraftMode::Hidden,
            check_filename_slug: true,
        }
    }
}

impl ContentConfig {
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Draft visibility for slug lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftMode {
    /// Drafts are never returned. The default.
    #[default]
    Hidden,
    /// Drafts are returned by slug lookups, for local previews.
    Preview,
}

impl DraftMode {
    pub fn audience(self) -> Audience {
        match self {
            DraftMode::Hidden => Audience::Public,
            DraftMode::Preview => Audience::Preview,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel parsing workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Worker count for the parse pool: all cores unless `max_threads` asks
/// for fewer. Asking for more than the machine has is clamped.
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
    config.max_threads.map_or(cores, |wanted| wanted.min(cores))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Lay `overlay` over `base`.
///
/// Tables merge key by key, recursively. Any other overlay value, arrays
/// included, replaces the base value outright.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut merged), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                let value = match merged.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, replacement) => replacement,
    }
}

/// Load `config.toml` from `root`, layered over the stock defaults.
///
/// A missing file means stock defaults. Unknown keys are rejected and the
/// merged result is validated.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join(CONFIG_FILE);
    let defaults = stock_defaults_value()?;
    let merged = if path.is_file() {
        let overlay: toml::Value = toml::from_str(&fs::read_to_string(&path)?)?;
        merge_toml(defaults, overlay)
    } else {
        defaults
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# folio configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# File holding the presentation and project tables, relative to the content root.
data_file = "site.toml"

# ---------------------------------------------------------------------------
# Posts
# ---------------------------------------------------------------------------
[content]
# Directory holding post files, relative to the content root.
posts_dir = "posts"

# File extensions treated as posts (case-insensitive, no leading dot).
extensions = ["md", "mdx", "markdown"]

# Draft visibility for slug lookups:
#   "hidden"  - drafts are never returned (use for published builds)
#   "preview" - drafts are returned by slug, for local previews
# Public listings never include drafts either way.
drafts = "hidden"

# Warn when a file name disagrees with its front-matter slug or date.
check_filename_slug = true

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel parsing workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_threads = 4
"##
}
