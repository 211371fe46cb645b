//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults are
//! overridden by the user's file in the site root.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── site.toml               # Optional, overrides stock defaults
//! ├── index.html              # Generated homepage
//! └── posts/
//!     ├── my-first-post/
//!     │   ├── analysis.ipynb
//!     │   └── index.html      # Generated post page
//!     └── utils.py            # Skipped (script suffix)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional except repository.name - defaults shown below
//!
//! title = "Homepage"
//! site_url = ""                 # Prefix for homepage links (empty = relative)
//! posts_dir = "posts"
//! notebook_extension = "ipynb"
//! skip_suffixes = [".sh", ".py"]
//! about_heading = "Around the Web"
//!
//! [repository]
//! name = "owner/owner.github.io"
//! branch = "master"
//!
//! [[links]]
//! text = "For more code, see my GitHub at"
//! url = "https://github.com/owner"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the site root.
pub const CONFIG_FILE: &str = "site.toml";

const VIEWER_HOST: &str = "https://colab.research.google.com/github";
const SOURCE_HOST: &str = "https://github.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Homepage `<title>`.
    pub title: String,
    /// Prefix for post links on the homepage, e.g. `https://owner.github.io/`.
    pub site_url: String,
    /// Posts root, relative to the site root.
    pub posts_dir: String,
    /// Extension (without dot) that marks a notebook file.
    pub notebook_extension: String,
    /// Entries in the posts root ending in any of these are never posts.
    pub skip_suffixes: Vec<String>,
    /// Heading above the links section of the homepage.
    pub about_heading: String,
    /// Where the notebooks are hosted.
    pub repository: RepositoryConfig,
    /// Static links shown on the homepage above the post list.
    pub links: Vec<LinkConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Homepage".to_string(),
            site_url: String::new(),
            posts_dir: "posts".to_string(),
            notebook_extension: "ipynb".to_string(),
            skip_suffixes: vec![".sh".to_string(), ".py".to_string()],
            about_heading: "Around the Web".to_string(),
            repository: RepositoryConfig::default(),
            links: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    ///
    /// An empty `repository.name` passes here so that scanning works without
    /// a config file; [`RepositoryConfig::urls`] rejects it at generate time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.posts_dir.trim().is_empty() {
            return Err(ConfigError::Validation("posts_dir must not be empty".into()));
        }
        if self.notebook_extension.trim().is_empty() {
            return Err(ConfigError::Validation(
                "notebook_extension must not be empty".into(),
            ));
        }
        if self.notebook_extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "notebook_extension is given without the leading dot".into(),
            ));
        }
        if !self.repository.name.is_empty() {
            self.repository.urls()?;
        }
        if self.links.iter().any(|l| l.url.trim().is_empty()) {
            return Err(ConfigError::Validation("links[].url must not be empty".into()));
        }
        Ok(())
    }
}

/// Hosting repository of the notebooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryConfig {
    /// `owner/repo` on GitHub.
    pub name: String,
    pub branch: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            branch: "master".to_string(),
        }
    }
}

/// Base URLs that a repository-relative notebook path is appended to.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryUrls {
    /// Interactive notebook viewer (Colab).
    pub viewer_base: String,
    /// Pre-rendered view on the hosting service.
    pub source_base: String,
}

impl RepositoryConfig {
    /// Build the viewer and source base URLs for this repository.
    pub fn urls(&self) -> Result<RepositoryUrls, ConfigError> {
        let valid = match self.name.split_once('/') {
            Some((owner, repo)) => !owner.is_empty() && !repo.is_empty() && !repo.contains('/'),
            None => false,
        };
        if !valid {
            return Err(ConfigError::Validation(format!(
                "repository.name must be \"owner/repo\", got {:?}",
                self.name
            )));
        }
        if self.branch.trim().is_empty() {
            return Err(ConfigError::Validation(
                "repository.branch must not be empty".into(),
            ));
        }
        Ok(RepositoryUrls {
            viewer_base: format!("{}/{}/blob/{}", VIEWER_HOST, self.name, self.branch),
            source_base: format!("{}/{}/tree/{}", SOURCE_HOST, self.name, self.branch),
        })
    }
}

/// One line of the homepage links section: `text` followed by a link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkConfig {
    pub text: String,
    pub url: String,
    /// Link text; the URL itself when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; anything else in `overlay` replaces the base
/// value, so arrays such as `skip_suffixes` are replaced, not appended.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `site.toml` in the site root, on top of stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# nbpress configuration
# =====================
# All settings are optional except repository.name, which `build` needs to
# link notebooks. Values shown below are the defaults.
# Unknown keys will cause an error.

# <title> of the generated homepage.
title = "Homepage"

# Prefix for post links on the homepage. Leave empty for relative links,
# or set the published address, e.g. "https://owner.github.io/".
site_url = ""

# Directory holding one sub-directory per post, relative to the site root.
posts_dir = "posts"

# Every post directory must contain exactly one file with this extension.
notebook_extension = "ipynb"

# Entries of the posts directory ending in one of these are not posts.
skip_suffixes = [".sh", ".py"]

# Heading above the links section of the homepage.
about_heading = "Around the Web"

# ---------------------------------------------------------------------------
# Notebook hosting
# ---------------------------------------------------------------------------
[repository]
# GitHub repository holding the site, as "owner/repo".
# name = "owner/owner.github.io"
branch = "master"

# ---------------------------------------------------------------------------
# Homepage links, one line each: text followed by the link.
# ---------------------------------------------------------------------------
# [[links]]
# text = "For more code, see my GitHub at"
# url = "https://github.com/owner"
# label = "GitHub"    # optional, defaults to the url
"##
}
