//! Configuration loading for bibshelf.
//! Reads bibshelf.toml from the current directory or the path in BIBSHELF_CONFIG.

use crate::parser::DuplicateKeys;
use crate::site::SiteId;
use crate::writer::WriterConfig;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "BIBSHELF_CONFIG";

/// Config file looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "bibshelf.toml";

/// Settings from `bibshelf.toml`; every key is optional
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Citation file
    #[serde(default = "default_citations")]
    pub citations: PathBuf,
    /// Metadata file
    #[serde(default = "default_metadata")]
    pub metadata: PathBuf,
    /// Site whose page data the export writes
    #[serde(default)]
    pub default_site: Option<SiteId>,
    /// Repeated citation key policy
    #[serde(default)]
    pub duplicate_keys: DuplicateKeys,
    /// Query server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Static export settings
    #[serde(default)]
    pub export: ExportConfig,
}

fn default_citations() -> PathBuf { PathBuf::from("contents/references.bib") }
fn default_metadata()  -> PathBuf { PathBuf::from("contents/custom_info.yaml") }

/// `[server]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:3000".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

/// `[export]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the data files are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// Indent the JSON
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_out_dir() -> PathBuf { PathBuf::from("static/data") }
fn default_pretty()  -> bool    { true }

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            pretty: default_pretty(),
        }
    }
}

impl ExportConfig {
    /// Writer settings for the export files
    #[must_use]
    pub fn writer(&self) -> WriterConfig {
        WriterConfig {
            pretty: self.pretty,
            ..WriterConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            citations: default_citations(),
            metadata: default_metadata(),
            default_site: None,
            duplicate_keys: DuplicateKeys::default(),
            server: ServerConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration.
    /// An explicit path must exist. Otherwise checks BIBSHELF_CONFIG, then
    /// bibshelf.toml in the current directory, and falls back to defaults
    /// when neither file is there.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let path = std::env::var(CONFIG_ENV).map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
        if path.exists() {
            Self::from_file(&path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Read and decode one config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
