// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! TinyDNS data file source
//!
//! TinyDNS data for a zone can live in any file, so the directory source
//! reads every visible file once and serves the combined lines to every
//! populate call afterwards.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

use crate::{
    populate::{TinyDnsSource, DEFAULT_TTL},
    types::SourceError,
    zones::ZoneSink,
};

/// File source configuration
///
/// ```rust
/// use tinyport::source::SourceConfig;
///
/// let config: SourceConfig =
///     serde_json::from_str(r#"{"id": "tinydns", "directory": "./zones"}"#).unwrap();
/// assert_eq!(config.default_ttl, 3600);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    /// Source identifier used in log output
    pub id: String,

    /// Directory holding the TinyDNS data files
    pub directory: PathBuf,

    /// TTL for lines without one (default: 3600)
    #[serde(default = "default_ttl")]
    pub default_ttl: u32,
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

impl SourceConfig {
    pub fn new(id: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            directory: directory.into(),
            default_ttl: DEFAULT_TTL,
        }
    }

    /// Read configuration from the environment
    ///
    /// * `TINYDNS_SOURCE_ID` - source identifier (default: "tinydns")
    /// * `TINYDNS_DIR` - data directory (default: "./zones")
    /// * `TINYDNS_DEFAULT_TTL` - default TTL (default: 3600)
    pub fn from_env() -> Result<Self, SourceError> {
        let id = std::env::var("TINYDNS_SOURCE_ID").unwrap_or_else(|_| "tinydns".to_string());
        let directory = std::env::var("TINYDNS_DIR").unwrap_or_else(|_| "./zones".to_string());
        let default_ttl = match std::env::var("TINYDNS_DEFAULT_TTL") {
            Ok(raw) => raw.parse().map_err(|_| {
                SourceError::InvalidConfig(format!("TINYDNS_DEFAULT_TTL is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_TTL,
        };

        let config = Self {
            id,
            directory: PathBuf::from(directory),
            default_ttl,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SourceError> {
        if self.default_ttl == 0 {
            return Err(SourceError::InvalidConfig(
                "default TTL must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Lines of every visible file in a directory, loaded once
#[derive(Debug)]
pub struct DirectoryLineSource {
    directory: PathBuf,
    cache: OnceLock<Vec<String>>,
}

impl DirectoryLineSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            cache: OnceLock::new(),
        }
    }

    /// Non-empty lines from all files, loaded on first use
    ///
    /// # Errors
    /// Returns an error if the directory or one of its files can't be read.
    /// A failed load is retried on the next call.
    pub fn lines(&self) -> Result<&[String], SourceError> {
        if let Some(lines) = self.cache.get() {
            return Ok(lines.as_slice());
        }

        let lines = self.load()?;
        Ok(self.cache.get_or_init(|| lines).as_slice())
    }

    fn load(&self) -> Result<Vec<String>, SourceError> {
        let io_error = |path: &Path, source: std::io::Error| SourceError::Io {
            path: path.display().to_string(),
            source,
        };

        let mut paths = Vec::new();
        let entries = std::fs::read_dir(&self.directory)
            .map_err(|e| io_error(self.directory.as_path(), e))?;
        for entry in entries {
            let entry = entry.map_err(|e| io_error(self.directory.as_path(), e))?;
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let path = entry.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut lines = Vec::new();
        for path in &paths {
            let content =
                std::fs::read_to_string(path).map_err(|e| io_error(path.as_path(), e))?;
            let before = lines.len();
            lines.extend(
                content
                    .split('\n')
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            );
            debug!("loaded {} lines from {}", lines.len() - before, path.display());
        }

        Ok(lines)
    }
}

/// TinyDNS importer reading its data from a directory
#[derive(Debug)]
pub struct TinyDnsFileSource {
    source: TinyDnsSource,
    lines: DirectoryLineSource,
}

impl TinyDnsFileSource {
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        config.validate()?;
        debug!(
            "new: id={}, directory={}, default_ttl={}",
            config.id,
            config.directory.display(),
            config.default_ttl
        );

        Ok(Self {
            source: TinyDnsSource::new(config.id, config.default_ttl),
            lines: DirectoryLineSource::new(config.directory),
        })
    }

    pub fn id(&self) -> &str {
        self.source.id()
    }

    /// Import this source's data into `zone`
    pub fn populate<Z: ZoneSink + ?Sized>(&self, zone: &mut Z) -> Result<usize, SourceError> {
        let lines = self.lines.lines()?;
        Ok(self.source.populate(zone, lines)?)
    }
}
