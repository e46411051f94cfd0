use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extension used for cache records written next to each document
pub const DEFAULT_CACHE_EXTENSION: &str = "json";

/// Document formats recognized by default (Word and PDF)
pub const DEFAULT_DOCUMENT_EXTENSIONS: [&str; 2] = ["docx", "pdf"];

/// Settings handed to the content extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Program followed by its arguments; the document path is appended last
    pub command: Vec<String>,
    /// Let the extractor write its own diagnostics to stderr
    pub verbose: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            command: vec!["tika".to_string(), "--text".to_string()],
            verbose: false,
        }
    }
}

impl ExtractorConfig {
    /// Parse a whitespace separated command line such as `pdftotext -q`
    pub fn parse_command(command_line: &str) -> Result<Vec<String>> {
        let parts: Vec<String> = command_line
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if parts.is_empty() {
            return Err(Error::Config("Extractor command is empty".to_string()));
        }
        Ok(parts)
    }
}

/// Configuration for docsift
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External extractor settings
    pub extractor: ExtractorConfig,
    /// Lowercase extensions of documents to index
    pub document_extensions: Vec<String>,
    /// Extension of the sidecar cache records
    pub cache_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extractor: ExtractorConfig::default(),
            document_extensions: DEFAULT_DOCUMENT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            cache_extension: DEFAULT_CACHE_EXTENSION.to_string(),
        }
    }
}

impl Config {
    /// Get the default configuration file location
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
            .map(|home| home.join(".docsift").join("config.json"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is read
    /// when present and built-in defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Ok(default_path) if default_path.is_file() => Self::from_file(&default_path)?,
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let mut config: Config = serde_json::from_str(&raw).map_err(|e| {
            Error::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        config.normalize();
        Ok(config)
    }

    /// Check that the configuration can drive an indexing run
    pub fn validate(&self) -> Result<()> {
        if self.extractor.command.is_empty() {
            return Err(Error::Config("Extractor command is empty".to_string()));
        }
        if self.document_extensions.is_empty() {
            return Err(Error::Config("No document extensions configured".to_string()));
        }
        if self.cache_extension.is_empty() {
            return Err(Error::Config("Cache extension is empty".to_string()));
        }
        if self.is_document_extension(&self.cache_extension) {
            return Err(Error::Config(format!(
                "Cache extension '{}' collides with a document extension",
                self.cache_extension
            )));
        }
        Ok(())
    }

    /// Case-insensitive membership test against the recognized document set
    pub fn is_document_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.document_extensions.iter().any(|known| *known == ext)
    }

    fn normalize(&mut self) {
        for ext in &mut self.document_extensions {
            *ext = ext.trim_start_matches('.').to_lowercase();
        }
        self.cache_extension = self.cache_extension.trim_start_matches('.').to_lowercase();
    }
}
