use crate::core::config::{Config, ExtractorConfig};
use crate::core::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docsift - Incremental text cache and search for DOCX/PDF documents
#[derive(Parser, Debug)]
#[command(name = "docsift")]
#[command(about = "Caches the text of DOCX/PDF documents next to them and searches it", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Extractor command; the document path is appended (default: "tika --text")
    #[arg(long, global = true, value_name = "CMD")]
    pub extractor: Option<String>,

    /// Configuration file (default: ~/.docsift/config.json when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show progress logs and the extractor's own diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract text from new or changed documents into sidecar cache files
    #[command(visible_alias = "refresh")]
    Index {
        /// Directory to index (default: current directory)
        path: Option<PathBuf>,
        /// Re-extract every document, even when its cache is up to date
        #[arg(short, long)]
        force: bool,
    },
    /// List cache files whose text contains the query (case-insensitive)
    Search {
        /// Text to look for
        query: String,
        /// Directory to search (default: current directory)
        path: Option<PathBuf>,
    },
}

impl Cli {
    /// Load the configuration file and apply command-line overrides
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(command_line) = &self.extractor {
            config.extractor.command = ExtractorConfig::parse_command(command_line)?;
        }
        if self.verbose {
            config.extractor.verbose = true;
        }
        config.validate()?;
        Ok(config)
    }
}
