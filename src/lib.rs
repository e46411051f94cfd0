// Core functionality
pub mod core {
    pub mod config;
    pub mod error;
}

// Cache records and staleness
pub mod storage {
    pub mod record;
    pub mod state;
}

// Indexing pipeline
pub mod indexing {
    pub mod discovery;
    pub mod extractor;
    pub mod indexer;
}

// Search
pub mod search {
    pub mod searcher;
}

// User interfaces
pub mod ui {
    pub mod cli;
}

// Re-export commonly used types
pub use crate::core::config::{Config, ExtractorConfig};
pub use crate::core::error::{Error, Result};
pub use crate::indexing::discovery::cache_path_for;
pub use crate::indexing::extractor::{CommandExtractor, ContentExtractor};
pub use crate::indexing::indexer::{FileOutcome, FileReport, IndexReport, Indexer};
pub use crate::search::searcher::{SearchResults, Searcher};
pub use crate::storage::record::{decode_content, escape, unescape, CacheRecord};
pub use crate::storage::state::{get_file_metadata, get_file_modified_time, is_stale};
pub use crate::ui::cli::Cli;
