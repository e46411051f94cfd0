use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::indexing::discovery::{is_cache_file, resolve_root, walk_files, FileWalk};
use crate::storage::record::read_record_content;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

type CacheFilter = Box<dyn FnMut(&Path) -> bool>;

/// Case-insensitive substring search over cache records
pub struct Searcher {
    config: Config,
}

impl Searcher {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Start a search for `query` under `root`, or the current directory when
    /// no root is given.
    ///
    /// Nothing is read until the returned iterator is driven. Each call walks
    /// the tree again, so results always reflect the records on disk.
    pub fn search(&self, root: Option<&Path>, query: &str) -> Result<SearchResults> {
        let root = match root {
            Some(root) => resolve_root(root)?,
            None => {
                let cwd = std::env::current_dir().map_err(|e| Error::InvalidRoot {
                    path: PathBuf::from("."),
                    reason: e.to_string(),
                })?;
                resolve_root(&cwd)?
            }
        };
        debug!("Searching {} for {:?}", root.display(), query);

        let config = self.config.clone();
        let filter: CacheFilter = Box::new(move |path: &Path| is_cache_file(path, &config));

        Ok(SearchResults {
            root: root.clone(),
            files: walk_files(&root, filter),
            needle: query.to_lowercase(),
        })
    }
}

/// Lazy sequence of matching cache record paths.
///
/// Yields `Err` for records that could not be read; those never count as
/// matches and the walk carries on past them.
pub struct SearchResults {
    root: PathBuf,
    files: FileWalk<CacheFilter>,
    needle: String,
}

impl SearchResults {
    /// Absolute directory being searched
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect the matches, logging unreadable records instead of returning them
    pub fn matches_only(self) -> Vec<PathBuf> {
        self.filter_map(|result| match result {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("{}", err);
                None
            }
        })
        .collect()
    }
}

impl Iterator for SearchResults {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        for path in self.files.by_ref() {
            match read_record_content(&path) {
                Ok(content) => {
                    if content.to_lowercase().contains(&self.needle) {
                        return Some(Ok(path));
                    }
                }
                Err(err) => return Some(Err(err)),
            }
        }
        None
    }
}
