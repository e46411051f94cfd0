use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::indexing::discovery::{cache_path_for, is_document_file, resolve_root, walk_files};
use crate::indexing::extractor::ContentExtractor;
use crate::storage::record::CacheRecord;
use crate::storage::state::{get_file_metadata, is_stale};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What happened to a single document during an indexing run
#[derive(Debug)]
pub enum FileOutcome {
    /// Text was extracted and the cache record written
    Extracted,
    /// The cache record was newer than the document
    UpToDate,
    /// Metadata, extraction or write failed; the document stays stale
    Failed(Error),
}

/// Outcome for one document
#[derive(Debug)]
pub struct FileReport {
    pub document: PathBuf,
    pub cache_path: PathBuf,
    pub outcome: FileOutcome,
}

/// Summary of an indexing run
#[derive(Debug, Default)]
pub struct IndexReport {
    /// Absolute root that was walked
    pub root: PathBuf,
    pub files: Vec<FileReport>,
}

impl IndexReport {
    /// Number of documents considered, whether rewritten or not
    pub fn considered(&self) -> usize {
        self.files.len()
    }

    pub fn extracted(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Extracted))
    }

    pub fn up_to_date(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::UpToDate))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Failed(_)))
    }

    /// Per-document failures, in walk order
    pub fn errors(&self) -> impl Iterator<Item = (&Path, &Error)> {
        self.files.iter().filter_map(|file| match &file.outcome {
            FileOutcome::Failed(err) => Some((file.document.as_path(), err)),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|file| pred(&file.outcome)).count()
    }
}

/// Keeps the cache records under a directory tree in sync with their documents
pub struct Indexer<E> {
    config: Config,
    extractor: E,
    force: bool,
}

impl<E: ContentExtractor> Indexer<E> {
    pub fn new(config: Config, extractor: E) -> Self {
        Self {
            config,
            extractor,
            force: false,
        }
    }

    /// Re-extract every document regardless of timestamps
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Index every document under `root`
    pub fn index(&self, root: &Path) -> Result<IndexReport> {
        self.index_with(root, |_| {})
    }

    /// Index every document under `root`, handing each outcome to `on_file`
    /// as soon as it is known.
    ///
    /// Only an invalid root fails the whole run; every per-document failure is
    /// recorded in the report and the walk continues.
    pub fn index_with<F>(&self, root: &Path, mut on_file: F) -> Result<IndexReport>
    where
        F: FnMut(&FileReport),
    {
        let root = resolve_root(root)?;
        info!("Indexing documents under {}", root.display());

        let mut report = IndexReport {
            root: root.clone(),
            files: Vec::new(),
        };

        for document in walk_files(&root, |path| is_document_file(path, &self.config)) {
            let cache_path = cache_path_for(&document, &self.config);
            let outcome = match self.index_document(&document, &cache_path) {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!("{}", err);
                    FileOutcome::Failed(err)
                }
            };

            let file = FileReport {
                document,
                cache_path,
                outcome,
            };
            on_file(&file);
            report.files.push(file);
        }

        info!(
            "Indexed {} documents: {} extracted, {} up to date, {} failed",
            report.considered(),
            report.extracted(),
            report.up_to_date(),
            report.failed()
        );
        Ok(report)
    }

    fn index_document(&self, document: &Path, cache_path: &Path) -> Result<FileOutcome> {
        if !self.force && !is_stale(document, cache_path)? {
            debug!("Up to date: {}", document.display());
            return Ok(FileOutcome::UpToDate);
        }

        // Read before extracting so an edit made mid-extraction stays visible
        let metadata = get_file_metadata(document)?;
        let source_modified = metadata.modified().map_err(|source| Error::MetadataUnavailable {
            path: document.to_path_buf(),
            source,
        })?;
        let content = self.extractor.extract(document)?;

        CacheRecord::new(document, content).write_to(
            cache_path,
            source_modified,
            Some(&metadata.permissions()),
        )?;
        info!("Wrote {}", cache_path.display());
        Ok(FileOutcome::Extracted)
    }
}
