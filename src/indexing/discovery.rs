use crate::core::config::Config;
use crate::core::error::{Error, Result};
use ignore::{Walk, WalkBuilder};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Check that a root exists and is a directory, returning its absolute form
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    if !root.exists() {
        return Err(Error::InvalidRoot {
            path: root.to_path_buf(),
            reason: "directory does not exist".to_string(),
        });
    }

    if !root.is_dir() {
        return Err(Error::InvalidRoot {
            path: root.to_path_buf(),
            reason: "path is not a directory".to_string(),
        });
    }

    root.canonicalize().map_err(|e| Error::InvalidRoot {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Lazily yields every regular file under `root` accepted by `filter`.
///
/// Every directory is descended, hidden ones included, and ignore files are
/// not consulted. Entries that cannot be read are logged and skipped.
pub struct FileWalk<F> {
    walker: Walk,
    filter: F,
}

impl<F> Iterator for FileWalk<F>
where
    F: FnMut(&Path) -> bool,
{
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        for result in self.walker.by_ref() {
            match result {
                Ok(entry) => {
                    // Symlinked files count, symlinked directories are not descended
                    if !entry.path().is_file() {
                        continue;
                    }
                    if (self.filter)(entry.path()) {
                        return Some(entry.into_path());
                    }
                }
                Err(err) => {
                    warn!("Failed to access entry: {}", err);
                }
            }
        }
        None
    }
}

/// Walk a directory tree, keeping files accepted by `filter`
pub fn walk_files<F>(root: &Path, filter: F) -> FileWalk<F>
where
    F: FnMut(&Path) -> bool,
{
    let walker = WalkBuilder::new(root).standard_filters(false).build();
    FileWalk { walker, filter }
}

/// Check if a file is a recognized document based on extension
pub fn is_document_file(path: &Path, config: &Config) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| config.is_document_extension(ext))
        .unwrap_or(false)
}

/// Check if a file is a cache record based on extension
pub fn is_cache_file(path: &Path, config: &Config) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(&config.cache_extension))
        .unwrap_or(false)
}

/// Sibling path holding the cache record for a document
pub fn cache_path_for(document: &Path, config: &Config) -> PathBuf {
    document.with_extension(&config.cache_extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_document_file() {
        let config = Config::default();
        assert!(is_document_file(Path::new("test.docx"), &config));
        assert!(is_document_file(Path::new("test.DOCX"), &config));
        assert!(is_document_file(Path::new("test.Pdf"), &config));
        assert!(!is_document_file(Path::new("test.doc"), &config));
        assert!(!is_document_file(Path::new("test.json"), &config));
        assert!(!is_document_file(Path::new("pdf"), &config));
    }

    #[test]
    fn test_is_cache_file() {
        let config = Config::default();
        assert!(is_cache_file(Path::new("a.json"), &config));
        assert!(is_cache_file(Path::new("a.JSON"), &config));
        assert!(!is_cache_file(Path::new("a.pdf"), &config));
    }

    #[test]
    fn test_cache_path_for() {
        let config = Config::default();
        assert_eq!(
            cache_path_for(Path::new("/notes/q3.report.pdf"), &config),
            PathBuf::from("/notes/q3.report.json")
        );
        assert_eq!(
            cache_path_for(Path::new("/notes/Memo.DOCX"), &config),
            PathBuf::from("/notes/Memo.json")
        );
    }

    fn documents(root: &Path) -> Vec<PathBuf> {
        let config = Config::default();
        let root = resolve_root(root).unwrap();
        walk_files(&root, |path| is_document_file(path, &config)).collect()
    }

    #[test]
    fn test_walk_documents_nested_and_hidden() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let nested = root.join("a").join("b");
        let hidden = root.join(".archive");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(&hidden).unwrap();

        fs::write(root.join("one.docx"), "x").unwrap();
        fs::write(nested.join("two.PDF"), "x").unwrap();
        fs::write(hidden.join("three.pdf"), "x").unwrap();
        fs::write(root.join("notes.txt"), "x").unwrap();
        fs::write(root.join("one.json"), "{}").unwrap();
        // Ignore files must not hide documents
        fs::write(root.join(".gitignore"), "*.pdf\n").unwrap();

        let mut names: Vec<String> = documents(root)
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["one.docx", "three.pdf", "two.PDF"]);
    }

    #[test]
    fn test_walked_paths_are_absolute() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.pdf"), "x").unwrap();

        let files = documents(temp_dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].is_absolute());
    }

    #[test]
    fn test_resolve_root_nonexistent_directory() {
        let result = resolve_root(Path::new("/nonexistent/directory"));
        assert!(matches!(result, Err(Error::InvalidRoot { .. })));
    }

    #[test]
    fn test_resolve_root_file_instead_of_directory() {
        let temp_dir = TempDir::new().unwrap();
        let test_file = temp_dir.path().join("file.pdf");
        fs::write(&test_file, "content").unwrap();

        let result = resolve_root(&test_file);
        assert!(matches!(result, Err(Error::InvalidRoot { .. })));
    }

    #[test]
    fn test_walk_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(walk_files(temp_dir.path(), |_| true).count(), 0);
    }
}
