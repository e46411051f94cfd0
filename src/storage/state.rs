use crate::core::error::{Error, Result};
use std::fs::Metadata;
use std::path::Path;
use std::time::SystemTime;

/// Read a file's metadata, following symlinks
pub fn get_file_metadata(path: &Path) -> Result<Metadata> {
    std::fs::metadata(path).map_err(|source| Error::MetadataUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Get a file's modification time at full filesystem precision
pub fn get_file_modified_time(path: &Path) -> Result<SystemTime> {
    get_file_metadata(path)?
        .modified()
        .map_err(|source| Error::MetadataUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

/// Decide whether a document needs to be extracted again.
///
/// A missing cache record is always stale. Otherwise the document is stale only
/// when it was modified strictly after the record; equal timestamps count as up
/// to date.
pub fn is_stale(document: &Path, cache_path: &Path) -> Result<bool> {
    let cache_modified = match std::fs::metadata(cache_path) {
        Ok(metadata) => metadata.modified().map_err(|source| Error::MetadataUnavailable {
            path: cache_path.to_path_buf(),
            source,
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(true),
        Err(source) => {
            return Err(Error::MetadataUnavailable {
                path: cache_path.to_path_buf(),
                source,
            })
        }
    };

    let document_modified = get_file_modified_time(document)?;
    Ok(document_modified > cache_modified)
}
