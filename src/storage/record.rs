use crate::core::error::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::fs::Permissions;
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;
use std::time::SystemTime;
use tempfile::NamedTempFile;

/// Matches the `content` field and captures its still-escaped string body
const CONTENT_FIELD_PATTERN: &str = r#"(?s)"content"\s*:\s*"((?:[^"\\]|\\.)*)""#;

fn content_field() -> &'static Regex {
    static CONTENT_FIELD: OnceLock<Regex> = OnceLock::new();
    CONTENT_FIELD.get_or_init(|| {
        Regex::new(CONTENT_FIELD_PATTERN).expect("content field pattern is valid")
    })
}

/// Extracted text of one document, stored as a sidecar file next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheRecord {
    /// Base name of the source document
    #[serde(rename = "originalFileName")]
    pub source_name: String,
    /// Absolute path of the source document
    #[serde(rename = "originalFilePath")]
    pub source_path: String,
    /// Plain text produced by the extractor
    pub content: String,
}

impl CacheRecord {
    /// Create a record for a document at an absolute path
    pub fn new(document: &Path, content: String) -> Self {
        Self {
            source_name: document
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            source_path: document.to_string_lossy().into_owned(),
            content,
        }
    }

    /// Serialize to the on-disk JSON form
    pub fn encode(&self) -> std::io::Result<String> {
        serde_json::to_string_pretty(self).map_err(std::io::Error::from)
    }

    /// Replace the record at `path` without ever exposing a partial file.
    ///
    /// The text goes to a temporary file in the same directory, which is synced,
    /// stamped with `modified` and then renamed over `path`. On any failure the
    /// temporary file is removed and the previous record, if any, is untouched.
    ///
    /// On unix the record takes the read/write bits of `permissions` (usually
    /// the source document's), so text from a private document stays private.
    /// Without them it keeps the temporary file's owner-only mode.
    pub fn write_to(
        &self,
        path: &Path,
        modified: SystemTime,
        permissions: Option<&Permissions>,
    ) -> Result<()> {
        let encode_error = |source: std::io::Error| Error::EncodeWrite {
            path: path.to_path_buf(),
            source,
        };

        let encoded = self.encode().map_err(encode_error)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir).map_err(encode_error)?;
        temp.write_all(encoded.as_bytes()).map_err(encode_error)?;
        temp.as_file().sync_all().map_err(encode_error)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(permissions) = permissions {
                let mode = permissions.mode() & 0o666;
                temp.as_file()
                    .set_permissions(Permissions::from_mode(mode))
                    .map_err(encode_error)?;
            }
        }
        #[cfg(not(unix))]
        let _ = permissions;

        temp.as_file().set_modified(modified).map_err(encode_error)?;
        temp.persist(path).map_err(|e| encode_error(e.error))?;
        Ok(())
    }
}

/// Escape a string so it can sit between double quotes in a JSON document
pub fn escape(s: &str) -> String {
    let quoted = serde_json::Value::String(s.to_owned()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

/// Reverse [`escape`]. Returns `None` for bodies that are not valid escapes.
pub fn unescape(s: &str) -> Option<String> {
    serde_json::from_str::<String>(&format!("\"{}\"", s)).ok()
}

/// Pull the searchable text out of a cache file.
///
/// This scans for the `content` field instead of parsing the whole document,
/// so hand-edited or foreign files still yield something: when no usable
/// `content` value is found, the raw text is returned unchanged.
pub fn decode_content(raw: &str) -> String {
    content_field()
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|body| unescape(body.as_str()))
        .unwrap_or_else(|| raw.to_string())
}

/// Read a cache file from disk and decode its content
pub fn read_record_content(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| Error::DecodeRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_content(&String::from_utf8_lossy(&bytes)))
}
