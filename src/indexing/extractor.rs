use crate::core::config::ExtractorConfig;
use crate::core::error::{Error, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Turns a document into plain text
pub trait ContentExtractor {
    fn extract(&self, path: &Path) -> Result<String>;
}

impl<F> ContentExtractor for F
where
    F: Fn(&Path) -> Result<String>,
{
    fn extract(&self, path: &Path) -> Result<String> {
        self(path)
    }
}

/// Runs an external converter (Apache Tika, pdftotext, pandoc, ...) and
/// captures its standard output as the document text.
///
/// When not verbose, the converter's stderr is captured instead of shown and
/// only surfaces as part of an extraction error.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: String,
    args: Vec<String>,
    verbose: bool,
}

impl CommandExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let (program, args) = config
            .command
            .split_first()
            .ok_or_else(|| Error::Config("Extractor command is empty".to_string()))?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            verbose: config.verbose,
        })
    }

    fn failure(&self, path: &Path, message: String) -> Error {
        Error::Extraction {
            path: path.to_path_buf(),
            message,
        }
    }
}

impl ContentExtractor for CommandExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        debug!("Running {} on {}", self.program, path.display());

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(if self.verbose { Stdio::inherit() } else { Stdio::piped() })
            .output()
            .map_err(|e| self.failure(path, format!("could not run '{}': {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.lines().rev().find(|line| !line.trim().is_empty());
            let message = match detail {
                Some(line) => format!("'{}' {}: {}", self.program, output.status, line.trim()),
                None => format!("'{}' {}", self.program, output.status),
            };
            return Err(self.failure(path, message));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            self.failure(path, format!("'{}' produced non-UTF-8 text: {}", self.program, e))
        })
    }
}
