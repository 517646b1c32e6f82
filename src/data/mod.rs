//! Feed sources: FRED graph CSV download and local files.

pub mod fred;

pub use fred::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can produce the raw feed text for one run.
pub trait FeedSource {
    /// Human-readable origin (URL or path) for logs.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<String, FetchError>;
}

/// Reads a previously downloaded CSV from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, FetchError> {
        std::fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn file_source_reads_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "observation_date,ICSA\n2025-01-04,211000\n").unwrap();

        let source = FileSource::new(file.path());
        let raw = source.fetch().unwrap();
        assert!(raw.starts_with("observation_date,ICSA"));
    }

    #[test]
    fn missing_file_is_a_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("nope.csv"));
        let err = source.fetch().unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }
}
