//! Where the raw dataset bytes come from.
//!
//! The ingestor only needs the whole file as bytes, so every source is a
//! single fetch: an HTTP download, a local file, or a buffer already in
//! memory.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::IngestError;

/// A location the raw CSV dataset can be fetched from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable description for log messages (a URL or path).
    fn describe(&self) -> String;

    /// Fetches the complete raw dataset.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] if the dataset cannot be retrieved.
    async fn fetch(&self) -> Result<Vec<u8>, IngestError>;
}

/// Downloads the dataset over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    /// Creates a source for the CSV at `url`.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
        }
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>, IngestError> {
        let body = reqwest::get(&self.url)
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec();

        log::debug!("Fetched {} bytes of CSV from {}", body.len(), self.url);
        Ok(body)
    }
}

/// Reads the dataset from a local file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, IngestError> {
        let bytes = tokio::fs::read(&self.path).await?;
        log::debug!("Read {} bytes from {}", bytes.len(), self.path.display());
        Ok(bytes)
    }
}

/// Serves a dataset already held in memory.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    label: String,
    bytes: Vec<u8>,
}

impl InMemorySource {
    /// Creates a source over `bytes`, labelled `label` in log messages.
    #[must_use]
    pub fn new(label: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.to_owned(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl DatasetSource for InMemorySource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>, IngestError> {
        Ok(self.bytes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_source_reads_bytes() {
        let path = std::env::temp_dir().join("energy_map_file_source_test.csv");
        std::fs::write(&path, "Ref ID\n1\n").unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.fetch().await.unwrap(), b"Ref ID\n1\n");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let source = FileSource::new("/nonexistent/energy_map/repd.csv");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
    }

    #[test]
    fn http_source_describes_its_url() {
        let source = HttpSource::new("http://localhost/repd.csv");
        assert_eq!(source.describe(), "http://localhost/repd.csv");
    }
}
