//! Ingestion configuration read from the environment.

use std::path::PathBuf;
use std::sync::Arc;

use crate::DatasetIngestor;
use crate::source::{DatasetSource, FileSource, HttpSource};

/// Dataset file used when neither `DATASET_URL` nor `DATASET_PATH` is set.
pub const DEFAULT_DATASET_PATH: &str = "data/repd-q2-jul-2025.csv";

/// Where the dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetLocation {
    /// Download over HTTP(S).
    Url(String),
    /// Read from the local filesystem.
    Path(PathBuf),
}

/// Configuration for building a [`DatasetIngestor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Where to fetch the dataset from.
    pub location: DatasetLocation,
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl IngestConfig {
    /// Creates a config for `location` with a comma delimiter.
    #[must_use]
    pub const fn new(location: DatasetLocation) -> Self {
        Self {
            location,
            delimiter: b',',
        }
    }

    /// Reads the config from the environment.
    ///
    /// `DATASET_URL` wins over `DATASET_PATH`; with neither set the dataset
    /// is read from [`DEFAULT_DATASET_PATH`]. `DATASET_DELIMITER` overrides
    /// the delimiter with its first byte.
    #[must_use]
    pub fn from_env() -> Self {
        let location = std::env::var("DATASET_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map_or_else(
                || {
                    DatasetLocation::Path(PathBuf::from(
                        std::env::var("DATASET_PATH")
                            .unwrap_or_else(|_| DEFAULT_DATASET_PATH.to_string()),
                    ))
                },
                DatasetLocation::Url,
            );

        let mut config = Self::new(location);

        if let Ok(delim) = std::env::var("DATASET_DELIMITER")
            && let Some(byte) = delim.as_bytes().first()
        {
            config = config.with_delimiter(*byte);
        }

        config
    }

    /// Sets the field delimiter (e.g. `b'\t'` for TSV files).
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builds the configured [`DatasetSource`].
    #[must_use]
    pub fn source(&self) -> Arc<dyn DatasetSource> {
        match &self.location {
            DatasetLocation::Url(url) => Arc::new(HttpSource::new(url)),
            DatasetLocation::Path(path) => Arc::new(FileSource::new(path.clone())),
        }
    }

    /// Builds an ingestor over the configured source.
    #[must_use]
    pub fn build_ingestor(&self) -> DatasetIngestor {
        DatasetIngestor::new(self.source()).with_delimiter(self.delimiter)
    }
}
