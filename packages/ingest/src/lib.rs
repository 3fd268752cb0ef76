#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loads the REPD project dataset into memory.
//!
//! [`DatasetIngestor`] fetches the raw CSV once from a [`DatasetSource`],
//! normalizes every row into an [`EnergyProject`], and hands out the cached
//! collection on every later call. Ingestion is best-effort: malformed rows
//! produce [`RowWarning`]s, not errors. Only a failure to fetch the dataset
//! (or a file with no header row) fails the load.

pub mod config;
pub mod normalize;
pub mod source;

use std::sync::{Arc, OnceLock};

use energy_map_project_models::EnergyProject;

use crate::normalize::{RawRow, normalize_row_with_issues};
use crate::source::DatasetSource;

/// Errors that can occur while loading the dataset.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV header row could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The dataset is structurally unusable.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what went wrong.
        message: String,
    },
}

/// A non-fatal problem with one source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    /// 1-based line in the source file, when the reader knows it.
    pub line: Option<u64>,
    /// Description of the problem.
    pub message: String,
}

impl std::fmt::Display for RowWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// The outcome of parsing a dataset: every row that could be read, plus the
/// warnings raised along the way.
#[derive(Debug, Clone, Default)]
pub struct ParsedDataset {
    /// Normalized projects, in source order.
    pub projects: Vec<EnergyProject>,
    /// Per-row warnings, in source order.
    pub warnings: Vec<RowWarning>,
}

/// Parses raw CSV bytes into normalized projects.
///
/// The first row is the header; header text is matched exactly, apart from
/// a leading byte order mark. Only lines that are completely empty are
/// skipped: a row of bare delimiters or whitespace is still a row. Rows with too few or too many cells are still normalized
/// (missing cells read as empty) and reported as warnings. A record the
/// CSV reader cannot produce at all is skipped with a warning.
///
/// # Errors
///
/// Returns [`IngestError`] if the header row cannot be read or is empty.
pub fn parse_dataset(bytes: &[u8], delimiter: u8) -> Result<ParsedDataset, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| {
            String::from_utf8_lossy(h)
                .trim_start_matches('\u{feff}')
                .to_owned()
        })
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(IngestError::Parse {
            message: "CSV file contains no header row".to_owned(),
        });
    }

    let mut parsed = ParsedDataset::default();

    for result in reader.byte_records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(csv::Position::line);
                parsed.warnings.push(RowWarning {
                    line,
                    message: format!("unreadable record skipped: {e}"),
                });
                continue;
            }
        };

        if record.len() == 1 && record.get(0).is_some_and(<[u8]>::is_empty) {
            continue;
        }

        let line = record.position().map(csv::Position::line);

        let cells: Vec<String> = record
            .iter()
            .map(|cell| String::from_utf8_lossy(cell).into_owned())
            .collect();

        if std::str::from_utf8(record.as_slice()).is_err() {
            parsed.warnings.push(RowWarning {
                line,
                message: "invalid UTF-8 replaced".to_owned(),
            });
        }

        if cells.len() != headers.len() {
            parsed.warnings.push(RowWarning {
                line,
                message: format!(
                    "expected {} fields, found {}",
                    headers.len(),
                    cells.len()
                ),
            });
        }

        let mut row = RawRow::new();
        for (i, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = cells.get(i).cloned().unwrap_or_default();
            row.insert(header.clone(), value);
        }

        let normalized = normalize_row_with_issues(&row);
        parsed
            .warnings
            .extend(normalized.issues.iter().map(|issue| RowWarning {
                line,
                message: issue.to_string(),
            }));
        parsed.projects.push(normalized.project);
    }

    Ok(parsed)
}

/// The cached result of a successful load.
#[derive(Debug)]
struct LoadedDataset {
    projects: Arc<[EnergyProject]>,
    warnings: Arc<[RowWarning]>,
}

/// Loads the dataset once and serves the cached collection afterwards.
///
/// Construct one per process and share it (e.g. behind an [`Arc`]). The
/// first successful [`load`](Self::load) populates the cache. A failed load
/// leaves it empty, so the next call fetches again. Concurrent first calls
/// may each fetch; the first to finish wins and every caller sees its
/// collection.
pub struct DatasetIngestor {
    source: Arc<dyn DatasetSource>,
    delimiter: u8,
    cache: OnceLock<LoadedDataset>,
}

impl std::fmt::Debug for DatasetIngestor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetIngestor")
            .field("source", &self.source.describe())
            .field("delimiter", &(self.delimiter as char))
            .field("ready", &self.is_ready())
            .finish()
    }
}

impl DatasetIngestor {
    /// Creates an ingestor over `source` with a comma delimiter. Nothing is
    /// fetched until [`load`](Self::load) is called.
    #[must_use]
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            source,
            delimiter: b',',
            cache: OnceLock::new(),
        }
    }

    /// Sets the field delimiter (e.g. `b'\t'` for TSV files).
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Whether the dataset has been loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Warnings from the successful load, empty before one happens.
    #[must_use]
    pub fn warnings(&self) -> Arc<[RowWarning]> {
        self.cache
            .get()
            .map_or_else(|| Arc::from(Vec::new()), |l| Arc::clone(&l.warnings))
    }

    /// Returns the canonical project collection, fetching and parsing it on
    /// the first call.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] if the dataset cannot be fetched or has no
    /// header row. The failure is not cached.
    pub async fn load(&self) -> Result<Arc<[EnergyProject]>, IngestError> {
        if let Some(loaded) = self.cache.get() {
            return Ok(Arc::clone(&loaded.projects));
        }

        let label = self.source.describe();
        log::info!("Loading dataset from {label}");

        let bytes = self.source.fetch().await.inspect_err(|e| {
            log::error!("Failed to fetch dataset from {label}: {e}");
        })?;

        let parsed = parse_dataset(&bytes, self.delimiter)?;

        if !parsed.warnings.is_empty() {
            log::warn!(
                "Dataset {label}: {} row warnings while parsing",
                parsed.warnings.len()
            );
            for warning in &parsed.warnings {
                log::debug!("[{label}] {warning}");
            }
        }

        log::info!(
            "Loaded {} projects from {label} ({} bytes)",
            parsed.projects.len(),
            bytes.len()
        );

        let loaded = LoadedDataset {
            projects: Arc::from(parsed.projects),
            warnings: Arc::from(parsed.warnings),
        };
        let projects = Arc::clone(&loaded.projects);

        if self.cache.set(loaded).is_err() {
            log::debug!("Dataset {label} was loaded concurrently; using the first result");
        }

        Ok(self
            .cache
            .get()
            .map_or(projects, |l| Arc::clone(&l.projects)))
    }
}
