//! Error types for Smriti

use thiserror::Error;

/// Smriti error type
#[derive(Error, Debug)]
pub enum SmritiError {
    /// I/O failure while reading inputs or writing reports.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset or summary JSON could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A neighbour-table line declares more candidate ids than it holds.
    #[error("neighbour table line {line}: declares {declared} candidates, found {found}")]
    NeighborCount {
        /// 1-based line number.
        line: usize,
        /// Count declared in the first field.
        declared: usize,
        /// Candidate ids actually present.
        found: usize,
    },

    /// A neighbour-table field is not a valid number.
    #[error("neighbour table line {line}: invalid field '{field}'")]
    NeighborParse {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        field: String,
    },

    /// A neighbour-table line has no count field at all, or is a blank line
    /// followed by more rows.
    #[error("neighbour table line {line}: missing header fields (truncated row or blank line)")]
    NeighborHeader {
        /// 1-based line number.
        line: usize,
    },

    /// A candidate id does not name a scan of the dataset.
    #[error("scan {query}: candidate {candidate} out of range (dataset has {scans} scans)")]
    CandidateOutOfRange {
        /// Query scan id.
        query: usize,
        /// Offending candidate id.
        candidate: usize,
        /// Number of scans.
        scans: usize,
    },

    /// The neighbour table has fewer rows than the dataset has scans.
    #[error("neighbour table has {rows} rows but dataset has {scans} scans")]
    NeighborTableTooShort {
        /// Rows parsed.
        rows: usize,
        /// Scans in the dataset.
        scans: usize,
    },

    /// A query id outside the dataset was requested.
    #[error("scan {0} out of range")]
    ScanOutOfRange(usize),
}

impl From<serde_yaml::Error> for SmritiError {
    fn from(e: serde_yaml::Error) -> Self {
        SmritiError::Config(e.to_string())
    }
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, SmritiError>;
