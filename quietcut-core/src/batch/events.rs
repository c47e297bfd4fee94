//! Progress events emitted by a batch run.
//!
//! The worker sends exactly one [`BatchEvent::FileFinished`] per input file
//! (never per chunk, never fractional) and exactly one
//! [`BatchEvent::BatchFinished`] as its final message. With the sequential
//! worker, file events arrive in input order.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One message on the batch progress channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchEvent {
    /// A single input file completed (successfully or not).
    FileFinished(FileReport),
    /// The whole run finished; always the last event on the channel.
    BatchFinished(BatchReport),
}

/// Outcome of one input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// The source file this report is about.
    pub source: PathBuf,
    pub outcome: FileOutcome,
}

/// Success/failure tag for one file. A failure is local: the batch records
/// it here and continues with the remaining files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutcome {
    /// The file decoded and every chunk was written.
    Sliced {
        /// Number of chunks written.
        chunks: usize,
        /// Paths of the written chunk files, in emission order.
        outputs: Vec<PathBuf>,
    },
    /// Decode or write failed; nothing further was attempted for this file.
    Failed { error: String },
}

impl FileOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

/// Aggregated result of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Files sliced successfully.
    pub finished: usize,
    /// Files that failed to decode or write.
    pub failed: usize,
    /// True when the run ended early because of a stop request.
    pub stopped: bool,
    /// Per-file reports in processing order.
    pub files: Vec<FileReport>,
}
