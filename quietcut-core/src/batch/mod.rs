//! Batch slicing over a list of input files.
//!
//! ## Lifecycle
//!
//! ```text
//! BatchPipeline::new(params)        → params validated, nothing running
//!     └─► start(jobs, out_dir)      → worker thread spawned, Receiver returned
//!         └─► request_stop()        → cooperative flag, honored between
//!                                     files and between chunk writes
//! ```
//!
//! One pipeline instance owns its run state exclusively for the duration of
//! a run; `start()` while a run is active returns
//! [`SliceError::AlreadyRunning`] rather than queueing.
//!
//! A file that fails to decode or write is a local failure: it is recorded
//! in the report and the worker continues with the remaining files. The
//! engine stages themselves (envelope → detect → trim → segment) are pure;
//! all I/O lives here.

pub mod events;

pub use events::{BatchEvent, BatchReport, FileOutcome, FileReport};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;

use crossbeam_channel::{unbounded, Receiver};
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::audio::wav::{read_wav, write_wav};
use crate::config::SliceParams;
use crate::engine::slice_buffer;
use crate::error::{Result, SliceError};

/// Batch orchestrator: decode → slice → encode for each input file under
/// one shared parameter set.
pub struct BatchPipeline {
    params: SliceParams,
    /// `true` while a worker thread is active.
    running: Arc<AtomicBool>,
    /// Cooperative stop flag, reset on every `start()`.
    cancel: Arc<AtomicBool>,
    /// Report of the most recently completed run.
    last_report: Arc<Mutex<Option<BatchReport>>>,
}

impl BatchPipeline {
    /// Create a pipeline. Parameters are validated here, up front — an
    /// invalid config never starts a run.
    pub fn new(params: SliceParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            running: Arc::new(AtomicBool::new(false)),
            cancel: Arc::new(AtomicBool::new(false)),
            last_report: Arc::new(Mutex::new(None)),
        })
    }

    /// Start a run over `jobs`, writing chunks to `out_dir` (created
    /// recursively if missing) or beside each source file when `None`.
    ///
    /// Returns the progress event receiver. The worker emits one
    /// `FileFinished` per input file in processing order and a final
    /// `BatchFinished`; an empty `jobs` list is a no-op run that still
    /// emits `BatchFinished`.
    ///
    /// # Errors
    /// `SliceError::AlreadyRunning` while a previous run is active.
    pub fn start(
        &self,
        jobs: Vec<PathBuf>,
        out_dir: Option<PathBuf>,
    ) -> Result<Receiver<BatchEvent>> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SliceError::AlreadyRunning);
        }
        self.cancel.store(false, Ordering::SeqCst);

        let (tx, rx) = unbounded();
        let params = self.params.clone();
        let running = Arc::clone(&self.running);
        let cancel = Arc::clone(&self.cancel);
        let last_report = Arc::clone(&self.last_report);

        let spawned = thread::Builder::new()
            .name("quietcut-batch".into())
            .spawn(move || {
                info!(files = jobs.len(), "batch started");

                let mut files = Vec::with_capacity(jobs.len());
                let mut finished = 0usize;
                let mut failed = 0usize;
                let mut stopped = false;

                for path in jobs {
                    if cancel.load(Ordering::Relaxed) {
                        stopped = true;
                        break;
                    }

                    let outcome = match slice_file(&path, &params, out_dir.as_deref(), &cancel) {
                        Ok(outputs) => {
                            finished += 1;
                            info!(
                                file = %path.display(),
                                chunks = outputs.len(),
                                "file sliced"
                            );
                            FileOutcome::Sliced {
                                chunks: outputs.len(),
                                outputs,
                            }
                        }
                        Err(e) => {
                            failed += 1;
                            warn!(file = %path.display(), error = %e, "file failed, continuing");
                            FileOutcome::Failed {
                                error: e.to_string(),
                            }
                        }
                    };

                    let report = FileReport {
                        source: path,
                        outcome,
                    };
                    let _ = tx.send(BatchEvent::FileFinished(report.clone()));
                    files.push(report);

                    // A stop during a long file lands here.
                    if cancel.load(Ordering::Relaxed) {
                        stopped = true;
                        break;
                    }
                }

                let report = BatchReport {
                    finished,
                    failed,
                    stopped,
                    files,
                };
                *last_report.lock() = Some(report.clone());
                running.store(false, Ordering::SeqCst);
                info!(finished, failed, stopped, "batch finished");
                let _ = tx.send(BatchEvent::BatchFinished(report));
            });

        if let Err(e) = spawned {
            self.running.store(false, Ordering::SeqCst);
            return Err(SliceError::Io(e));
        }

        Ok(rx)
    }

    /// Request a cooperative stop. The worker checks the flag between files
    /// and between chunk writes; already-written output stays on disk.
    pub fn request_stop(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    /// `true` while a worker thread is active.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Report of the most recently completed run, if any.
    pub fn last_report(&self) -> Option<BatchReport> {
        self.last_report.lock().clone()
    }
}

/// Slice one file: decode, segment, write every chunk as
/// `{basename}_{index}.wav` mirroring the source format.
///
/// `cancel` is polled between chunk writes so a stop request does not wait
/// out a long file. Returns the paths written (possibly fewer than the
/// chunk count if stopped mid-file).
pub fn slice_file(
    path: &Path,
    params: &SliceParams,
    out_dir: Option<&Path>,
    cancel: &AtomicBool,
) -> Result<Vec<PathBuf>> {
    let wav = read_wav(path)?;
    // Frame conversion happens per file, at the file's own sample rate.
    let config = params.to_frames(wav.buffer.sample_rate())?;
    let chunks = slice_buffer(&wav.buffer, &config)?;

    let dest = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    fs::create_dir_all(&dest)?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chunk".to_string());

    let mut outputs = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            break;
        }
        let out_path = dest.join(format!("{stem}_{index}.wav"));
        write_wav(&out_path, &chunk.samples, wav.spec)?;
        outputs.push(out_path);
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::RecvTimeoutError;
    use std::time::Duration;

    fn drain_until_finished(rx: &Receiver<BatchEvent>) -> BatchReport {
        loop {
            match rx.recv_timeout(Duration::from_secs(10)) {
                Ok(BatchEvent::BatchFinished(report)) => return report,
                Ok(BatchEvent::FileFinished(_)) => continue,
                Err(RecvTimeoutError::Timeout) => panic!("batch never finished"),
                Err(RecvTimeoutError::Disconnected) => panic!("worker dropped the channel"),
            }
        }
    }

    #[test]
    fn invalid_params_rejected_before_any_run() {
        let params = SliceParams {
            hop_size_ms: 0,
            ..SliceParams::default()
        };
        assert!(BatchPipeline::new(params).is_err());
    }

    #[test]
    fn empty_batch_is_a_no_op_that_still_finishes() {
        let pipeline = BatchPipeline::new(SliceParams::default()).unwrap();
        let rx = pipeline.start(Vec::new(), None).unwrap();
        let report = drain_until_finished(&rx);
        assert_eq!(report.finished, 0);
        assert_eq!(report.failed, 0);
        assert!(!report.stopped);
        assert!(report.files.is_empty());
    }

    #[test]
    fn unreadable_files_fail_locally_and_batch_continues() {
        let pipeline = BatchPipeline::new(SliceParams::default()).unwrap();
        let rx = pipeline
            .start(
                vec![
                    PathBuf::from("/nonexistent/a.wav"),
                    PathBuf::from("/nonexistent/b.wav"),
                ],
                None,
            )
            .unwrap();
        let report = drain_until_finished(&rx);
        assert_eq!(report.finished, 0);
        assert_eq!(report.failed, 2);
        assert_eq!(report.files.len(), 2);
        assert!(report.files.iter().all(|f| f.outcome.is_failure()));
    }

    #[test]
    fn pipeline_can_run_again_after_completion() {
        let pipeline = BatchPipeline::new(SliceParams::default()).unwrap();

        let rx = pipeline.start(Vec::new(), None).unwrap();
        drain_until_finished(&rx);
        // The running flag is cleared before BatchFinished is sent, so a
        // restart is valid as soon as the final event arrives.
        assert!(!pipeline.is_running());

        let rx = pipeline.start(Vec::new(), None).unwrap();
        drain_until_finished(&rx);
        assert!(pipeline.last_report().is_some());
    }
}
