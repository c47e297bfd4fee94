//! # quietcut-core
//!
//! Silence-aware audio segmentation engine.
//!
//! ## Architecture
//!
//! ```text
//! WAV file → SampleBuffer ─► envelope (per-hop RMS, dBFS)
//!                                 │
//!                           detect (silence episodes)
//!                                 │
//!                           trim (interval / kept-margin / min-length)
//!                                 │
//!                           segment (complement → Chunks)
//!                                 │
//!            BatchPipeline ─► one WAV per chunk + progress events
//! ```
//!
//! The engine stages are pure, synchronous, and deterministic; only
//! [`BatchPipeline`] touches the filesystem, on its own worker thread.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod audio;
pub mod batch;
pub mod config;
pub mod engine;
pub mod error;

// Convenience re-exports for downstream crates
pub use audio::wav::{read_wav, write_wav, WavAudio};
pub use audio::SampleBuffer;
pub use batch::{BatchEvent, BatchPipeline, BatchReport, FileOutcome, FileReport};
pub use config::{SliceConfig, SliceParams};
pub use engine::{slice_buffer, Chunk};
pub use error::{Result, SliceError};
