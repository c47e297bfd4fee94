//! The segmentation engine.
//!
//! ## Stages (per buffer)
//!
//! ```text
//! 1. envelope::analyze   — per-hop RMS loudness in dBFS
//! 2. detect::detect      — raw silence episodes (threshold scan)
//! 3. trim::trim          — interval filter, kept margins, min chunk length
//! 4. segment::segment    — complement ranges, per-channel extraction
//! ```
//!
//! The whole pass is pure and synchronous: no I/O, no shared mutable state,
//! safe to run concurrently on independent buffers with one shared config.

pub mod detect;
pub mod envelope;
pub mod segment;
pub mod trim;

pub use segment::Chunk;

use tracing::debug;

use crate::audio::SampleBuffer;
use crate::config::SliceConfig;
use crate::error::Result;

/// Segment `buffer` under `config`, returning the ordered non-silent chunks.
///
/// Validates the config before touching the buffer. Deterministic: identical
/// buffer and config produce identical chunk boundaries and samples.
pub fn slice_buffer(buffer: &SampleBuffer, config: &SliceConfig) -> Result<Vec<Chunk>> {
    config.validate()?;

    let env = envelope::analyze(buffer, config.hop_size_frames);
    let raw = detect::detect(&env, config.threshold_db);
    let kept = trim::trim(&raw, config, buffer.frames());
    let chunks = segment::segment(buffer, &kept);

    debug!(
        frames = buffer.frames(),
        hops = env.len(),
        raw_episodes = raw.len(),
        kept_episodes = kept.len(),
        chunks = chunks.len(),
        "sliced buffer"
    );

    Ok(chunks)
}
