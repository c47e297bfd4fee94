//! Amplitude envelope extraction.
//!
//! Reduces a sample buffer to one loudness value per analysis hop:
//!
//! 1. Fold multi-channel input to one stream (per-frame channel average).
//! 2. For hop `i`, compute the RMS over `[i*hop, min(total, (i+1)*hop))`.
//!    The final partial hop is measured over its truncated range — never
//!    zero-padded, which would bias the tail of the file toward silence.
//! 3. Convert to dBFS as `20*log10(rms + EPSILON)`.
//!
//! Hops do not overlap. The output is a pure function of the samples and
//! the hop size: identical input yields a bit-identical envelope.

use crate::audio::SampleBuffer;

/// Added to the RMS before `log10` so exact digital silence maps to a very
/// low finite level (-240 dB) instead of -inf.
pub const DB_EPSILON: f32 = 1e-12;

/// Per-hop loudness sequence in dBFS.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    values: Vec<f32>,
    hop_size_frames: usize,
}

impl Envelope {
    /// Loudness values, one per hop, in hop order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of hops: `ceil(total_frames / hop_size_frames)`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn hop_size_frames(&self) -> usize {
        self.hop_size_frames
    }
}

/// Compute the amplitude envelope of `buffer` at `hop_size_frames`.
pub fn analyze(buffer: &SampleBuffer, hop_size_frames: usize) -> Envelope {
    debug_assert!(hop_size_frames > 0);
    let mono = buffer.mono_fold();
    let values = mono
        .chunks(hop_size_frames)
        .map(|hop| 20.0 * (rms(hop) + DB_EPSILON).log10())
        .collect();
    Envelope {
        values,
        hop_size_frames,
    }
}

/// Root-mean-square of a sample slice.
fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}
