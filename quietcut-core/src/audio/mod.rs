//! PCM sample buffers.
//!
//! [`SampleBuffer`] is the engine's only audio container: planar f32
//! channels at a known sample rate, equal length per channel. The engine
//! never mutates a buffer in place — analysis reads it, extraction copies
//! sub-ranges out of it.

pub mod wav;

use std::borrow::Cow;
use std::ops::Range;

use crate::error::{Result, SliceError};

/// A fully materialized multi-channel PCM buffer.
///
/// Channels are stored planar (one `Vec<f32>` per channel) with samples in
/// [-1.0, 1.0]. All channels have the same length; the constructor enforces
/// this.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Build a buffer from planar channel data.
    ///
    /// # Errors
    /// `SliceError::InvalidBuffer` if there are no channels, the channels
    /// differ in length, or the sample rate is zero.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(SliceError::InvalidBuffer("sample rate must be > 0".into()));
        }
        let Some(first) = channels.first() else {
            return Err(SliceError::InvalidBuffer(
                "buffer must have at least one channel".into(),
            ));
        };
        let frames = first.len();
        if let Some((idx, ch)) = channels
            .iter()
            .enumerate()
            .find(|(_, ch)| ch.len() != frames)
        {
            return Err(SliceError::InvalidBuffer(format!(
                "channel 0 has {frames} frames but channel {idx} has {}",
                ch.len()
            )));
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Build a mono buffer. Infallible apart from a zero sample rate.
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        Self::new(vec![samples], sample_rate)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Frames per channel.
    pub fn frames(&self) -> usize {
        self.channels[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Fold all channels down to one representative stream by per-frame
    /// averaging. Borrowing for mono input, allocating otherwise.
    ///
    /// Analysis-only: extraction always copies the original channels.
    pub fn mono_fold(&self) -> Cow<'_, [f32]> {
        if self.channels.len() == 1 {
            return Cow::Borrowed(&self.channels[0]);
        }
        let frames = self.frames();
        let scale = 1.0 / self.channels.len() as f32;
        let mut folded = vec![0.0f32; frames];
        for ch in &self.channels {
            for (acc, &s) in folded.iter_mut().zip(ch.iter()) {
                *acc += s;
            }
        }
        for s in &mut folded {
            *s *= scale;
        }
        Cow::Owned(folded)
    }

    /// Copy `range` (frame indices, end exclusive) out of every channel.
    ///
    /// The caller guarantees `range.end <= self.frames()`; the engine only
    /// produces in-bounds ranges.
    pub fn extract(&self, range: Range<usize>) -> SampleBuffer {
        debug_assert!(range.end <= self.frames());
        let channels = self
            .channels
            .iter()
            .map(|ch| ch[range.clone()].to_vec())
            .collect();
        SampleBuffer {
            channels,
            sample_rate: self.sample_rate,
        }
    }
}
