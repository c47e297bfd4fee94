//! Chunk extraction.
//!
//! The final chunk layout is exactly the complement of the accepted silence
//! ranges over `[0, total_frames)`. Extraction copies every source channel
//! for each range — the mono fold used during analysis never leaks into the
//! output.

use std::ops::Range;

use crate::audio::SampleBuffer;

/// One contiguous non-silent output segment.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// First frame of the chunk in the source buffer.
    pub start_frame: usize,
    /// One past the last frame of the chunk in the source buffer.
    pub end_frame: usize,
    /// Extracted samples, original channel layout and sample rate.
    pub samples: SampleBuffer,
}

impl Chunk {
    pub fn frame_range(&self) -> Range<usize> {
        self.start_frame..self.end_frame
    }

    pub fn len_frames(&self) -> usize {
        self.end_frame - self.start_frame
    }
}

/// Extract the chunks between `accepted` silence ranges.
///
/// Zero-length complements are not emitted. With no accepted ranges the
/// whole (non-empty) buffer is one chunk.
pub fn segment(buffer: &SampleBuffer, accepted: &[Range<usize>]) -> Vec<Chunk> {
    let total = buffer.frames();
    let mut chunks = Vec::with_capacity(accepted.len() + 1);
    let mut cursor = 0usize;

    let mut push = |chunks: &mut Vec<Chunk>, start: usize, end: usize| {
        if end > start {
            chunks.push(Chunk {
                start_frame: start,
                end_frame: end,
                samples: buffer.extract(start..end),
            });
        }
    };

    for range in accepted {
        push(&mut chunks, cursor, range.start);
        cursor = range.end;
    }
    push(&mut chunks, cursor, total);

    chunks
}
