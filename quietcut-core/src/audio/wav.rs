//! WAV decode/encode via hound.
//!
//! Decoding normalizes any supported PCM format (integer 8/16/24/32-bit or
//! 32-bit float) to planar f32 in [-1.0, 1.0]. The source [`hound::WavSpec`]
//! travels alongside the decoded buffer so output chunks can be written back
//! in the exact format the input arrived in — same rate, channel count, bit
//! depth, and sample format.

use std::path::Path;

use crate::audio::SampleBuffer;
use crate::error::{Result, SliceError};

/// A decoded WAV file: normalized samples plus the on-disk format to mirror
/// when writing chunks back out.
#[derive(Debug, Clone)]
pub struct WavAudio {
    pub buffer: SampleBuffer,
    pub spec: hound::WavSpec,
}

/// Decode a WAV file into a planar f32 [`SampleBuffer`].
///
/// # Errors
/// `SliceError::Decode` (carrying the path) for unreadable or malformed
/// files, `SliceError::InvalidBuffer` for pathological headers (zero
/// channels / zero sample rate).
pub fn read_wav(path: &Path) -> Result<WavAudio> {
    let decode_err = |source: hound::Error| SliceError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = hound::WavReader::open(path).map_err(decode_err)?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels);
    if channels == 0 {
        return Err(SliceError::InvalidBuffer(format!(
            "'{}' declares zero channels",
            path.display()
        )));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()
            .map_err(decode_err)?,
        hound::SampleFormat::Int => {
            let max = ((1_i64 << (spec.bits_per_sample - 1)) - 1) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max))
                .collect::<std::result::Result<_, _>>()
                .map_err(decode_err)?
        }
    };

    // De-interleave into planar channels.
    let frames = interleaved.len() / channels;
    let mut planar: Vec<Vec<f32>> = (0..channels).map(|_| Vec::with_capacity(frames)).collect();
    for frame in interleaved.chunks_exact(channels) {
        for (ch, &sample) in planar.iter_mut().zip(frame.iter()) {
            ch.push(sample);
        }
    }

    let buffer = SampleBuffer::new(planar, spec.sample_rate)?;
    Ok(WavAudio { buffer, spec })
}

/// Write `buffer` to `path` in the format described by `spec`.
///
/// `spec` normally comes from the decoded source file; its sample rate and
/// channel count are overridden by the buffer's actual layout so a chunk can
/// never be written with a lying header.
pub fn write_wav(path: &Path, buffer: &SampleBuffer, spec: hound::WavSpec) -> Result<()> {
    let write_err = |source: hound::Error| SliceError::Write {
        path: path.to_path_buf(),
        source,
    };

    let spec = hound::WavSpec {
        channels: buffer.channel_count() as u16,
        sample_rate: buffer.sample_rate(),
        ..spec
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(write_err)?;
    match spec.sample_format {
        hound::SampleFormat::Float => {
            for frame in 0..buffer.frames() {
                for ch in buffer.channels() {
                    writer.write_sample(ch[frame]).map_err(write_err)?;
                }
            }
        }
        hound::SampleFormat::Int => {
            let max = ((1_i64 << (spec.bits_per_sample - 1)) - 1) as f32;
            for frame in 0..buffer.frames() {
                for ch in buffer.channels() {
                    let quantized = (ch[frame] * max).round().clamp(-max - 1.0, max) as i32;
                    writer.write_sample(quantized).map_err(write_err)?;
                }
            }
        }
    }
    writer.finalize().map_err(write_err)?;
    Ok(())
}
