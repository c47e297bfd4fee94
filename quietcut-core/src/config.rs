//! Slicing configuration.
//!
//! Two representations, one conversion:
//!
//! - [`SliceParams`] is the caller-facing surface: a threshold in dBFS and
//!   durations in milliseconds, as entered in a front-end or on a command
//!   line. Validated once, up front, before any file is touched.
//! - [`SliceConfig`] is what the engine consumes: the same values converted
//!   to frame counts at a concrete sample rate. Conversion happens per file,
//!   so one batch handles inputs with differing sample rates consistently.

use crate::error::{Result, SliceError};

/// Caller-facing slicing parameters (time-domain).
#[derive(Debug, Clone, PartialEq)]
pub struct SliceParams {
    /// Loudness floor in dBFS. Hops quieter than this count as silent.
    /// Default: -40.0.
    pub threshold_db: f32,
    /// Minimum length of an emitted chunk, in milliseconds. Default: 5000.
    pub min_length_ms: u64,
    /// Minimum duration a silent run must last to be considered a cut
    /// candidate, in milliseconds. Default: 300.
    pub min_interval_ms: u64,
    /// Analysis hop size in milliseconds. Default: 10.
    pub hop_size_ms: u64,
    /// Silence retained adjoining each cut point, in milliseconds.
    /// Default: 500.
    pub max_silence_kept_ms: u64,
}

impl Default for SliceParams {
    fn default() -> Self {
        Self {
            threshold_db: -40.0,
            min_length_ms: 5_000,
            min_interval_ms: 300,
            hop_size_ms: 10,
            max_silence_kept_ms: 500,
        }
    }
}

impl SliceParams {
    /// Check time-domain constraints.
    ///
    /// # Errors
    /// `SliceError::InvalidConfig` naming the offending field. Nothing is
    /// processed after a validation failure — the whole batch is rejected.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold_db.is_finite() {
            return Err(SliceError::invalid_config(
                "threshold_db",
                format!("must be finite, got {}", self.threshold_db),
            ));
        }
        if self.min_length_ms == 0 {
            return Err(SliceError::invalid_config("min_length_ms", "must be > 0"));
        }
        if self.min_interval_ms == 0 {
            return Err(SliceError::invalid_config("min_interval_ms", "must be > 0"));
        }
        if self.hop_size_ms == 0 {
            return Err(SliceError::invalid_config("hop_size_ms", "must be > 0"));
        }
        Ok(())
    }

    /// Convert to frame-domain config at `sample_rate` Hz.
    ///
    /// Durations convert as `ms * sample_rate / 1000`, truncating. The
    /// result is re-validated: a hop that truncates to zero frames (absurdly
    /// low sample rate) is rejected rather than looping forever downstream.
    pub fn to_frames(&self, sample_rate: u32) -> Result<SliceConfig> {
        self.validate()?;
        if sample_rate == 0 {
            return Err(SliceError::invalid_config("sample_rate", "must be > 0"));
        }

        let frames = |ms: u64| (ms * u64::from(sample_rate) / 1000) as usize;
        let config = SliceConfig {
            threshold_db: self.threshold_db,
            min_length_frames: frames(self.min_length_ms).max(1),
            min_interval_frames: frames(self.min_interval_ms).max(1),
            hop_size_frames: frames(self.hop_size_ms),
            max_silence_kept_frames: frames(self.max_silence_kept_ms),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Frame-domain slicing configuration, immutable for one segmentation call.
///
/// `max_silence_kept_frames > min_interval_frames` is permitted: every
/// surviving silent run is then shorter than twice the kept margin, so the
/// margins meet and all silence is retained (a degenerate but well-defined
/// all-kept trim).
#[derive(Debug, Clone, PartialEq)]
pub struct SliceConfig {
    /// Loudness floor in dBFS; envelope hops strictly below it are silent.
    pub threshold_db: f32,
    /// Minimum emitted chunk length in frames.
    pub min_length_frames: usize,
    /// Minimum silent-run length (frames) to qualify as a cut candidate.
    pub min_interval_frames: usize,
    /// Envelope analysis hop in frames. Must be > 0.
    pub hop_size_frames: usize,
    /// Silence retained on each side of a cut, in frames. May be 0.
    pub max_silence_kept_frames: usize,
}

impl SliceConfig {
    /// Check frame-domain constraints.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold_db.is_finite() {
            return Err(SliceError::invalid_config(
                "threshold_db",
                format!("must be finite, got {}", self.threshold_db),
            ));
        }
        if self.hop_size_frames == 0 {
            return Err(SliceError::invalid_config("hop_size_frames", "must be > 0"));
        }
        if self.min_length_frames == 0 {
            return Err(SliceError::invalid_config(
                "min_length_frames",
                "must be > 0",
            ));
        }
        if self.min_interval_frames == 0 {
            return Err(SliceError::invalid_config(
                "min_interval_frames",
                "must be > 0",
            ));
        }
        Ok(())
    }
}
