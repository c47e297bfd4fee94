//! Silence detection over the envelope.
//!
//! A two-state scanner walks the per-hop loudness sequence:
//!
//! - SPEECH → SILENT on the first hop strictly below the threshold; the
//!   hop index becomes `start_hop`.
//! - SILENT → SPEECH on the first hop at or above the threshold; the hop
//!   index becomes the exclusive `end_hop`.
//!
//! Equality with the threshold counts as speech — a fixed tie-break so
//! boundary hops classify the same way on every run. A run still open when
//! the envelope ends is closed at `envelope.len()`.
//!
//! No merging, hangover, or length filtering happens here; the scanner's
//! output is the raw episode list for the trimmer.

use crate::engine::envelope::Envelope;

/// A contiguous run of below-threshold hops, end exclusive.
///
/// Episodes are emitted ordered by `start_hop`, non-overlapping and
/// non-adjacent (two touching runs are by construction one run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilenceEpisode {
    pub start_hop: usize,
    pub end_hop: usize,
}

impl SilenceEpisode {
    pub fn len_hops(&self) -> usize {
        self.end_hop - self.start_hop
    }
}

/// Scan `envelope` and return every silent run under `threshold_db`.
pub fn detect(envelope: &Envelope, threshold_db: f32) -> Vec<SilenceEpisode> {
    let mut episodes = Vec::new();
    let mut open_start: Option<usize> = None;

    for (hop, &level) in envelope.values().iter().enumerate() {
        let silent = level < threshold_db;
        match (open_start, silent) {
            (None, true) => open_start = Some(hop),
            (Some(start), false) => {
                episodes.push(SilenceEpisode {
                    start_hop: start,
                    end_hop: hop,
                });
                open_start = None;
            }
            _ => {}
        }
    }

    // Flush-on-end: no dangling open episode.
    if let Some(start) = open_start {
        episodes.push(SilenceEpisode {
            start_hop: start,
            end_hop: envelope.len(),
        });
    }

    episodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SampleBuffer;
    use crate::engine::envelope;

    /// Build an envelope whose hop levels are -60 dB (silent) for `false`
    /// and -6 dB (loud) for `true` entries, via a real analysis pass.
    fn env_from_pattern(loud: &[bool]) -> Envelope {
        let hop = 10;
        let mut samples = Vec::with_capacity(loud.len() * hop);
        for &l in loud {
            let amp = if l { 0.5 } else { 0.001 };
            samples.extend(std::iter::repeat(amp).take(hop));
        }
        envelope::analyze(&SampleBuffer::from_mono(samples, 8_000).unwrap(), hop)
    }

    const THRESHOLD: f32 = -40.0;

    #[test]
    fn all_speech_yields_no_episodes() {
        let env = env_from_pattern(&[true; 8]);
        assert!(detect(&env, THRESHOLD).is_empty());
    }

    #[test]
    fn interior_silence_is_one_episode() {
        let env = env_from_pattern(&[true, true, false, false, false, true]);
        assert_eq!(
            detect(&env, THRESHOLD),
            vec![SilenceEpisode {
                start_hop: 2,
                end_hop: 5
            }]
        );
    }

    #[test]
    fn trailing_silence_is_flushed_at_end() {
        let env = env_from_pattern(&[true, false, false]);
        assert_eq!(
            detect(&env, THRESHOLD),
            vec![SilenceEpisode {
                start_hop: 1,
                end_hop: 3
            }]
        );
    }

    #[test]
    fn leading_silence_starts_at_hop_zero() {
        let env = env_from_pattern(&[false, false, true, true]);
        assert_eq!(
            detect(&env, THRESHOLD),
            vec![SilenceEpisode {
                start_hop: 0,
                end_hop: 2
            }]
        );
    }

    #[test]
    fn separate_runs_stay_separate() {
        let env = env_from_pattern(&[false, true, false, false, true, false]);
        let episodes = detect(&env, THRESHOLD);
        assert_eq!(episodes.len(), 3);
        assert_eq!(episodes[0], SilenceEpisode { start_hop: 0, end_hop: 1 });
        assert_eq!(episodes[1], SilenceEpisode { start_hop: 2, end_hop: 4 });
        assert_eq!(episodes[2], SilenceEpisode { start_hop: 5, end_hop: 6 });
    }

    #[test]
    fn level_equal_to_threshold_counts_as_speech() {
        // Synthetic envelope with a hop exactly at the threshold.
        let env = env_from_pattern(&[true]);
        let at_threshold = env.values()[0];
        assert!(detect(&env, at_threshold).is_empty());
        // Strictly above the level, the same hop is silent.
        assert_eq!(detect(&env, at_threshold + 0.1).len(), 1);
    }

    #[test]
    fn empty_envelope_yields_nothing() {
        let env = envelope::analyze(&SampleBuffer::from_mono(vec![], 8_000).unwrap(), 10);
        assert!(detect(&env, THRESHOLD).is_empty());
    }
}
