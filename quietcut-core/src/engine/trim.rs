//! Boundary trimming policy.
//!
//! Turns the raw hop-domain episode list into the frame-domain silence
//! ranges that actually separate output chunks. Three passes, in order:
//!
//! 1. **Minimum-interval filter** — a silent run shorter than
//!    `min_interval_frames` is not a cut candidate; it is dropped and the
//!    speech on both sides merges through it.
//! 2. **Kept-margin clamp** — a surviving run does not cut flush at its
//!    edges. The boundary moves `max_silence_kept_frames` into the run from
//!    each side, so every cut lands inside silence with a bounded fade
//!    margin. A side that touches the buffer edge has no adjoining chunk
//!    and keeps no margin there. When the margins meet or cross (run
//!    shorter than twice the margin) the run is fully kept and separates
//!    nothing.
//! 3. **Minimum-chunk-length pass** — a boundary that would close a chunk
//!    shorter than `min_length_frames` is removed, re-merging the speech
//!    around it. Greedy left-to-right, then trailing boundaries are popped
//!    while the tail chunk stays short. Monotone: a removed boundary is
//!    never re-admitted, so the pass terminates in at most one removal per
//!    episode.

use std::ops::Range;

use crate::config::SliceConfig;
use crate::engine::detect::SilenceEpisode;

/// Trim `raw` episodes against `config`, yielding the accepted silence
/// ranges in frames, ordered and non-overlapping.
///
/// The complement of the returned ranges over `[0, total_frames)` is the
/// final chunk layout.
pub fn trim(raw: &[SilenceEpisode], config: &SliceConfig, total_frames: usize) -> Vec<Range<usize>> {
    let hop = config.hop_size_frames;
    let kept = config.max_silence_kept_frames;

    let mut clamped: Vec<Range<usize>> = Vec::with_capacity(raw.len());
    for ep in raw {
        // 1. Minimum-interval filter, on the hop-aligned run length.
        if ep.len_hops() * hop < config.min_interval_frames {
            continue;
        }

        let start = ep.start_hop * hop;
        let end = (ep.end_hop * hop).min(total_frames);

        // A run swallowing the entire buffer: shorter than twice the margin
        // it is fully kept (one chunk downstream), otherwise nothing of the
        // buffer is speech and no chunk survives it.
        if start == 0 && end == total_frames {
            if total_frames < 2 * kept {
                continue;
            }
            clamped.push(0..total_frames);
            continue;
        }

        // 2. Kept-margin clamp. No margin against a buffer edge.
        let cut_start = if start == 0 { 0 } else { start + kept };
        let cut_end = if end == total_frames {
            total_frames
        } else {
            end.saturating_sub(kept)
        };
        if cut_start >= cut_end {
            // Margins meet: the run is fully kept, no boundary emitted.
            continue;
        }
        clamped.push(cut_start..cut_end);
    }

    enforce_min_length(clamped, config.min_length_frames, total_frames)
}

/// 3. Remove boundaries that would close a chunk shorter than `min_length`.
///
/// A zero-length complement (an accepted run starting at frame 0) is not a
/// chunk and never triggers a removal.
fn enforce_min_length(
    episodes: Vec<Range<usize>>,
    min_length: usize,
    total_frames: usize,
) -> Vec<Range<usize>> {
    let mut accepted: Vec<Range<usize>> = Vec::with_capacity(episodes.len());
    let mut chunk_start = 0usize;

    for ep in episodes {
        let lead = ep.start - chunk_start;
        if lead == 0 || lead >= min_length {
            chunk_start = ep.end;
            accepted.push(ep);
        }
        // Too-short chunk: drop this boundary, speech re-merges across it.
    }

    // Pop trailing boundaries while the tail chunk is non-empty but short.
    while total_frames - chunk_start > 0 && total_frames - chunk_start < min_length {
        match accepted.pop() {
            Some(_) => chunk_start = accepted.last().map_or(0, |ep| ep.end),
            None => break,
        }
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min_length: usize, min_interval: usize, hop: usize, kept: usize) -> SliceConfig {
        SliceConfig {
            threshold_db: -40.0,
            min_length_frames: min_length,
            min_interval_frames: min_interval,
            hop_size_frames: hop,
            max_silence_kept_frames: kept,
        }
    }

    fn ep(start_hop: usize, end_hop: usize) -> SilenceEpisode {
        SilenceEpisode { start_hop, end_hop }
    }

    #[test]
    fn short_runs_fail_the_interval_filter() {
        // 20 frames of silence with a 300-frame minimum interval.
        let cfg = config(1, 300, 10, 0);
        assert!(trim(&[ep(10, 12)], &cfg, 1_000).is_empty());
    }

    #[test]
    fn interior_run_keeps_margins_on_both_sides() {
        // Silence over frames [3000, 5000) with a 100-frame kept margin.
        let cfg = config(500, 300, 10, 100);
        let kept = trim(&[ep(300, 500)], &cfg, 10_000);
        assert_eq!(kept, vec![3_100..4_900]);
    }

    #[test]
    fn run_shorter_than_two_margins_is_fully_kept() {
        // 400 silent frames, 300 kept each side: margins meet, no boundary.
        let cfg = config(1, 100, 10, 300);
        assert!(trim(&[ep(100, 140)], &cfg, 10_000).is_empty());
    }

    #[test]
    fn leading_run_keeps_no_left_margin() {
        let cfg = config(1, 100, 10, 100);
        let kept = trim(&[ep(0, 50)], &cfg, 10_000);
        assert_eq!(kept, vec![0..400]);
    }

    #[test]
    fn trailing_run_keeps_no_right_margin() {
        let cfg = config(1, 100, 10, 100);
        let kept = trim(&[ep(950, 1_000)], &cfg, 10_000);
        assert_eq!(kept, vec![9_600..10_000]);
    }

    #[test]
    fn leading_run_shorter_than_margin_is_fully_kept() {
        let cfg = config(1, 10, 10, 200);
        assert!(trim(&[ep(0, 15)], &cfg, 10_000).is_empty());
    }

    #[test]
    fn whole_buffer_run_shorter_than_two_margins_is_fully_kept() {
        let cfg = config(1, 10, 10, 600);
        assert!(trim(&[ep(0, 100)], &cfg, 1_000).is_empty());
    }

    #[test]
    fn whole_buffer_run_longer_than_two_margins_swallows_everything() {
        let cfg = config(1, 10, 10, 100);
        let kept = trim(&[ep(0, 100)], &cfg, 1_000);
        assert_eq!(kept, vec![0..1_000]);
    }

    #[test]
    fn boundary_closing_a_short_chunk_is_removed() {
        // Two runs 200 frames apart; min chunk length 500. The second
        // boundary would close a 200-frame chunk, so it is dropped and the
        // silence it marked stays in the merged chunk.
        let cfg = config(500, 100, 10, 0);
        let kept = trim(&[ep(100, 150), ep(170, 220)], &cfg, 10_000);
        assert_eq!(kept, vec![1_000..1_500]);
    }

    #[test]
    fn trailing_boundary_popped_when_tail_chunk_is_short() {
        // Run ends 100 frames before the buffer end; tail chunk of 100 is
        // below the 500 minimum, so the boundary is removed entirely.
        let cfg = config(500, 100, 10, 0);
        let kept = trim(&[ep(800, 990)], &cfg, 10_000);
        assert!(kept.is_empty());
    }

    #[test]
    fn final_hop_clamp_never_exceeds_total_frames() {
        // 995 frames at hop 10: last hop index is 100, 100*10 > 995.
        let cfg = config(1, 10, 10, 0);
        let kept = trim(&[ep(90, 100)], &cfg, 995);
        assert_eq!(kept, vec![900..995]);
    }

    #[test]
    fn ordering_is_preserved() {
        let cfg = config(100, 100, 10, 10);
        let kept = trim(&[ep(100, 200), ep(400, 500), ep(700, 800)], &cfg, 10_000);
        assert_eq!(kept.len(), 3);
        assert!(kept.windows(2).all(|w| w[0].end <= w[1].start));
    }
}
