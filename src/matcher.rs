// Greedy three-tier match finder.
//
// For every input position the encoder asks for the best match reachable
// across the three token tiers. Each tier scans its own window backward
// (nearest candidate first), keeping the longest equality run it can
// express; the winner is the tier whose token saves the most bytes
// (`length - width`). Tiers are evaluated widest-reach first and a
// cheaper tier only takes over on a strictly greater saving, which pins
// the tie-break to the more expressive tier.
//
// This is a local greedy parse: the best match at each position, no
// backtracking, no deferral for a better global parse.

use crate::format::tiers::{TIERS, Tier};

/// A sliding-window match: copy `length` bytes starting `distance` bytes
/// behind the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub length: usize,
    pub distance: usize,
}

/// Find the most profitable match at `pos`, if any token would shrink
/// the output. Returns `None` when every candidate costs at least as
/// much as the bytes it covers.
pub fn find_match(input: &[u8], pos: usize) -> Option<Match> {
    let mut best: Option<Match> = None;
    let mut best_gain: isize = 0;

    for tier in TIERS {
        let Some(m) = best_in_tier(input, pos, tier) else {
            continue;
        };
        let gain = tier.gain(m.length);
        if gain > best_gain {
            best_gain = gain;
            best = Some(m);
        }
    }

    best
}

/// Longest equality run reachable within one tier's window; the nearest
/// candidate wins ties.
fn best_in_tier(input: &[u8], pos: usize, tier: Tier) -> Option<Match> {
    let limit = tier.max_len.min(input.len() - pos);
    if limit == 0 {
        return None;
    }

    let window_start = pos.saturating_sub(tier.max_distance);
    let mut best_len = 0;
    let mut best_distance = 0;

    for candidate in (window_start..pos).rev() {
        // Cheap reject before walking the run.
        if input[candidate] != input[pos] {
            continue;
        }
        let len = run_length(input, candidate, pos, limit);
        if len > best_len {
            best_len = len;
            best_distance = pos - candidate;
            if best_len == limit {
                break;
            }
        }
    }

    (best_len > 0).then_some(Match {
        length: best_len,
        distance: best_distance,
    })
}

/// Length of the byte-wise equality run between `candidate` and `pos`,
/// capped at `limit`.
///
/// The run may extend past `pos` itself: a match whose source overlaps
/// its own output decodes as a cyclic repeat, so the comparison
/// deliberately chases the copy instead of stopping at `pos`.
fn run_length(input: &[u8], candidate: usize, pos: usize, limit: usize) -> usize {
    let mut len = 0;
    while len < limit && input[candidate + len] == input[pos + len] {
        len += 1;
    }
    len
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
