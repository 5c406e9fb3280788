//! Accuracy and speed calculation for a typing attempt.
//!
//! Both functions are pure over their inputs (speed reads the wall clock)
//! and operate on decomposed jamo sequences, so a learner earns partial
//! credit for a half-composed syllable even though completion detection
//! elsewhere compares raw characters.

use crate::hangul;
use std::time::SystemTime;

/// Percentage of the target's jamo matched at their positions, 0..=100.
///
/// Empty input or an empty target scores 0. The denominator is always the
/// target's jamo count, so typing past the target with wrong characters
/// can never inflate the score.
pub fn accuracy(input: &str, target: &str) -> u32 {
    if input.is_empty() || target.is_empty() {
        return 0;
    }

    let typed = hangul::decompose(input);
    let wanted = hangul::decompose(target);

    let matched = typed
        .iter()
        .zip(wanted.iter())
        .filter(|(t, w)| t == w)
        .count();

    (matched * 100 / wanted.len()) as u32
}

/// Jamo per minute, measured against the wall clock at call time.
///
/// Returns 0 with no start time, empty input, or less than one second
/// elapsed; the sub-second floor keeps the first keystrokes from reading
/// as an absurd burst.
pub fn speed(started_at: Option<SystemTime>, input: &str) -> u32 {
    let Some(started_at) = started_at else {
        return 0;
    };
    if input.is_empty() {
        return 0;
    }

    let elapsed = started_at.elapsed().unwrap_or_default().as_secs_f64();
    if elapsed < 1.0 {
        return 0;
    }

    let strokes = hangul::jamo_count(input) as f64;
    (strokes / elapsed * 60.0).floor() as u32
}
