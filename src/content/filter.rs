//! Moderation gate for dynamically generated text.
//!
//! Built-in lists are curated by hand; everything that comes back from the
//! generative API passes through here before it can become a practice
//! target. Two checks: a fixed denylist, and an alphabet allowlist that
//! rejects anything a beginner's Korean keyboard row can't produce.

use crate::hangul;
use tracing::debug;

/// Words that must never appear in a prompt shown to a child.
const DENYLIST: &[&str] = &[
    "바보", "멍청이", "죽어", "꺼져", "싫어해", "미워해", "때려", "나빠",
];

fn is_allowed_char(c: char) -> bool {
    hangul::is_syllable(c)
        || hangul::is_jamo(c)
        || c.is_whitespace()
        || matches!(c, '.' | ',' | '!' | '?' | '~')
}

fn denied_word(text: &str) -> Option<&'static str> {
    DENYLIST.iter().copied().find(|w| text.contains(w))
}

/// Whether `text` may be shown as a practice target.
pub fn is_clean(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    if let Some(word) = denied_word(text) {
        debug!(word, "text rejected by denylist");
        return false;
    }
    if let Some(c) = text.chars().find(|&c| !is_allowed_char(c)) {
        debug!(%c, "text rejected by alphabet check");
        return false;
    }
    true
}
