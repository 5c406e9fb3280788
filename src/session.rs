//! Per-attempt typing session state.
//!
//! A session owns one attempt against one fixed target text: it times the
//! first keystroke, recomputes live accuracy and speed on every input
//! change, and detects completion. Sessions are single-threaded and hold
//! no external resources; abandoning one is just dropping it.

use crate::assessment;
use crate::hangul;
use std::time::SystemTime;

/// Attempt lifecycle. `Complete` is terminal; a new attempt needs either a
/// fresh session or `reset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Active,
    Complete,
}

/// Rendering class for one target character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharFeedback {
    Matched,
    Wrong,
    Current,
    Pending,
}

/// Outcome of a completed attempt. Built exactly once, at the
/// `Active -> Complete` transition, then handed to the results store.
#[derive(Clone, Debug, PartialEq)]
pub struct AttemptResult {
    /// Jamo per minute over the whole attempt.
    pub speed: u32,
    /// Final accuracy percentage, 0..=100.
    pub accuracy: u32,
    /// First keystroke to completion, in seconds.
    pub elapsed_secs: f64,
}

/// What the presentation layer reads back after every input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub phase: Phase,
    pub accuracy: u32,
    pub speed: u32,
}

#[derive(Debug)]
pub struct TypingSession {
    target: String,
    input: String,
    phase: Phase,
    started_at: Option<SystemTime>,
    live_accuracy: u32,
    live_speed: u32,
    result: Option<AttemptResult>,
}

impl TypingSession {
    pub fn new(target: String) -> Self {
        Self {
            target,
            input: String::new(),
            phase: Phase::Ready,
            started_at: None,
            live_accuracy: 100,
            live_speed: 0,
            result: None,
        }
    }

    /// Apply the full current input text after a keystroke event.
    ///
    /// Events must arrive in the order they happened: the first non-empty
    /// submission fixes `started_at`, and completion is detected against
    /// the exact raw text. Input after completion is ignored rather than
    /// rejected, mirroring a front end that disables the field.
    pub fn submit_input(&mut self, text: &str) -> Snapshot {
        if self.phase == Phase::Complete {
            return self.snapshot();
        }

        if self.phase == Phase::Ready {
            if text.is_empty() {
                return self.snapshot();
            }
            self.started_at = Some(SystemTime::now());
            self.phase = Phase::Active;
        }

        text.clone_into(&mut self.input);
        self.live_accuracy = assessment::accuracy(&self.input, &self.target);
        self.live_speed = assessment::speed(self.started_at, &self.input);

        // Raw-character equality, not jamo equality: a syllable counts only
        // once fully composed, while live accuracy above already granted
        // partial credit for its jamo prefix.
        if self.input == self.target {
            self.phase = Phase::Complete;
            let elapsed_secs = self
                .started_at
                .and_then(|t| t.elapsed().ok())
                .unwrap_or_default()
                .as_secs_f64();
            self.result = Some(AttemptResult {
                speed: self.live_speed,
                accuracy: self.live_accuracy,
                elapsed_secs,
            });
        }

        self.snapshot()
    }

    /// Return to `Ready` with everything cleared. Valid from any phase and
    /// idempotent.
    pub fn reset(&mut self) {
        self.input.clear();
        self.phase = Phase::Ready;
        self.started_at = None;
        self.live_accuracy = 100;
        self.live_speed = 0;
        self.result = None;
    }

    /// Swap in a new target for the next attempt and reset.
    pub fn restart_with(&mut self, target: String) {
        self.target = target;
        self.reset();
    }

    /// The completed attempt, or `None` while the attempt is still running.
    pub fn result(&self) -> Option<&AttemptResult> {
        self.result.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn live_accuracy(&self) -> u32 {
        self.live_accuracy
    }

    pub fn live_speed(&self) -> u32 {
        self.live_speed
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            accuracy: self.live_accuracy,
            speed: self.live_speed,
        }
    }

    /// Per-character rendering classes over the target text.
    pub fn char_feedback(&self) -> Vec<CharFeedback> {
        let typed: Vec<char> = self.input.chars().collect();
        self.target
            .chars()
            .enumerate()
            .map(|(i, expected)| match typed.get(i) {
                Some(&c) if c == expected => CharFeedback::Matched,
                Some(_) => CharFeedback::Wrong,
                None if i == typed.len() => CharFeedback::Current,
                None => CharFeedback::Pending,
            })
            .collect()
    }

    /// The jamo the virtual keyboard should highlight next.
    pub fn next_jamo(&self) -> Option<char> {
        hangul::next_jamo(&self.input, &self.target)
    }
}
