//! Practice modes and their content mapping.

use serde::{Deserialize, Serialize};

/// Every practice surface that can produce a stored attempt. The results
/// store accepts exactly this set as its mode tag; an unsupported mode is a
/// compile error rather than a runtime string.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PracticeMode {
    Vowel,
    Consonant,
    Word,
    Sentence,
    Story,
    Falling,
    TimeAttack,
}

/// Built-in content family backing a mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    Vowels,
    Consonants,
    Words,
    Sentences,
}

impl PracticeMode {
    pub const ALL: [PracticeMode; 7] = [
        PracticeMode::Vowel,
        PracticeMode::Consonant,
        PracticeMode::Word,
        PracticeMode::Sentence,
        PracticeMode::Story,
        PracticeMode::Falling,
        PracticeMode::TimeAttack,
    ];

    /// Arcade modes run under an external countdown driver.
    pub fn is_game(self) -> bool {
        matches!(self, PracticeMode::Falling | PracticeMode::TimeAttack)
    }

    /// Which built-in list feeds this mode. Story mode normally generates
    /// its text and uses the sentence list only as fallback; the games draw
    /// from the word list.
    pub fn content_kind(self) -> ContentKind {
        match self {
            PracticeMode::Vowel => ContentKind::Vowels,
            PracticeMode::Consonant => ContentKind::Consonants,
            PracticeMode::Word | PracticeMode::Falling | PracticeMode::TimeAttack => {
                ContentKind::Words
            }
            PracticeMode::Sentence | PracticeMode::Story => ContentKind::Sentences,
        }
    }

    /// Parse a stored mode tag back into the enum.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "vowel" => Some(PracticeMode::Vowel),
            "consonant" => Some(PracticeMode::Consonant),
            "word" => Some(PracticeMode::Word),
            "sentence" => Some(PracticeMode::Sentence),
            "story" => Some(PracticeMode::Story),
            "falling" => Some(PracticeMode::Falling),
            "timeattack" => Some(PracticeMode::TimeAttack),
            _ => None,
        }
    }
}
