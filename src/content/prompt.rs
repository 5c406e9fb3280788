//! Target-text generation for a practice session.

use crate::content::builtin::WordList;
use crate::content::generator::StoryGenerator;
use crate::content::filter;
use crate::mode::{ContentKind, PracticeMode};
use rand::seq::SliceRandom;
use tracing::warn;

/// Configuration for prompt generation.
#[derive(Debug, Clone)]
pub struct PromptConfig {
    pub mode: PracticeMode,
    pub number_of_words: usize,
    pub story_sentences: usize,
}

/// Produces the target text a session is created with.
pub struct PromptGenerator {
    config: PromptConfig,
    generator: StoryGenerator,
}

impl PromptGenerator {
    pub fn new(config: PromptConfig) -> Self {
        Self {
            config,
            generator: StoryGenerator::from_env(),
        }
    }

    /// Inject a generator, for callers that configure or stub the API.
    pub fn with_generator(config: PromptConfig, generator: StoryGenerator) -> Self {
        Self { config, generator }
    }

    /// Generate the target text and its unit count (words, or single jamo
    /// for the vowel/consonant drills).
    pub fn generate_prompt(&self) -> (String, usize) {
        match self.config.mode {
            PracticeMode::Story => self.generate_story(),
            mode => self.pick_units(mode.content_kind()),
        }
    }

    fn pick_units(&self, kind: ContentKind) -> (String, usize) {
        let list = WordList::load(kind);
        let mut rng = rand::thread_rng();
        let picks: Vec<String> = list
            .entries
            .choose_multiple(&mut rng, self.config.number_of_words)
            .cloned()
            .collect();
        let count = picks.len();
        (picks.join(" "), count)
    }

    /// Story mode asks the generative API first; anything unusable falls
    /// back to the built-in sentence list without interrupting the session.
    fn generate_story(&self) -> (String, usize) {
        match self.generator.generate_story(self.config.story_sentences) {
            Ok(story) if filter::is_clean(&story) => {
                let count = story.split_whitespace().count();
                (story, count)
            }
            Ok(_) => {
                warn!("generated story rejected by content filter, using built-in sentences");
                self.fallback_story()
            }
            Err(err) => {
                warn!(%err, "story generation failed, using built-in sentences");
                self.fallback_story()
            }
        }
    }

    fn fallback_story(&self) -> (String, usize) {
        let list = WordList::load(ContentKind::Sentences);
        let mut rng = rand::thread_rng();
        let picks: Vec<String> = list
            .entries
            .choose_multiple(&mut rng, self.config.story_sentences)
            .cloned()
            .collect();
        let text = picks.join(" ");
        let count = text.split_whitespace().count();
        (text, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mode: PracticeMode) -> PromptConfig {
        PromptConfig {
            mode,
            number_of_words: 5,
            story_sentences: 3,
        }
    }

    fn offline(mode: PracticeMode) -> PromptGenerator {
        PromptGenerator::with_generator(config(mode), StoryGenerator::new(None))
    }

    #[test]
    fn test_word_prompt_has_requested_count() {
        let (prompt, count) = offline(PracticeMode::Word).generate_prompt();
        assert_eq!(count, 5);
        assert_eq!(prompt.split(' ').count(), 5);
    }

    #[test]
    fn test_vowel_prompt_is_single_jamo_units() {
        let (prompt, count) = offline(PracticeMode::Vowel).generate_prompt();
        assert_eq!(count, 5);
        for unit in prompt.split(' ') {
            assert_eq!(unit.chars().count(), 1);
        }
    }

    #[test]
    fn test_sentence_prompt_nonempty() {
        let (prompt, count) = offline(PracticeMode::Sentence).generate_prompt();
        assert!(!prompt.is_empty());
        assert!(count > 0);
    }

    #[test]
    fn test_game_modes_draw_words() {
        let (prompt, count) = offline(PracticeMode::Falling).generate_prompt();
        assert_eq!(count, 5);
        assert!(!prompt.is_empty());
    }

    #[test]
    fn test_story_falls_back_when_generator_disabled() {
        let (prompt, count) = offline(PracticeMode::Story).generate_prompt();
        assert!(!prompt.is_empty());
        assert!(count > 0);
        // Fallback text comes from the curated sentence list.
        assert!(filter::is_clean(&prompt));
    }

    #[test]
    fn test_count_never_exceeds_list_size() {
        let generator = PromptGenerator::with_generator(
            PromptConfig {
                mode: PracticeMode::Vowel,
                number_of_words: 100,
                story_sentences: 3,
            },
            StoryGenerator::new(None),
        );
        let (_, count) = generator.generate_prompt();
        assert_eq!(count, 21);
    }
}
