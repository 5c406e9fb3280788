//! Built-in practice material, embedded at compile time.

use crate::mode::ContentKind;
use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static CONTENT_DIR: Dir = include_dir!("src/content/data");

#[derive(Deserialize, Clone, Debug)]
pub struct WordList {
    pub name: String,
    pub size: u32,
    pub entries: Vec<String>,
}

impl WordList {
    /// Load the embedded list backing a content family.
    pub fn load(kind: ContentKind) -> Self {
        let file_name = match kind {
            ContentKind::Vowels => "vowels.json",
            ContentKind::Consonants => "consonants.json",
            ContentKind::Words => "words.json",
            ContentKind::Sentences => "sentences.json",
        };
        read_list_from_file(file_name).unwrap()
    }
}

fn read_list_from_file(file_name: &str) -> Result<WordList, Box<dyn Error>> {
    let file = CONTENT_DIR
        .get_file(file_name)
        .expect("Content file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let list = from_str(file_as_str).expect("Unable to deserialize content json");

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_vowels() {
        let list = WordList::load(ContentKind::Vowels);
        assert_eq!(list.name, "vowels");
        assert_eq!(list.entries.len(), 21);
        assert!(list.entries.iter().all(|e| e.chars().count() == 1));
    }

    #[test]
    fn test_load_consonants() {
        let list = WordList::load(ContentKind::Consonants);
        assert_eq!(list.name, "consonants");
        assert_eq!(list.entries.len(), 19);
    }

    #[test]
    fn test_load_words() {
        let list = WordList::load(ContentKind::Words);
        assert_eq!(list.name, "words");
        assert!(!list.entries.is_empty());
        assert!(list.size > 0);
    }

    #[test]
    fn test_load_sentences() {
        let list = WordList::load(ContentKind::Sentences);
        assert_eq!(list.name, "sentences");
        assert!(list.entries.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_size_matches_entries() {
        for kind in [
            ContentKind::Vowels,
            ContentKind::Consonants,
            ContentKind::Words,
            ContentKind::Sentences,
        ] {
            let list = WordList::load(kind);
            assert_eq!(list.size as usize, list.entries.len(), "{}", list.name);
        }
    }

    #[test]
    fn test_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "size": 2,
            "entries": ["가나", "다라"]
        }
        "#;

        let list: WordList = from_str(json_data).expect("Failed to deserialize test list");

        assert_eq!(list.name, "test");
        assert_eq!(list.size, 2);
        assert_eq!(list.entries.len(), 2);
    }

    #[test]
    #[should_panic(expected = "Content file not found")]
    fn test_read_nonexistent_content_file() {
        let _result = read_list_from_file("nonexistent.json");
    }
}
