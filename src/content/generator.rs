//! Client for the generative-language API that writes practice stories.
//!
//! The service is optional: with no API key in the environment the
//! generator reports itself disabled and callers fall back to the built-in
//! sentence list. Requests are synchronous; the driving layer already
//! treats content sourcing as "may be slow, may fail".

use std::env;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::content::ContentError;

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl GeneratorConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("TADAK_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("TADAK_AI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("TADAK_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

pub struct StoryGenerator {
    client: Client,
    config: Option<GeneratorConfig>,
}

impl StoryGenerator {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GeneratorConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GeneratorConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Generate a short story of roughly `sentences` sentences.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` when the service is disabled, the request
    /// fails, or the response carries no text.
    pub fn generate_story(&self, sentences: usize) -> Result<String, ContentError> {
        let config = self.config.as_ref().ok_or(ContentError::Disabled)?;

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let prompt = format!(
            "초등학생이 타자 연습으로 따라 칠 짧은 한국어 동화를 {sentences}문장으로 써 줘. \
             문장은 짧게, 쉬운 낱말만 사용하고, 한글과 문장 부호 외에는 아무것도 넣지 마."
        );
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.7,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()?;

        if !response.status().is_success() {
            return Err(ContentError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json()?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ContentError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_disabled_without_config() {
        let generator = StoryGenerator::new(None);
        assert!(!generator.enabled());
    }

    #[test]
    fn test_disabled_generator_errors() {
        let generator = StoryGenerator::new(None);
        assert_matches!(generator.generate_story(5), Err(ContentError::Disabled));
    }

    #[test]
    fn test_config_requires_nonempty_key() {
        // from_env depends on process environment; the constructor contract
        // is what matters here.
        let config = GeneratorConfig {
            base_url: "https://example.invalid/v1".into(),
            api_key: "k".into(),
            model: "m".into(),
        };
        let generator = StoryGenerator::new(Some(config));
        assert!(generator.enabled());
    }

    #[test]
    fn test_response_shape_deserializes() {
        let json = r#"{"choices":[{"message":{"content":"옛날 옛적에 토끼가 살았어요."}}]}"#;
        let body: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            body.choices[0].message.content.as_deref(),
            Some("옛날 옛적에 토끼가 살았어요.")
        );
    }

    #[test]
    fn test_response_without_content() {
        let json = r#"{"choices":[{"message":{}}]}"#;
        let body: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(body.choices[0].message.content.is_none());
    }
}
