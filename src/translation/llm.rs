use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;
use std::time::Duration;

use super::Translator;
use crate::config::TranslationConfig;

/// Build the system prompt for translating recipe text.
pub fn build_translation_prompt(source_language: &str, target_language: &str) -> String {
    format!(
        "You translate recipe text from language '{source}' to language '{target}'. \
         The text is a single ingredient name, a measurement, or one cooking step. \
         Reply with the translation only, without quotes, notes or extra lines. \
         Keep numbers and units as they are.",
        source = source_language.trim(),
        target = target_language.trim(),
    )
}

/// Translator backed by an OpenAI-compatible chat completions endpoint
pub struct LlmTranslator {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    prompt: String,
}

impl LlmTranslator {
    /// Create a translator from configuration
    pub fn new(config: &TranslationConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok());

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(LlmTranslator {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            prompt: build_translation_prompt(&config.source_language, &config.target_language),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: Option<String>, base_url: String, model: String) -> Self {
        LlmTranslator {
            client: Client::new(),
            api_key,
            base_url,
            model,
            prompt: build_translation_prompt("en", "id"),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn prepare(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let url = format!("{}/v1/models/{}", self.base_url, self.model);
        let response = self.authorize(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            return Err(format!(
                "Model '{}' is not available: status {}",
                self.model,
                response.status()
            )
            .into());
        }
        Ok(())
    }

    async fn translate(&self, text: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        let request = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": self.prompt},
                    {"role": "user", "content": text}
                ],
                "temperature": 0.0
            }));

        let response = self.authorize(request).send().await?;
        if !response.status().is_success() {
            return Err(format!("Translation request failed: {}", response.status()).into());
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);
        let translated = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("Failed to extract content from response")?
            .trim()
            .to_string();

        if translated.is_empty() {
            return Err("Empty translation".into());
        }
        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_translate() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer fake_api_key")
            .match_body(Matcher::PartialJson(json!({"model": "gpt-4o-mini"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"content": " Bawang putih \n"}}]}"#)
            .create_async()
            .await;

        let translator = LlmTranslator::with_base_url(
            Some("fake_api_key".to_string()),
            server.url(),
            "gpt-4o-mini".to_string(),
        );

        let result = translator.translate("Garlic").await.unwrap();
        assert_eq!(result, "Bawang putih");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_translate_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body(r#"{"error": "rate limited"}"#)
            .create_async()
            .await;

        let translator =
            LlmTranslator::with_base_url(None, server.url(), "gpt-4o-mini".to_string());
        assert!(translator.translate("Garlic").await.is_err());
    }

    #[tokio::test]
    async fn test_prepare_checks_model() {
        let mut server = Server::new_async().await;
        let ok = server
            .mock("GET", "/v1/models/llama3")
            .with_status(200)
            .with_body(r#"{"id": "llama3"}"#)
            .create_async()
            .await;
        let missing = server
            .mock("GET", "/v1/models/missing")
            .with_status(404)
            .create_async()
            .await;

        let translator = LlmTranslator::with_base_url(None, server.url(), "llama3".to_string());
        assert!(translator.prepare().await.is_ok());

        let translator = LlmTranslator::with_base_url(None, server.url(), "missing".to_string());
        assert!(translator.prepare().await.is_err());

        ok.assert_async().await;
        missing.assert_async().await;
    }

    #[test]
    fn test_prompt_names_languages() {
        let prompt = build_translation_prompt(" en ", "id");
        assert!(prompt.contains("'en'"));
        assert!(prompt.contains("'id'"));
    }

    #[test]
    fn test_new_trims_base_url() {
        let config = TranslationConfig {
            base_url: "http://localhost:11434/".to_string(),
            api_key: Some("k".to_string()),
            ..Default::default()
        };
        let translator = LlmTranslator::new(&config).unwrap();
        assert_eq!(translator.base_url, "http://localhost:11434");
        assert_eq!(translator.name(), "openai");
    }
}
