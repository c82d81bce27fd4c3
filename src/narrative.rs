//! Narrative generation collaborator client
//!
//! Sends the assembled prompt to a chat-completions API and returns the
//! completion text as-is. The collaborator is the sole source of truth for
//! the narrative: its output is not structurally validated or repaired.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::config::NarrativeConfig;
use crate::error::ChartError;
use crate::Result;

/// Turns a structured prompt into free-form narrative text
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// HTTP client for the chat-completions API
pub struct NarrativeApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl NarrativeApiClient {
    pub fn new(config: &NarrativeConfig) -> anyhow::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ChartError::config("Narrative API key is not configured"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("AstroAI/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl Narrator for NarrativeApiClient {
    #[instrument(skip(self, prompt), fields(prompt_chars = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!("Requesting narrative completion");

        let url = format!("{}/chat/completions", self.base_url);
        let request = wire::CompletionRequest {
            model: &self.model,
            messages: vec![wire::Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChartError::upstream(format!(
                "narrative request failed with status {status}: {body}"
            )));
        }

        let payload: wire::CompletionResponse = response.json().await.map_err(|e| {
            ChartError::upstream(format!("invalid narrative response: {e}"))
        })?;

        let text = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ChartError::upstream("narrative response contained no completion"))?;

        info!("Received narrative of {} characters", text.len());
        Ok(text)
    }
}

/// Chat-completions wire structures
mod wire {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct CompletionRequest<'a> {
        pub model: &'a str,
        pub messages: Vec<Message<'a>>,
    }

    #[derive(Debug, Serialize)]
    pub struct Message<'a> {
        pub role: &'a str,
        pub content: &'a str,
    }

    #[derive(Debug, Deserialize)]
    pub struct CompletionResponse {
        #[serde(default)]
        pub choices: Vec<Choice>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Choice {
        pub message: ResponseMessage,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseMessage {
        pub content: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_api_key() {
        let config = NarrativeConfig::default();
        assert!(NarrativeApiClient::new(&config).is_err());
    }

    #[test]
    fn test_completion_response_parsing() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Tu carta natal revela..."}}
            ]
        }"#;
        let payload: wire::CompletionResponse = serde_json::from_str(json).unwrap();
        let content = payload.choices[0].message.content.as_deref();
        assert_eq!(content, Some("Tu carta natal revela..."));
    }

    #[test]
    fn test_empty_choices_parse_cleanly() {
        let payload: wire::CompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(payload.choices.is_empty());
    }
}
