//! Insights over an OpenAI-compatible chat completions endpoint.

use super::prompt::{SYSTEM_PROMPT, build_prompt, parse_insights};
use super::{InsightsError, InsightsProvider, InsightsRequest};
use crate::config::InsightsConfig;
use crate::model::Insights;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const API_KEY_VARS: [&str; 2] = ["SVCGRAPH_API_KEY", "OPENAI_API_KEY"];

pub struct OpenAiInsightsProvider {
    api_key: SecretString,
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiInsightsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiInsightsProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiInsightsProvider {
    pub fn new(config: &InsightsConfig) -> Result<Self, InsightsError> {
        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => API_KEY_VARS
                .iter()
                .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
                .map(SecretString::from)
                .ok_or_else(|| {
                    InsightsError::NotConfigured(format!(
                        "no API key; set {} or insights.api_key",
                        API_KEY_VARS.join(" or ")
                    ))
                })?,
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl InsightsProvider for OpenAiInsightsProvider {
    async fn advise(&self, request: &InsightsRequest) -> Result<Insights, InsightsError> {
        let prompt = build_prompt(request)?;
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: 0.2,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let url = format!("{}/chat/completions", self.api_base);
        debug!(%url, model = %self.model, "sending insights request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| InsightsError::Malformed(format!("unexpected completion body: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| InsightsError::Malformed("completion has no content".to_string()))?;

        parse_insights(&content)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
