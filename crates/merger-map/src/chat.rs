//! OpenAI-compatible chat-completion mapping provider.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use merger_model::FieldMapping;

use crate::error::{MappingError, Result};
use crate::file::save_mapping_payload;
use crate::payload::parse_mapping_payload;
use crate::provider::MappingProvider;

/// Default API root; `/chat/completions` is appended.
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_MODEL: &str = "gpt-4";

/// Low temperature keeps the proposed grouping stable between runs.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Connection settings for [`ChatMappingProvider`].
#[derive(Debug, Clone)]
pub struct ChatMappingConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Receives the raw completion text before it is parsed.
    pub mapping_file: Option<PathBuf>,
}

impl ChatMappingConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: None,
            mapping_file: None,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Builds the instruction sent to the model for a list of raw field names.
pub fn build_prompt(fields: &[String]) -> String {
    // Serializing a slice of strings cannot fail.
    let field_list = serde_json::to_string(fields).unwrap_or_else(|_| "[]".to_string());
    format!(
        "You are a data normalization expert. Below is a list of raw column names \
         extracted from multiple datasets.\n\n{field_list}\n\n\
         Please create a field mapping JSON where similar fields are grouped under one \
         standardized field name. Example format:\n\
         {{\n  \"StandardFieldName1\": [\"variation1\", \"variation2\"],\n  \
         \"StandardFieldName2\": [\"variation1\", \"variation2\"]\n}}\n\n\
         Output only the JSON."
    )
}

/// Asks a chat-completion endpoint to group raw field names.
pub struct ChatMappingProvider {
    client: Client,
    config: ChatMappingConfig,
}

impl ChatMappingProvider {
    pub fn new(config: ChatMappingConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn request_completion(&self, prompt: String) -> Result<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(self.config.endpoint())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(
                USER_AGENT,
                format!("master-merger/{}", env!("CARGO_PKG_VERSION")),
            )
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(MappingError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text()?;
        let completion: ChatResponse =
            serde_json::from_str(&text).map_err(|e| MappingError::MalformedResponse {
                reason: e.to_string(),
            })?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| MappingError::MalformedResponse {
                reason: "response contains no choices".to_string(),
            })
    }
}

impl MappingProvider for ChatMappingProvider {
    fn propose(&self, fields: &[String]) -> Result<FieldMapping> {
        info!(
            model = %self.config.model,
            field_count = fields.len(),
            "requesting field mapping"
        );
        let completion = self.request_completion(build_prompt(fields))?;
        debug!(completion = %completion.trim(), "field mapping completion received");
        if let Some(path) = &self.config.mapping_file {
            match save_mapping_payload(path, &completion) {
                Ok(()) => info!(path = %path.display(), "field mapping saved"),
                Err(err) => warn!(error = %err, "could not save field mapping"),
            }
        }
        parse_mapping_payload(&completion)
    }

    fn name(&self) -> &str {
        "chat-completion"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_field_list_as_json() {
        let prompt = build_prompt(&["First Name".to_string(), "e\"mail".to_string()]);
        assert!(prompt.contains(r#"["First Name","e\"mail"]"#));
        assert!(prompt.ends_with("Output only the JSON."));
    }

    #[test]
    fn endpoint_joins_base_url() {
        let mut config = ChatMappingConfig::new("key");
        assert_eq!(config.endpoint(), "https://api.openai.com/v1/chat/completions");
        config.base_url = "http://localhost:8080/v1/".to_string();
        assert_eq!(config.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn response_shape_deserializes() {
        let json = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"{}"}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "{}");
    }
}
