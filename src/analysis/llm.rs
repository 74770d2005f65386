//! OpenAI-compatible chat completion client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::AnalysisConfig;

/// Longest upstream error body kept in an error.
const MAX_ERROR_BODY_BYTES: usize = 8 * 1024;

/// Client settings.
#[derive(Clone, Debug)]
pub struct LlmConfig {
    /// API base URL without trailing slash
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Bearer token, if the endpoint needs one
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl LlmConfig {
    /// Builds client settings from the analysis config and environment.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            base_url: config.effective_base_url().trim_end_matches('/').to_string(),
            model: config.llm_model.clone(),
            api_key: config.api_key(),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Chat completion failures.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Transport failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The endpoint returned a structured error.
    #[error("upstream returned error: status={status} message={message}")]
    Upstream {
        /// HTTP status
        status: StatusCode,
        /// Upstream message
        message: String,
    },

    /// The endpoint returned an unstructured error.
    #[error("upstream returned non-JSON error: status={status} body={body}")]
    UpstreamBody {
        /// HTTP status
        status: StatusCode,
        /// Truncated body
        body: String,
    },

    /// The completion had no message content.
    #[error("completion contained no content")]
    EmptyReply,
}

/// A chat model that turns messages into a reply string.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Runs one completion and returns the first choice's content.
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError>;

    /// Model name put into requests.
    fn model(&self) -> &str;
}

/// Chat completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model name
    pub model: String,
    /// Conversation
    pub messages: Vec<ChatMessage>,
    /// Requested reply format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// `{"type": "json_object"}`
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl ResponseFormat {
    /// Forces a JSON object reply.
    pub fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

/// One message of a conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`
    pub role: &'static str,
    /// Message body
    pub content: MessageContent,
}

impl ChatMessage {
    /// A plain-text system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: MessageContent::Text(text.into()),
        }
    }

    /// A multi-part user message.
    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: "user",
            content: MessageContent::Parts(parts),
        }
    }
}

/// Message body: plain text or typed parts.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text
    Text(String),
    /// Text and image parts
    Parts(Vec<ContentPart>),
}

/// A typed part of a user message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text part
    Text {
        /// Text
        text: String,
    },
    /// Image part
    ImageUrl {
        /// Image reference
        image_url: ImageUrl,
    },
}

impl ContentPart {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// An image part pointing at `url` (may be a data URL).
    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

/// Image reference.
#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    /// URL or data URL
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorObject,
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    message: Option<String>,
}

/// HTTP client for `/chat/completions`.
#[derive(Clone)]
pub struct OpenAiClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl OpenAiClient {
    /// Creates a client.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tradeforge/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http })
    }

    /// Client settings.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn to_upstream_error(resp: reqwest::Response) -> LlmError {
        let status = resp.status();
        let body = match resp.bytes().await {
            Ok(mut b) => {
                b.truncate(MAX_ERROR_BODY_BYTES);
                String::from_utf8_lossy(&b).to_string()
            }
            Err(e) => {
                warn!(error = %e, "failed to read upstream error body");
                "<failed to read error body>".to_string()
            }
        };
        if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(&body) {
            let message = parsed
                .error
                .message
                .unwrap_or_else(|| "unknown upstream error".to_string());
            return LlmError::Upstream { status, message };
        }
        LlmError::UpstreamBody { status, body }
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        debug!(url = %url, model = %request.model, "Requesting chat completion");

        let mut builder = self.http.post(&url).timeout(self.config.timeout).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }
        let resp = builder.send().await?;

        if !resp.status().is_success() {
            return Err(Self::to_upstream_error(resp).await);
        }

        let body: ChatResponse = serde_json::from_slice(&resp.bytes().await?)?;
        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyReply)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "gpt-4o".to_string(),
            messages: vec![
                ChatMessage::system("be terse"),
                ChatMessage::user_parts(vec![
                    ContentPart::text("hello"),
                    ContentPart::image_url("data:image/png;base64,AA"),
                ]),
            ],
            response_format: Some(ResponseFormat::json_object()),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["content"], "be terse");
        assert_eq!(json["messages"][1]["content"][0]["type"], "text");
        assert_eq!(json["messages"][1]["content"][1]["type"], "image_url");
    }

    #[test]
    fn test_config_from_analysis_settings() {
        let mut analysis = AnalysisConfig::default();
        analysis.llm_base_url = "http://localhost:8080/v1/".to_string();
        analysis.llm_model = "local".to_string();
        analysis.api_key_env = "TRADEFORGE_TEST_UNSET_KEY".to_string();

        let config = LlmConfig::from_config(&analysis);
        if std::env::var(crate::config::LLM_BASE_URL_ENV).is_err() {
            assert_eq!(config.base_url, "http://localhost:8080/v1");
        }
        assert_eq!(config.model, "local");
        assert!(config.api_key.is_none());
    }
}
