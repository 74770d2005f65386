//! External brand analysis.
//!
//! `analyze(url)` captures a page, asks a chat model for a brand profile and
//! returns the reply as JSON with the flattened compatibility fields added.
//! Capture and model are traits so tests can substitute fakes.

pub mod capture;
pub mod llm;
pub mod prompt;

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::models::analysis::add_flattened_fields;
use capture::{CapturedPage, HttpCapture, PageCapture};
use llm::{ChatMessage, ChatModel, ChatRequest, LlmConfig, LlmError, OpenAiClient, ResponseFormat};

/// User-facing message for sites that refuse automated access.
pub const BLOCKED_MESSAGE: &str = "This website blocks automated analysis.";

/// Analysis failures.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No URL was supplied.
    #[error("URL is required")]
    MissingUrl,

    /// The URL is not an absolute http(s) URL.
    #[error("Invalid URL '{0}': expected an http or https address")]
    InvalidUrl(String),

    /// The site refused, timed out or answered with a non-OK status.
    #[error("{}", BLOCKED_MESSAGE)]
    Blocked(String),

    /// The capture backend failed for another reason.
    #[error("page capture failed: {0}")]
    Capture(String),

    /// The chat model request failed.
    #[error(transparent)]
    Model(#[from] LlmError),

    /// The model reply was not a JSON object.
    #[error("model reply is not a JSON object: {0}")]
    InvalidReply(String),
}

impl AnalysisError {
    /// Detail to log alongside the user-facing message.
    pub fn detail(&self) -> String {
        match self {
            Self::Blocked(detail) => detail.clone(),
            other => other.to_string(),
        }
    }

    /// Reclassifies failures whose message indicates refused access.
    fn into_blocked_if_refused(self) -> Self {
        match self {
            Self::Capture(message) if is_refusal(&message) => Self::Blocked(message),
            other => other,
        }
    }
}

/// Returns true for messages that mean the site refused automated access.
pub fn is_refusal(message: &str) -> bool {
    ["Timeout", "denied", "blocked", "status 403"]
        .iter()
        .any(|needle| message.contains(needle))
}

/// Checks that `url` is an absolute http(s) URL and returns it trimmed.
///
/// # Examples
///
/// ```
/// use tradeforge::analysis::validate_url;
///
/// assert!(validate_url("https://example.com").is_ok());
/// assert!(validate_url("ftp://example.com").is_err());
/// assert!(validate_url("  ").is_err());
/// ```
pub fn validate_url(url: &str) -> Result<String, AnalysisError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AnalysisError::MissingUrl);
    }
    let parsed =
        reqwest::Url::parse(url).map_err(|_| AnalysisError::InvalidUrl(url.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(AnalysisError::InvalidUrl(url.to_string()));
    }
    Ok(url.to_string())
}

/// Parses a model reply: strict JSON first, then JSON5.
///
/// Code fences around the object are tolerated.
pub fn parse_reply(reply: &str) -> Result<Value, AnalysisError> {
    let trimmed = strip_code_fence(reply.trim());
    let value = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => value,
        Err(strict) => {
            debug!(error = %strict, "Reply is not strict JSON, trying JSON5");
            json5::from_str::<Value>(trimmed)
                .map_err(|e| AnalysisError::InvalidReply(e.to_string()))?
        }
    };
    if !value.is_object() {
        return Err(AnalysisError::InvalidReply(
            "top-level value is not an object".to_string(),
        ));
    }
    Ok(value)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Brand analysis pipeline.
#[derive(Clone)]
pub struct Analyzer {
    capture: Arc<dyn PageCapture>,
    model: Arc<dyn ChatModel>,
    max_html_chars: usize,
}

impl Analyzer {
    /// Creates an analyzer from explicit collaborators.
    pub fn new(
        capture: Arc<dyn PageCapture>,
        model: Arc<dyn ChatModel>,
        max_html_chars: usize,
    ) -> Self {
        Self {
            capture,
            model,
            max_html_chars,
        }
    }

    /// Creates an analyzer from configuration.
    ///
    /// Uses headless Chromium when `browser_endpoint` is set and the crate
    /// was built with the `browser` feature, plain HTTP otherwise.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let timeout = Duration::from_secs(config.navigation_timeout_secs);
        let capture = capture_backend(config, timeout)?;
        let model = Arc::new(OpenAiClient::new(LlmConfig::from_config(config))?);
        Ok(Self::new(capture, model, config.max_html_chars))
    }

    /// Analyzes the site at `url`.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Blocked`] when the site refuses automated access;
    /// other variants for invalid input and capture or model failures.
    pub async fn analyze(&self, url: &str) -> Result<Value, AnalysisError> {
        let url = validate_url(url)?;
        info!(url = %url, "Analyzing site");

        let page = self
            .capture
            .capture(&url)
            .await
            .map_err(AnalysisError::into_blocked_if_refused)?;

        let reply = self.model.complete(self.request(&page)).await?;
        let mut analysis = parse_reply(&reply)?;
        add_flattened_fields(&mut analysis);
        Ok(analysis)
    }

    fn request(&self, page: &CapturedPage) -> ChatRequest {
        ChatRequest {
            model: self.model.model().to_string(),
            messages: vec![
                ChatMessage::system(prompt::SYSTEM_PROMPT),
                prompt::user_message(page, self.max_html_chars),
            ],
            response_format: Some(ResponseFormat::json_object()),
        }
    }
}

#[cfg(feature = "browser")]
fn capture_backend(
    config: &AnalysisConfig,
    timeout: Duration,
) -> Result<Arc<dyn PageCapture>, AnalysisError> {
    match &config.browser_endpoint {
        Some(endpoint) => Ok(Arc::new(capture::ChromiumCapture::new(endpoint.clone(), timeout))),
        None => Ok(Arc::new(HttpCapture::new(timeout)?)),
    }
}

#[cfg(not(feature = "browser"))]
fn capture_backend(
    config: &AnalysisConfig,
    timeout: Duration,
) -> Result<Arc<dyn PageCapture>, AnalysisError> {
    if config.browser_endpoint.is_some() {
        tracing::warn!("browser_endpoint is set but the browser feature is disabled, using HTTP capture");
    }
    Ok(Arc::new(HttpCapture::new(timeout)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeCapture(Result<(), String>);

    #[async_trait]
    impl PageCapture for FakeCapture {
        async fn capture(&self, url: &str) -> Result<CapturedPage, AnalysisError> {
            match &self.0 {
                Ok(()) => Ok(CapturedPage {
                    url: url.to_string(),
                    html: "<h1>Crystal Pools</h1>".to_string(),
                    styles: json!({"body": {"color": "rgb(0, 0, 0)"}}),
                    screenshot_base64: None,
                }),
                Err(message) => Err(AnalysisError::Capture(message.clone())),
            }
        }
    }

    struct FakeModel {
        reply: String,
        seen: Mutex<Vec<ChatRequest>>,
    }

    #[async_trait]
    impl ChatModel for FakeModel {
        async fn complete(&self, request: ChatRequest) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(request);
            Ok(self.reply.clone())
        }

        fn model(&self) -> &str {
            "fake-model"
        }
    }

    fn analyzer(capture: Result<(), String>, reply: &str) -> (Analyzer, Arc<FakeModel>) {
        let model = Arc::new(FakeModel {
            reply: reply.to_string(),
            seen: Mutex::new(Vec::new()),
        });
        let analyzer = Analyzer::new(Arc::new(FakeCapture(capture)), model.clone(), 10_000);
        (analyzer, model)
    }

    const REPLY: &str = r##"{
        "trade": "Pool Cleaner",
        "layout": {"hero_layout": "split"},
        "color_palette": {"primary": "#0EA5E9", "secondary": "", "accent": "#F59E0B"},
        "cta": {"style": "pill", "primary_text_examples": ["Book"]},
        "imagery": {"image_tags": ["pool"]},
        "typography": {"heading_style": "bold sans"}
    }"##;

    #[tokio::test]
    async fn test_analyze_flattens_reply() {
        let (analyzer, model) = analyzer(Ok(()), REPLY);
        let analysis = analyzer.analyze("https://pools.example").await.unwrap();

        assert_eq!(analysis["trade"], "Pool Cleaner");
        assert_eq!(analysis["color_palette"], json!(["#0EA5E9", "#F59E0B"]));
        assert_eq!(analysis["hero_style"], "split");
        assert_eq!(analysis["cta_style"], "pill");
        assert_eq!(analysis["typography"], "bold sans");
        assert_eq!(analysis["image_tags"], json!(["pool"]));

        let seen = model.seen.lock().unwrap();
        let request = serde_json::to_value(&seen[0]).unwrap();
        assert_eq!(request["model"], "fake-model");
        assert_eq!(request["response_format"]["type"], "json_object");
        assert_eq!(request["messages"][0]["role"], "system");
    }

    #[tokio::test]
    async fn test_refusals_become_blocked() {
        for message in ["Timeout 30000ms exceeded", "access denied", "status 403"] {
            let (analyzer, _) = analyzer(Err(message.to_string()), REPLY);
            let err = analyzer.analyze("https://pools.example").await.unwrap_err();
            assert!(matches!(err, AnalysisError::Blocked(_)), "{message}");
            assert_eq!(err.to_string(), BLOCKED_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_other_capture_failures_pass_through() {
        let (analyzer, _) = analyzer(Err("connection reset".to_string()), REPLY);
        let err = analyzer.analyze("https://pools.example").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Capture(_)));
    }

    #[tokio::test]
    async fn test_invalid_url_never_captures() {
        let (analyzer, model) = analyzer(Ok(()), REPLY);
        assert!(matches!(
            analyzer.analyze("").await,
            Err(AnalysisError::MissingUrl)
        ));
        assert!(matches!(
            analyzer.analyze("javascript:alert(1)").await,
            Err(AnalysisError::InvalidUrl(_))
        ));
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_parse_reply_lenient() {
        let value = parse_reply("```json\n{trade: 'Roofer', tone: 'calm',}\n```").unwrap();
        assert_eq!(value["trade"], "Roofer");
        assert!(matches!(
            parse_reply("[1, 2]"),
            Err(AnalysisError::InvalidReply(_))
        ));
        assert!(parse_reply("not json at all").is_err());
    }
}
