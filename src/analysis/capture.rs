//! Page capture backends.
//!
//! A capture yields the rendered HTML, computed-style samples and, when a
//! browser is available, a viewport screenshot.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::AnalysisError;

/// Desktop browser user agent presented to analyzed sites.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Capture viewport in CSS pixels.
pub const VIEWPORT: (u32, u32) = (1280, 800);

/// Collects computed styles of the body, the first five headings and the
/// first five buttons.
pub const STYLE_SAMPLER_JS: &str = r#"(() => {
  const getStyles = (el) => {
    const s = window.getComputedStyle(el);
    return {
      color: s.color,
      backgroundColor: s.backgroundColor,
      fontFamily: s.fontFamily,
      fontSize: s.fontSize,
      fontWeight: s.fontWeight,
      padding: s.padding,
      margin: s.margin,
      borderRadius: s.borderRadius,
      border: s.border,
      display: s.display,
      flexDirection: s.flexDirection,
      justifyContent: s.justifyContent,
      alignItems: s.alignItems
    };
  };
  const buttons = Array.from(document.querySelectorAll('button, a.btn, .button, [role="button"]'))
    .slice(0, 5)
    .map(el => ({ text: (el.textContent || '').trim(), styles: getStyles(el) }));
  const headings = Array.from(document.querySelectorAll('h1, h2, h3'))
    .slice(0, 5)
    .map(el => ({ tag: el.tagName, text: (el.textContent || '').trim(), styles: getStyles(el) }));
  return { body: getStyles(document.body), headings, buttons };
})()"#;

/// What a capture backend returns.
#[derive(Debug, Clone)]
pub struct CapturedPage {
    /// Requested URL
    pub url: String,
    /// Rendered (or fetched) HTML
    pub html: String,
    /// Computed style samples (`{body, headings, buttons}`)
    pub styles: Value,
    /// Base64 PNG of the viewport, when the backend can take one
    pub screenshot_base64: Option<String>,
}

/// Fetches a page for analysis.
#[async_trait]
pub trait PageCapture: Send + Sync {
    /// Captures `url`. Access refusals map to [`AnalysisError::Blocked`].
    async fn capture(&self, url: &str) -> Result<CapturedPage, AnalysisError>;
}

/// Plain HTTP fetch; no script execution, no screenshot.
#[derive(Clone)]
pub struct HttpCapture {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpCapture {
    /// Creates a fetcher with the given navigation timeout.
    pub fn new(timeout: Duration) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AnalysisError::Capture(e.to_string()))?;
        Ok(Self { http, timeout })
    }
}

#[async_trait]
impl PageCapture for HttpCapture {
    async fn capture(&self, url: &str) -> Result<CapturedPage, AnalysisError> {
        debug!(url, "Fetching page over HTTP");
        let resp = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::Blocked(format!("Timeout fetching {url}"))
                } else {
                    AnalysisError::Capture(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AnalysisError::Blocked(format!(
                "Navigation failed with status {}",
                status.as_u16()
            )));
        }

        let html = resp
            .text()
            .await
            .map_err(|e| AnalysisError::Capture(e.to_string()))?;

        Ok(CapturedPage {
            url: url.to_string(),
            html,
            styles: json!({ "body": null, "headings": [], "buttons": [] }),
            screenshot_base64: None,
        })
    }
}

#[cfg(feature = "browser")]
pub use chromium::ChromiumCapture;

#[cfg(feature = "browser")]
mod chromium {
    use async_trait::async_trait;
    use base64::Engine as _;
    use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
    use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
    use chromiumoxide::page::ScreenshotParams;
    use chromiumoxide::{Browser, Page};
    use futures::StreamExt;
    use serde_json::Value;
    use std::time::Duration;
    use tracing::{debug, warn};

    use super::{CapturedPage, PageCapture, STYLE_SAMPLER_JS, USER_AGENT, VIEWPORT};
    use crate::analysis::AnalysisError;

    /// Headless Chromium reached over a DevTools WebSocket.
    #[derive(Clone)]
    pub struct ChromiumCapture {
        endpoint: String,
        timeout: Duration,
    }

    impl ChromiumCapture {
        /// Creates a capture backend for the browser at `endpoint`.
        pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
            Self {
                endpoint: endpoint.into(),
                timeout,
            }
        }
    }

    fn capture_error(e: impl std::fmt::Display) -> AnalysisError {
        AnalysisError::Capture(e.to_string())
    }

    async fn snapshot(page: &Page, url: &str, timeout: Duration) -> Result<CapturedPage, AnalysisError> {
        page.set_user_agent(USER_AGENT).await.map_err(capture_error)?;
        page.execute(SetDeviceMetricsOverrideParams::new(
            i64::from(VIEWPORT.0),
            i64::from(VIEWPORT.1),
            1.0,
            false,
        ))
        .await
        .map_err(capture_error)?;

        let navigation = async {
            page.goto(url).await?;
            page.wait_for_navigation_response().await
        };
        let request = tokio::time::timeout(timeout, navigation)
            .await
            .map_err(|_| AnalysisError::Blocked(format!("Timeout navigating to {url}")))?
            .map_err(capture_error)?;

        let status = request
            .as_ref()
            .and_then(|r| r.response.as_ref())
            .map(|r| r.status);
        match status {
            Some(code) if (200..300).contains(&code) => {}
            Some(code) => {
                return Err(AnalysisError::Blocked(format!(
                    "Navigation failed with status {code}"
                )))
            }
            None => return Err(AnalysisError::Blocked("No navigation response".to_string())),
        }

        let html = page.content().await.map_err(capture_error)?;
        let png = page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .build(),
            )
            .await
            .map_err(capture_error)?;
        let styles: Value = page
            .evaluate(STYLE_SAMPLER_JS)
            .await
            .map_err(capture_error)?
            .into_value()
            .map_err(capture_error)?;

        Ok(CapturedPage {
            url: url.to_string(),
            html,
            styles,
            screenshot_base64: Some(base64::engine::general_purpose::STANDARD.encode(png)),
        })
    }

    #[async_trait]
    impl PageCapture for ChromiumCapture {
        async fn capture(&self, url: &str) -> Result<CapturedPage, AnalysisError> {
            debug!(url, endpoint = %self.endpoint, "Capturing page in Chromium");
            let (browser, mut handler) = Browser::connect(self.endpoint.as_str())
                .await
                .map_err(capture_error)?;
            let handler_task = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let result = match browser.new_page("about:blank").await {
                Ok(page) => {
                    let result = snapshot(&page, url, self.timeout).await;
                    // Only the tab is ours; the browser behind the endpoint is shared
                    if let Err(e) = page.close().await {
                        warn!(error = %e, "Failed to close capture tab");
                    }
                    result
                }
                Err(e) => Err(capture_error(e)),
            };

            drop(browser);
            handler_task.abort();

            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_covers_all_properties() {
        for prop in [
            "color",
            "backgroundColor",
            "fontFamily",
            "fontSize",
            "fontWeight",
            "padding",
            "margin",
            "borderRadius",
            "border",
            "display",
            "flexDirection",
            "justifyContent",
            "alignItems",
        ] {
            assert!(STYLE_SAMPLER_JS.contains(&format!("{prop}: s.{prop}")), "{prop}");
        }
        assert!(STYLE_SAMPLER_JS.contains(".slice(0, 5)"));
    }

    #[cfg(feature = "browser")]
    #[tokio::test]
    #[ignore] // Requires Chromium with remote debugging at TRADEFORGE_TEST_BROWSER_ENDPOINT
    async fn test_chromium_capture_leaves_browser_running() {
        let Ok(endpoint) = std::env::var("TRADEFORGE_TEST_BROWSER_ENDPOINT") else {
            return;
        };
        let capture = ChromiumCapture::new(endpoint, Duration::from_secs(30));

        // A second call reconnects to the same browser
        for _ in 0..2 {
            if let Err(e) = capture.capture("about:blank").await {
                assert!(
                    !e.to_string().contains("Connection refused"),
                    "browser went away: {e}"
                );
            }
        }
    }

    #[tokio::test]
    async fn test_http_capture_unreachable_host() {
        let capture = HttpCapture::new(Duration::from_secs(2)).unwrap();
        let err = capture.capture("http://127.0.0.1:9/").await.unwrap_err();
        assert!(!matches!(err, AnalysisError::InvalidUrl(_)));
    }
}
