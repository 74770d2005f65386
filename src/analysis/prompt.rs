//! Brand analysis prompt.

use serde_json::Value;

use super::capture::CapturedPage;
use super::llm::{ChatMessage, ContentPart};

/// System instruction sent with every analysis request.
pub const SYSTEM_PROMPT: &str = r#"You are a Senior Brand Strategist & Design Intelligence Engine.
Your task is to analyze a real business website and extract its brand DNA, design system, and conversion strategy.
You must return a machine-readable JSON profile that can be used to recreate the brand visually and structurally.
Do NOT describe the website. Do NOT write marketing copy. Only output structured data.

OUTPUT FORMAT (JSON ONLY):
{
  "trade": "",
  "brand_name_guess": "",
  "tone": "",
  "target_audience": "",
  "positioning": "",
  "typography": {
    "heading_style": "",
    "body_style": "",
    "letter_spacing": "",
    "weight_bias": ""
  },
  "layout": {
    "hero_layout": "",
    "content_density": "",
    "section_spacing": "",
    "alignment": ""
  },
  "color_palette": {
    "primary": "",
    "secondary": "",
    "accent": "",
    "background": ""
  },
  "cta": {
    "style": "",
    "primary_text_examples": [],
    "urgency_level": ""
  },
  "imagery": {
    "style": "",
    "emotion": "",
    "image_tags": []
  },
  "iconography": {
    "style": "",
    "weight": ""
  },
  "motion": {
    "hover": "",
    "scroll": "",
    "speed": ""
  }
}"#;

/// Cuts `html` to at most `max_chars` characters on a char boundary.
pub fn truncate_html(html: &str, max_chars: usize) -> &str {
    match html.char_indices().nth(max_chars) {
        Some((idx, _)) => &html[..idx],
        None => html,
    }
}

/// Builds the user message for a captured page.
pub fn user_message(page: &CapturedPage, max_html_chars: usize) -> ChatMessage {
    let styles = serde_json::to_string(&page.styles).unwrap_or_else(|_| Value::Null.to_string());
    let text = format!(
        "Analyze this website: {}\n\nRENDERED HTML (Truncated):\n{}\n\nCOMPUTED STYLES:\n{}",
        page.url,
        truncate_html(&page.html, max_html_chars),
        styles
    );

    let mut parts = vec![ContentPart::text(text)];
    if let Some(png) = &page.screenshot_base64 {
        parts.push(ContentPart::image_url(format!("data:image/png;base64,{png}")));
    }
    ChatMessage::user_parts(parts)
}
