use futures::future::BoxFuture;
use reqwest::Client;
use serde_json::{json, Value};
use crate::config::Config;
use crate::error::AdvisorError;
use crate::handlers::style_advisor_dtos::{StylePrompt, StyleRecommendation};

const STYLE_PROMPT: &str = r#"You are a master barber at "Mankind Gentlemen Barber Shop".
Analyze the user's request. If an image is provided, analyze the face shape, hair texture, and current length.
If no image is provided, rely on the description.

User Description: "{description}"

Recommend 3 specific haircut or beard styles that would suit this gentleman perfectly.
For each style, provide a name, a brief description of why it works, and how to style it.

Return the response as a JSON array of objects with keys: styleName, description, suitability."#;

/// Anything that can turn a validated prompt into ordered recommendations.
#[cfg_attr(test, mockall::automock)]
pub trait StyleModel: Send + Sync {
    fn recommend(&self, prompt: StylePrompt) -> BoxFuture<'static, Result<Vec<StyleRecommendation>, AdvisorError>>;
}

pub struct GeminiClient {
    http: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            api_base: config.gemini_api_base.trim_end_matches('/').to_string(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_base, self.model)
    }
}

impl StyleModel for GeminiClient {
    fn recommend(&self, prompt: StylePrompt) -> BoxFuture<'static, Result<Vec<StyleRecommendation>, AdvisorError>> {
        let http = self.http.clone();
        let url = self.endpoint();
        let api_key = self.api_key.clone();
        Box::pin(async move {
            let body = build_request_body(&prompt);
            let response = http
                .post(&url)
                .header("x-goog-api-key", api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let error_text = response.text().await.unwrap_or_default();
                tracing::error!("Gemini returned {}: {}", status, error_text);
                return Err(upstream_status_error(status.as_u16()));
            }

            let payload: Value = response.json().await?;
            parse_recommendations(&payload)
        })
    }
}

/// A rejected key or unknown model is our setup, not the provider's fault.
pub fn upstream_status_error(status: u16) -> AdvisorError {
    match status {
        401 | 403 => AdvisorError::Misconfigured(format!("Gemini rejected the API key ({})", status)),
        404 => AdvisorError::Misconfigured("Gemini model not found".to_string()),
        _ => AdvisorError::UpstreamStatus(status),
    }
}

pub fn build_prompt_text(description: &str) -> String {
    STYLE_PROMPT.replace("{description}", description)
}

/// One user turn: the prompt text, then the inline photo if there is one.
/// The response is constrained to an array of objects with three required strings.
pub fn build_request_body(prompt: &StylePrompt) -> Value {
    let mut parts = vec![json!({ "text": build_prompt_text(&prompt.description) })];
    if let Some(image) = &prompt.image {
        parts.push(json!({
            "inline_data": {
                "mime_type": image.media_type,
                "data": image.data,
            }
        }));
    }

    json!({
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "styleName": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "suitability": { "type": "STRING" }
                    },
                    "required": ["styleName", "description", "suitability"]
                }
            }
        }
    })
}

/// Pull the JSON text out of the first candidate and parse it as the exact schema.
/// Anything else, including an empty list, is an error.
pub fn parse_recommendations(payload: &Value) -> Result<Vec<StyleRecommendation>, AdvisorError> {
    if let Some(reason) = payload["promptFeedback"]["blockReason"].as_str() {
        return Err(AdvisorError::MalformedResponse(format!("prompt blocked: {}", reason)));
    }

    let parts = payload["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or(AdvisorError::EmptyResponse)?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    if text.trim().is_empty() {
        return Err(AdvisorError::EmptyResponse);
    }

    let recommendations: Vec<StyleRecommendation> = serde_json::from_str(&text)
        .map_err(|e| AdvisorError::MalformedResponse(e.to_string()))?;
    if recommendations.is_empty() {
        return Err(AdvisorError::EmptyResponse);
    }
    Ok(recommendations)
}
