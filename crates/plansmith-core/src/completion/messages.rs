//! HTTP implementation of [`CompletionClient`] against an Anthropic-style
//! Messages API.
//!
//! One POST per completion, no retries: the core treats every failure as
//! fatal for the operation that issued it, and surfaces the endpoint's
//! error classes ([`CompletionError::Auth`], [`CompletionError::Quota`],
//! [`CompletionError::RateLimited`]) unchanged to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{CompletionClient, CompletionConfig, CompletionError, CompletionRequest};

/// Client for an Anthropic-style `/v1/messages` endpoint.
pub struct MessagesClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl MessagesClient {
    /// Create a client from configuration.
    ///
    /// Reads the API key from the environment variable named in the config.
    pub fn from_config(config: &CompletionConfig) -> Result<Self, CompletionError> {
        let api_key = config.api_key()?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(CompletionError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http,
            max_tokens: config.max_tokens,
        })
    }

    /// Build the JSON request body.
    ///
    /// Context strings become prior conversation turns, alternating
    /// user/assistant starting with user; the request prompt is the final
    /// user turn.
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut messages = Vec::with_capacity(request.context.len() + 1);
        for (i, turn) in request.context.iter().enumerate() {
            let role = if i % 2 == 0 { "user" } else { "assistant" };
            messages.push(serde_json::json!({ "role": role, "content": turn }));
        }
        messages.push(serde_json::json!({ "role": "user", "content": request.prompt }));

        serde_json::json!({
            "model": self.model,
            "max_tokens": request.max_tokens.min(self.max_tokens),
            "system": request.system_prompt,
            "messages": messages,
        })
    }
}

#[async_trait]
impl CompletionClient for MessagesClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = self.build_request_body(&request);
        debug!(model = %self.model, max_tokens = request.max_tokens, "sending completion request");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", self.api_key.as_str())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            let text = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, retry_after, &text));
        }

        let api_response: ApiResponse = response.json().await?;
        debug!("completion request succeeded");
        extract_text(api_response)
    }
}

/// Map a non-success HTTP response onto the error taxonomy.
fn classify_failure(status: u16, retry_after: Option<u64>, body: &str) -> CompletionError {
    let detail = error_detail(body);

    match status {
        401 | 403 => CompletionError::Auth(detail),
        429 => CompletionError::RateLimited {
            retry_after: Duration::from_secs(retry_after.unwrap_or(60)),
        },
        _ if detail.contains("credit") || detail.contains("quota") => {
            CompletionError::Quota(detail)
        }
        _ => CompletionError::Api {
            status,
            message: detail,
        },
    }
}

/// Pull the human-readable message out of an API error body, falling back
/// to the raw body when it is not the expected JSON shape.
fn error_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorInner,
    }
    #[derive(Deserialize)]
    struct ErrorInner {
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.to_string(),
    }
}

/// Concatenate the text blocks of a successful response.
fn extract_text(response: ApiResponse) -> Result<String, CompletionError> {
    let mut text = String::new();
    for block in response.content {
        if let ApiContentBlock::Text { text: t } = block {
            text.push_str(&t);
        }
    }

    if text.is_empty() {
        return Err(CompletionError::InvalidResponse(
            "response contained no text content".to_string(),
        ));
    }
    Ok(text)
}

// Messages API response types.

#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ApiContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ApiContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}
