//! Completion-service abstraction.
//!
//! The hosted LLM endpoint is an external collaborator: the core hands it a
//! prompt and receives a string, and treats any failure as fatal for that
//! one operation. The [`CompletionClient`] trait is the seam; the
//! [`MessagesClient`] is the HTTP implementation.

use serde::{Deserialize, Serialize};

mod client;
mod error;
mod messages;

pub use client::CompletionClient;
#[cfg(test)]
pub use client::scripted::ScriptedClient;
pub use error::CompletionError;
pub use messages::MessagesClient;

/// Completion endpoint configuration, stored in the `[completion]` section
/// of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Provider name (currently only "anthropic" supported).
    pub provider: String,
    /// Model identifier.
    pub model: String,
    /// Environment variable containing the API key.
    pub api_key_env: String,
    /// API base URL.
    pub base_url: String,
    /// Maximum tokens per response.
    pub max_tokens: u32,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 8192,
            timeout_ms: 120_000,
        }
    }
}

impl CompletionConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String, CompletionError> {
        std::env::var(&self.api_key_env).map_err(|_| {
            CompletionError::Auth(format!(
                "API key not found; set the {} environment variable",
                self.api_key_env
            ))
        })
    }
}

/// One completion request.
///
/// `context` carries prior conversation turns (alternating user/assistant,
/// oldest first); it is empty for the one-shot generation paths.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub prompt: String,
    pub context: Vec<String>,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// A request with no prior context.
    pub fn new(system_prompt: impl Into<String>, prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            prompt: prompt.into(),
            context: Vec::new(),
            max_tokens,
        }
    }
}
