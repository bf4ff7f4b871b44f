//! HTTP clients for the summarization backends.
//!
//! Two wire formats cover all three providers:
//! - [`ChatClient`]: OpenAI-compatible chat-completions endpoints. OpenAI
//!   uses it directly; DeepSeek exposes the same protocol at its own base
//!   URL.
//! - [`DashScopeClient`]: Alibaba's DashScope text-generation endpoint for
//!   Qwen, which wraps the prompt in an `input` object and returns the text
//!   under `output.text`.
//!
//! Both clients make a single blocking-style request per call. There is no
//! retry: a failed backend call degrades to the deterministic fallback
//! formatter upstream, so retrying here would only delay the batch job.

use crate::utils::truncate_for_log;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::Instant;
use tracing::{info, instrument, warn};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEEPSEEK_URL: &str = "https://api.deepseek.com/chat/completions";
const DASHSCOPE_URL: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/aigc/text-generation/generation";

/// Client for OpenAI-compatible chat-completions APIs.
#[derive(Debug)]
pub struct ChatClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl ChatClient {
    /// OpenAI with the `gpt-3.5-turbo` model.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::new(OPENAI_URL, api_key, "gpt-3.5-turbo")
    }

    /// DeepSeek's OpenAI-compatible API with the `deepseek-chat` model.
    pub fn deepseek(api_key: impl Into<String>) -> Self {
        Self::new(DEEPSEEK_URL, api_key, "deepseek-chat")
    }

    fn new(base_url: &str, api_key: impl Into<String>, model: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.into(),
            model: model.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Send a single user prompt and return the assistant's reply text.
    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    pub async fn ask(&self, prompt: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, elapsed_ms = t0.elapsed().as_millis() as u64, "Chat API returned error status");
            return Err(format!("chat API error {}: {}", status, truncate_for_log(&detail, 300)).into());
        }

        let parsed: ChatResponse = response.json().await?;
        let reply = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or("chat API response has no choices")?;

        info!(elapsed_ms = t0.elapsed().as_millis() as u64, "Chat API call succeeded");
        Ok(reply)
    }
}

/// Client for the DashScope (Qwen) text-generation API.
#[derive(Debug)]
pub struct DashScopeClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl DashScopeClient {
    /// Qwen with the `qwen-turbo` model.
    pub fn qwen(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "qwen-turbo".to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Send a prompt to the generation endpoint and return `output.text`.
    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    pub async fn ask(&self, prompt: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let body = GenerationRequest {
            model: self.model.clone(),
            input: GenerationInput {
                prompt: prompt.to_string(),
            },
        };

        let response = self
            .client
            .post(DASHSCOPE_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, elapsed_ms = t0.elapsed().as_millis() as u64, "DashScope API returned error status");
            return Err(
                format!("DashScope API error {}: {}", status, truncate_for_log(&detail, 300)).into(),
            );
        }

        let parsed: GenerationResponse = response.json().await?;
        let text = parsed
            .output
            .and_then(|o| o.text)
            .ok_or("DashScope response has no output text")?;

        info!(elapsed_ms = t0.elapsed().as_millis() as u64, "DashScope API call succeeded");
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
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

#[derive(Debug, Serialize)]
struct GenerationRequest {
    model: String,
    input: GenerationInput,
}

#[derive(Debug, Serialize)]
struct GenerationInput {
    prompt: String,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    output: Option<GenerationOutput>,
}

#[derive(Debug, Deserialize)]
struct GenerationOutput {
    text: Option<String>,
}
