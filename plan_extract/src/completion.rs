// Access to the text-completion service.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use snafu::{prelude::*, Snafu};

use crate::config::CompletionSettings;

/// One request to the completion service.
#[derive(PartialEq, Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub model: String,
    pub temperature: f32,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CompletionError {
    #[snafu(display("Could not reach the completion service: {source}"))]
    Transport { source: reqwest::Error },
    #[snafu(display("Completion service answered with status {status}: {message}"))]
    Status { status: u16, message: String },
    #[snafu(display("Malformed completion response: {source}"))]
    MalformedResponse { source: serde_json::Error },
    #[snafu(display("Completion response has no content"))]
    MissingContent {},
    #[snafu(display("No completion after {secs} seconds"))]
    Timeout { secs: u64 },
    #[snafu(display("Invalid completion settings: {message}"))]
    Settings { message: String },
}

pub type CompletionResult<T> = Result<T, CompletionError>;

/// The capability needed from a completion service.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Returns the text of the completion.
    async fn complete(&self, request: &CompletionRequest) -> CompletionResult<String>;
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatErrorBody {
    error: ChatErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ChatErrorDetail {
    message: String,
}

/// Client for services that implement the OpenAI chat completions API.
pub struct ChatCompletionClient {
    client: Client,
    url: String,
    api_key: String,
}

impl ChatCompletionClient {
    /// The key is passed by the caller, it is not read from the environment here.
    pub fn new(settings: &CompletionSettings, api_key: String) -> CompletionResult<Self> {
        ensure!(
            !api_key.trim().is_empty(),
            SettingsSnafu {
                message: "empty API key".to_string()
            }
        );
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .context(TransportSnafu {})?;
        Ok(ChatCompletionClient {
            client,
            url: format!(
                "{}/v1/chat/completions",
                settings.endpoint.trim_end_matches('/')
            ),
            api_key,
        })
    }
}

#[async_trait]
impl Completion for ChatCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> CompletionResult<String> {
        let body = json!({
            "model": request.model,
            "temperature": request.temperature,
            "messages": [
                {"role": "system", "content": request.system_prompt},
                {"role": "user", "content": request.user_prompt},
            ],
        });
        debug!(
            "ChatCompletionClient: POST {} ({} prompt chars)",
            self.url,
            request.user_prompt.len()
        );
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context(TransportSnafu {})?;
        let status = response.status().as_u16();
        let text = response.text().await.context(TransportSnafu {})?;
        parse_chat_response(status, &text)
    }
}

/// Reads the body returned by the chat completions endpoint.
pub fn parse_chat_response(status: u16, body: &str) -> CompletionResult<String> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ChatErrorBody>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| format!("HTTP {}", status));
        return StatusSnafu { status, message }.fail();
    }
    let parsed: ChatResponse = serde_json::from_str(body).context(MalformedResponseSnafu {})?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|s| !s.trim().is_empty())
        .context(MissingContentSnafu {})
}
