/// Messages API client for the Insight Requester.
///
/// Sends one synchronous `POST` with the `ureq` HTTP client and reduces
/// the reply to its first text block. There are no retries: a failure is
/// converted into an [`InsightError::Request`] and returned as-is.
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::credential::ApiKey;
use crate::config::schema::InsightConfig;
use crate::error::{InsightError, InsightResult};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A single message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `POST /v1/messages`.
#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

/// Response body from `POST /v1/messages`. Only the content list matters.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

/// One block of response content. Non-text blocks have no `text` field.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Synchronous client for the configured messages endpoint.
///
/// Stateless between calls: each [`send`](Self::send) is independent and
/// never observes another request.
#[derive(Debug, Clone)]
pub struct MessagesClient {
    url: String,
    api_version: String,
    max_tokens: u32,
    timeout: Option<Duration>,
}

impl MessagesClient {
    /// Build a client from the resolved config.
    pub fn from_config(config: &InsightConfig) -> Self {
        Self {
            url: config.api_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            max_tokens: config.max_tokens,
            timeout: config.timeout_ms.map(Duration::from_millis),
        }
    }

    /// Send `prompt` as a single user message and return the first text
    /// block of the reply.
    pub fn send(&self, api_key: &ApiKey, model: &str, prompt: &str) -> InsightResult<String> {
        let body = MessagesRequest {
            model,
            max_tokens: self.max_tokens,
            messages: vec![Message::user(prompt)],
        };

        let mut request = ureq::post(&self.url)
            .set("x-api-key", api_key.expose())
            .set("anthropic-version", &self.api_version)
            .set("content-type", "application/json");
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let resp = match request.send_json(&body) {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, resp)) => {
                let text = resp.into_string().unwrap_or_default();
                return Err(InsightError::status(code, &text));
            }
            Err(ureq::Error::Transport(t)) => return Err(InsightError::transport(t)),
        };

        let status = resp.status();
        if status != 200 {
            let text = resp.into_string().unwrap_or_default();
            return Err(InsightError::status(status, &text));
        }

        let parsed: MessagesResponse = resp.into_json().map_err(InsightError::transport)?;
        first_text(parsed)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn first_text(response: MessagesResponse) -> InsightResult<String> {
    response
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .ok_or_else(|| InsightError::transport("response contained no text content"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
