/// Insight Requester: forwards a prompt to the external text-generation
/// endpoint and normalizes the reply into text.
///
/// A request has exactly two outcomes:
///
/// 1. **Success**: the first text block of the response.
/// 2. **Failure**: an [`InsightError`] whose `Display` is the message to
///    show. A missing credential fails immediately, before any network
///    activity. Every HTTP, transport or parse failure is folded into
///    [`InsightError::Request`].
///
/// Use [`into_text`] when the caller wants the "always a string" form.
pub mod client;
pub mod credential;
pub mod prompts;

use std::time::Instant;

use crate::config::schema::InsightConfig;
use crate::error::{InsightError, InsightResult};
use client::MessagesClient;
use credential::{API_KEY_VAR, ApiKey};

/// Send one prompt and return the model's text.
///
/// `prompt` must already be validated as non-empty (see
/// [`prompts::validate_prompt`]). With `api_key` absent this returns
/// [`InsightError::Configuration`] without touching the network.
pub fn request_insight(
    config: &InsightConfig,
    prompt: &str,
    model_id: &str,
    api_key: Option<&ApiKey>,
) -> InsightResult<String> {
    let Some(api_key) = api_key else {
        return Err(InsightError::Configuration { var: API_KEY_VAR });
    };

    let client = MessagesClient::from_config(config);
    log::info!("requesting insight from {} (model {model_id})", client.url());

    let start = Instant::now();
    let result = client.send(api_key, model_id, prompt);
    let latency_ms = start.elapsed().as_millis();

    match &result {
        Ok(text) => log::info!("insight received in {latency_ms} ms ({} chars)", text.len()),
        Err(e) => log::warn!("insight request failed after {latency_ms} ms: {e}"),
    }

    result
}

/// Collapse a request outcome into display text.
pub fn into_text(result: InsightResult<String>) -> String {
    result.unwrap_or_else(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_a_configuration_error() {
        // Unroutable endpoint: reaching the network would fail differently.
        let config = InsightConfig {
            api_url: "http://192.0.2.1:9/v1/messages".to_string(),
            ..InsightConfig::default()
        };
        let err = request_insight(&config, "hello", "model", None).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn into_text_passes_success_through() {
        assert_eq!(into_text(Ok("analysis".to_string())), "analysis");
    }

    #[test]
    fn into_text_renders_errors() {
        let text = into_text(Err(InsightError::status(500, "boom")));
        assert_eq!(text, "API Error: 500 - boom");
    }
}
