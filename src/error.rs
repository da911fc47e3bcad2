//! Typed failures for the insight requester.

use thiserror::Error;

/// Where to obtain an API key, shown alongside configuration errors.
pub const API_KEY_URL: &str = "https://console.anthropic.com/";

/// The two ways an insight request can fail.
///
/// `Display` produces the user-facing text, so a renderer can show any
/// failure verbatim without matching on the variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsightError {
    /// The credential is missing. Detected before any network activity.
    #[error(
        "API key not found. Set the {var} environment variable ({var}=your_api_key_here). Get your API key from: {}",
        API_KEY_URL
    )]
    Configuration { var: &'static str },

    /// Non-200 status, transport failure, or an unreadable response body.
    #[error("{0}")]
    Request(String),
}

impl InsightError {
    pub fn status(code: u16, body: &str) -> Self {
        Self::Request(format!("API Error: {code} - {body}"))
    }

    pub fn transport(detail: impl std::fmt::Display) -> Self {
        Self::Request(format!("Error calling API: {detail}"))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

pub type InsightResult<T> = Result<T, InsightError>;
