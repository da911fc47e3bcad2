/// API credential for the text-generation endpoint.
///
/// Read once from `ANTHROPIC_API_KEY` at process start and handed to the
/// requester explicitly. An empty or whitespace-only value counts as
/// absent, so a missing key is always detectable without a network call.
use std::fmt;

/// Environment variable holding the credential.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// A non-empty API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting blank input.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into().trim().to_string();
        (!key.is_empty()).then_some(Self(key))
    }

    /// Read the key from [`API_KEY_VAR`].
    pub fn from_env() -> Option<Self> {
        std::env::var(API_KEY_VAR).ok().and_then(Self::new)
    }

    /// The raw secret, for the request header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}
