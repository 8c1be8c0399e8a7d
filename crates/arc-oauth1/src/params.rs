//! OAuth protocol parameters (`oauth_*`).

use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngExt;

use crate::error::OAuthError;
use crate::signature::SignatureMethod;

/// Protocol version sent in `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_NONCE: &str = "oauth_nonce";
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_VERSION_PARAM: &str = "oauth_version";
pub const OAUTH_TOKEN: &str = "oauth_token";
pub const OAUTH_CALLBACK: &str = "oauth_callback";
pub const OAUTH_VERIFIER: &str = "oauth_verifier";
pub const OAUTH_SIGNATURE: &str = "oauth_signature";

/// Generate cryptographically random nonce (32 hex characters).
pub fn generate_nonce() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}

/// Generate Unix timestamp in seconds.
pub fn generate_timestamp() -> Result<String, OAuthError> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)?
        .as_secs()
        .to_string())
}

/// Ordered set of OAuth protocol parameters.
///
/// Order is generation order and is kept when the parameters are written to
/// the `Authorization` header; sorting only happens inside the signature
/// base string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthParameters {
    pairs: Vec<(String, String)>,
}

impl OAuthParameters {
    /// Required parameters with an explicit nonce and timestamp.
    pub fn new(
        consumer_key: &str,
        signature_method: SignatureMethod,
        nonce: &str,
        timestamp: &str,
    ) -> Self {
        let pairs = [
            (OAUTH_CONSUMER_KEY, consumer_key),
            (OAUTH_NONCE, nonce),
            (OAUTH_SIGNATURE_METHOD, signature_method.as_str()),
            (OAUTH_TIMESTAMP, timestamp),
            (OAUTH_VERSION_PARAM, OAUTH_VERSION),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect();
        Self { pairs }
    }

    /// Required parameters with a fresh nonce and the current time.
    pub fn generate(
        consumer_key: &str,
        signature_method: SignatureMethod,
    ) -> Result<Self, OAuthError> {
        Ok(Self::new(
            consumer_key,
            signature_method,
            &generate_nonce(),
            &generate_timestamp()?,
        ))
    }

    /// Add `oauth_token`. Empty tokens are skipped (request token phase).
    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        if !token.is_empty() {
            self.push(OAUTH_TOKEN, token);
        }
        self
    }

    /// Add `oauth_callback`.
    #[must_use]
    pub fn with_callback(mut self, callback: &str) -> Self {
        self.push(OAUTH_CALLBACK, callback);
        self
    }

    /// Add `oauth_verifier`.
    #[must_use]
    pub fn with_verifier(mut self, verifier: &str) -> Self {
        self.push(OAUTH_VERIFIER, verifier);
        self
    }

    /// Append the computed signature as the last parameter.
    pub fn push_signature(&mut self, signature: String) {
        self.pairs.retain(|(name, _)| name != OAUTH_SIGNATURE);
        self.pairs.push((OAUTH_SIGNATURE.to_owned(), signature));
    }

    /// Value of a parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Parameters in generation order.
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Iterate `(name, value)` in generation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn push(&mut self, name: &str, value: &str) {
        self.pairs.push((name.to_owned(), value.to_owned()));
    }
}
