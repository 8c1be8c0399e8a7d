//! Error types for OAuth 1.0a signing and token exchange.

use std::fmt;
use std::str::Utf8Error;
use std::time::Duration;

/// Error from building or applying an OAuth signature.
///
/// Signing never returns a partially signed request: when one of these is
/// raised the caller's request is left as it was.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OAuthError {
    /// Signature method name is not one of `PLAINTEXT`, `HMAC-SHA1`, `RSA-SHA1`.
    #[error("unsupported signature method: {0}")]
    UnsupportedSignatureMethod(String),

    /// Parameters location name is not one of `header`, `body`, `querystring`.
    #[error("unsupported OAuth parameters location: {0}")]
    UnsupportedLocation(String),

    /// Token endpoint method is neither `GET` nor `POST`.
    #[error("unsupported token request method: {0}")]
    UnsupportedTokenMethod(String),

    /// Body parameters requested for a request that is not form-urlencoded.
    #[error(
        "OAuth parameters can only be sent in a form-urlencoded body (content type: {})",
        content_type.as_deref().unwrap_or("none")
    )]
    InvalidContentTypeForBody {
        /// Content type of the request, if any.
        content_type: Option<String>,
    },

    /// Consumer key is empty.
    #[error("OAuth consumer key is required")]
    MissingCredentials,

    /// Request URL cannot be used as a signature base string URI.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// RSA key loading/parsing error.
    #[error("RSA key error")]
    RsaKey(#[from] RsaKeyError),

    /// System clock is set before the Unix epoch.
    #[error("system clock error")]
    Clock(#[from] std::time::SystemTimeError),
}

/// RSA key loading/parsing error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RsaKeyError {
    /// Key file could not be read.
    #[error("failed to read key file")]
    Io(#[from] std::io::Error),

    /// Invalid UTF-8 in key file.
    #[error("invalid UTF-8 in key")]
    InvalidUtf8(#[from] Utf8Error),

    /// PKCS#1 key parsing error.
    #[error("PKCS#1 key error")]
    Pkcs1(#[from] rsa::pkcs1::Error),

    /// PKCS#8 key parsing error.
    #[error("PKCS#8 key error")]
    Pkcs8(#[from] rsa::pkcs8::Error),
}

/// Step of the token exchange an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPhase {
    /// Obtaining temporary credentials.
    RequestToken,
    /// Exchanging the verifier for token credentials.
    AccessToken,
}

impl TokenPhase {
    /// Build the HTTP-level error for this phase.
    pub(crate) fn http_error(self, status: u16, body: String) -> TokenError {
        match self {
            Self::RequestToken => TokenError::RequestToken { status, body },
            Self::AccessToken => TokenError::AccessToken { status, body },
        }
    }
}

impl fmt::Display for TokenPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestToken => f.write_str("request token"),
            Self::AccessToken => f.write_str("access token"),
        }
    }
}

/// Error from the token exchange flow.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TokenError {
    /// Request token endpoint answered with a non-2xx status, or without `oauth_token`.
    #[error("request token failed ({status}): {body}")]
    RequestToken {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Access token endpoint answered with a non-2xx status, or without `oauth_token`.
    #[error("access token exchange failed ({status}): {body}")]
    AccessToken {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Network failure before a response was received.
    #[error("{phase} request failed")]
    Transport {
        /// Phase that failed.
        phase: TokenPhase,
        /// Underlying transport error.
        #[source]
        source: TransportError,
    },

    /// No response within the configured timeout.
    #[error("{phase} request timed out after {}s", timeout.as_secs_f64())]
    Timeout {
        /// Phase that timed out.
        phase: TokenPhase,
        /// Configured timeout.
        timeout: Duration,
    },

    /// Token request could not be signed.
    #[error("failed to sign token request")]
    Signing(#[from] OAuthError),

    /// Flow transition called from the wrong state.
    #[error("token flow is {actual}, expected {expected}")]
    InvalidState {
        /// State the transition requires.
        expected: &'static str,
        /// State the flow was in.
        actual: &'static str,
    },
}

impl TokenError {
    /// HTTP status carried by the error, if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestToken { status, .. } | Self::AccessToken { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error from an [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    /// HTTP request failed (network error, TLS, etc).
    #[error("HTTP request failed")]
    Http(#[from] ureq::Error),

    /// Method has no mapping onto the HTTP client.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Blocking request task panicked or was cancelled.
    #[error("HTTP task failed")]
    Join(#[from] tokio::task::JoinError),

    /// Other transport failure.
    #[error("{0}")]
    Other(String),
}
