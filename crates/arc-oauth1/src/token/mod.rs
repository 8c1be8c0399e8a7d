//! OAuth 1.0a token exchange.
//!
//! Handles the three-legged flow for obtaining token credentials:
//! 1. Request temporary credentials (request token)
//! 2. Send the user to the authorization URL
//! 3. Exchange the verifier for token credentials (access token)
//!
//! Step 2 happens outside this crate. Requests go through an injected
//! [`HttpTransport`]; nothing is retried.

mod flow;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod transport;

pub use flow::TokenFlow;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
pub use transport::{HttpResponse, HttpTransport, UreqTransport};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::encode::parse_form_pairs;
use crate::error::{OAuthError, TokenError, TokenPhase};
use crate::request::{AuthParamsLocation, FORM_URLENCODED, RequestDescriptor, append_query};
use crate::signature::SignatureMethod;
use crate::signer::{Credentials, SignOptions, sign_request};

/// Default timeout for one token request in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Callback value for out-of-band verifiers.
pub const OUT_OF_BAND: &str = "oob";

/// Temporary credentials from request token phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    pub token: String,
    pub token_secret: String,
    /// Provider echoed `oauth_callback_confirmed=true`.
    pub callback_confirmed: bool,
}

/// Final access credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub token_secret: String,
}

/// HTTP method used against the token endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenMethod {
    Get,
    #[default]
    Post,
}

impl TokenMethod {
    /// HTTP method name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for TokenMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenMethod {
    type Err = OAuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("GET") {
            Ok(Self::Get)
        } else if s.eq_ignore_ascii_case("POST") {
            Ok(Self::Post)
        } else {
            Err(OAuthError::UnsupportedTokenMethod(s.to_owned()))
        }
    }
}

/// Provider endpoints for the three-legged flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEndpoints {
    pub request_token_url: String,
    pub authorization_url: String,
    pub access_token_url: String,
}

impl TokenEndpoints {
    /// Create endpoints from their URLs.
    pub fn new(
        request_token_url: impl Into<String>,
        authorization_url: impl Into<String>,
        access_token_url: impl Into<String>,
    ) -> Self {
        Self {
            request_token_url: request_token_url.into(),
            authorization_url: authorization_url.into(),
            access_token_url: access_token_url.into(),
        }
    }
}

/// OAuth 1.0a token exchange against one provider.
pub struct TokenExchange<T> {
    transport: T,
    endpoints: TokenEndpoints,
    consumer_key: String,
    consumer_secret: String,
    signature_method: SignatureMethod,
    token_method: TokenMethod,
    location: AuthParamsLocation,
    callback: String,
    timeout: Duration,
}

impl<T: HttpTransport> TokenExchange<T> {
    /// Create an exchange with default settings: `HMAC-SHA1`, `POST`,
    /// header parameters, `oob` callback, 30 second timeout.
    ///
    /// With `RSA-SHA1`, `consumer_secret` is the PEM private key.
    pub fn new(
        transport: T,
        endpoints: TokenEndpoints,
        consumer_key: &str,
        consumer_secret: &str,
    ) -> Self {
        Self {
            transport,
            endpoints,
            consumer_key: consumer_key.to_owned(),
            consumer_secret: consumer_secret.to_owned(),
            signature_method: SignatureMethod::default(),
            token_method: TokenMethod::default(),
            location: AuthParamsLocation::default(),
            callback: OUT_OF_BAND.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
        }
    }

    /// Set the signature method.
    #[must_use]
    pub fn with_signature_method(mut self, method: SignatureMethod) -> Self {
        self.signature_method = method;
        self
    }

    /// Set the HTTP method for token requests.
    #[must_use]
    pub fn with_token_method(mut self, method: TokenMethod) -> Self {
        self.token_method = method;
        self
    }

    /// Set where OAuth parameters are sent on token requests.
    #[must_use]
    pub fn with_location(mut self, location: AuthParamsLocation) -> Self {
        self.location = location;
        self
    }

    /// Set `oauth_callback` for the request token phase.
    #[must_use]
    pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = callback.into();
        self
    }

    /// Set the timeout for each token request.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Transport used for requests.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Step 1: Request temporary credentials.
    ///
    /// Only the consumer credentials sign this request. `extra_params` are
    /// added to the endpoint query and covered by the signature.
    pub async fn get_request_token(
        &self,
        extra_params: &[(String, String)],
    ) -> Result<RequestToken, TokenError> {
        let url = append_query(
            &self.endpoints.request_token_url,
            extra_params
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );
        let credentials = Credentials::new(&self.consumer_key, &self.consumer_secret);
        let options = SignOptions {
            callback: Some(self.callback.clone()),
            ..self.sign_options()
        };

        let response = self
            .exchange(TokenPhase::RequestToken, &url, &credentials, &options)
            .await?;
        tracing::info!("Request token received");

        Ok(RequestToken {
            token: response.token,
            token_secret: response.token_secret,
            callback_confirmed: response
                .params
                .get("oauth_callback_confirmed")
                .is_some_and(|value| value == "true"),
        })
    }

    /// Step 2: Authorization URL the user must visit.
    pub fn authorization_url(&self, request_token: &RequestToken) -> String {
        append_query(
            &self.endpoints.authorization_url,
            [("oauth_token", request_token.token.as_str())],
        )
    }

    /// Step 3: Exchange verifier for token credentials.
    ///
    /// Signed with the request token and its secret.
    pub async fn get_access_token(
        &self,
        token: &str,
        token_secret: &str,
        verifier: &str,
    ) -> Result<AccessToken, TokenError> {
        let credentials = Credentials::new(&self.consumer_key, &self.consumer_secret)
            .with_token(token, token_secret);
        let options = SignOptions {
            verifier: Some(verifier.to_owned()),
            ..self.sign_options()
        };

        let response = self
            .exchange(
                TokenPhase::AccessToken,
                &self.endpoints.access_token_url,
                &credentials,
                &options,
            )
            .await?;
        tracing::info!("Access token received");

        Ok(AccessToken {
            token: response.token,
            token_secret: response.token_secret,
        })
    }

    /// Credentials for signing API requests with an access token.
    pub fn credentials_for(&self, access_token: &AccessToken) -> Credentials {
        Credentials::new(&self.consumer_key, &self.consumer_secret)
            .with_token(&access_token.token, &access_token.token_secret)
    }

    fn sign_options(&self) -> SignOptions {
        SignOptions::new(self.signature_method).with_location(self.location)
    }

    /// Sign, send and check one token request.
    async fn exchange(
        &self,
        phase: TokenPhase,
        url: &str,
        credentials: &Credentials,
        options: &SignOptions,
    ) -> Result<TokenResponse, TokenError> {
        let mut request = RequestDescriptor::new(self.token_method.as_str(), url);
        if self.token_method == TokenMethod::Post {
            request = request
                .with_header("Content-Type", FORM_URLENCODED)
                .with_body("");
        }
        let signed = sign_request(&request, credentials, options)?;

        tracing::debug!(%phase, url, "Requesting token");
        let response = match tokio::time::timeout(self.timeout, self.transport.send(signed)).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(source)) => return Err(TokenError::Transport { phase, source }),
            Err(_) => {
                return Err(TokenError::Timeout {
                    phase,
                    timeout: self.timeout,
                });
            }
        };

        if !response.is_success() {
            return Err(phase.http_error(response.status, response.body));
        }
        TokenResponse::parse(phase, response)
    }
}

/// Token endpoint response body.
struct TokenResponse {
    token: String,
    token_secret: String,
    params: HashMap<String, String>,
}

impl TokenResponse {
    /// Parse a 2xx response; a body without `oauth_token` is a failure.
    fn parse(phase: TokenPhase, response: HttpResponse) -> Result<Self, TokenError> {
        let mut params: HashMap<String, String> =
            parse_form_pairs(&response.body).into_iter().collect();
        let token = match params.remove("oauth_token") {
            Some(token) if !token.is_empty() => token,
            _ => return Err(phase.http_error(response.status, response.body)),
        };
        let token_secret = params.remove("oauth_token_secret").unwrap_or_default();
        Ok(Self {
            token,
            token_secret,
            params,
        })
    }
}
