//! State of one three-legged authorization.

use crate::error::TokenError;
use crate::signer::Credentials;
use crate::token::{AccessToken, HttpTransport, RequestToken, TokenExchange};

/// Tracks where a single authorization stands.
///
/// Each transition checks the current state first and only advances once
/// the exchange succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TokenFlow {
    #[default]
    Unauthorized,
    RequestTokenObtained(RequestToken),
    AccessTokenObtained(AccessToken),
}

impl TokenFlow {
    /// Start a new flow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the current state, for errors and logs.
    pub const fn state_name(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::RequestTokenObtained(_) => "request token obtained",
            Self::AccessTokenObtained(_) => "access token obtained",
        }
    }

    /// Obtain a request token and return the authorization URL.
    pub async fn request_token<T: HttpTransport>(
        &mut self,
        exchange: &TokenExchange<T>,
        extra_params: &[(String, String)],
    ) -> Result<String, TokenError> {
        self.require(&Self::Unauthorized)?;
        let request_token = exchange.get_request_token(extra_params).await?;
        let url = exchange.authorization_url(&request_token);
        *self = Self::RequestTokenObtained(request_token);
        Ok(url)
    }

    /// Exchange the verifier for an access token.
    pub async fn access_token<T: HttpTransport>(
        &mut self,
        exchange: &TokenExchange<T>,
        verifier: &str,
    ) -> Result<Credentials, TokenError> {
        let Self::RequestTokenObtained(request_token) = &*self else {
            return Err(self.invalid_state("request token obtained"));
        };
        let access_token = exchange
            .get_access_token(&request_token.token, &request_token.token_secret, verifier)
            .await?;
        let credentials = exchange.credentials_for(&access_token);
        *self = Self::AccessTokenObtained(access_token);
        Ok(credentials)
    }

    /// Pending request token, if any.
    pub fn pending(&self) -> Option<&RequestToken> {
        match self {
            Self::RequestTokenObtained(token) => Some(token),
            _ => None,
        }
    }

    /// Access token, once obtained.
    pub fn access(&self) -> Option<&AccessToken> {
        match self {
            Self::AccessTokenObtained(token) => Some(token),
            _ => None,
        }
    }

    /// Go back to `Unauthorized`.
    pub fn reset(&mut self) {
        *self = Self::Unauthorized;
    }

    fn require(&self, expected: &Self) -> Result<(), TokenError> {
        if std::mem::discriminant(self) == std::mem::discriminant(expected) {
            Ok(())
        } else {
            Err(self.invalid_state(expected.state_name()))
        }
    }

    fn invalid_state(&self, expected: &'static str) -> TokenError {
        TokenError::InvalidState {
            expected,
            actual: self.state_name(),
        }
    }
}
