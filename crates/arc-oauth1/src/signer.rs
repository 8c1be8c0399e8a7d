//! Request signing: parameters, signature and transmission in one step.

use crate::error::OAuthError;
use crate::params::{OAuthParameters, generate_nonce, generate_timestamp};
use crate::request::{AuthParamsLocation, RequestDescriptor, apply_parameters};
use crate::signature::{SignatureMethod, compute_signature, parse_url};

/// OAuth 1.0a client credentials.
///
/// With `RSA-SHA1`, `consumer_secret` is the consumer's PEM private key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: Option<String>,
    pub token_secret: Option<String>,
}

impl Credentials {
    /// Consumer-only credentials (no token yet).
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: None,
            token_secret: None,
        }
    }

    /// Attach a token and its secret.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, token_secret: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self.token_secret = Some(token_secret.into());
        self
    }
}

/// Options for [`sign_request`].
#[derive(Debug, Clone, Default)]
pub struct SignOptions {
    pub signature_method: SignatureMethod,
    pub location: AuthParamsLocation,
    /// Sent in the `Authorization` header only; never signed.
    pub realm: Option<String>,
    pub callback: Option<String>,
    pub verifier: Option<String>,
    /// Fixed `oauth_timestamp` instead of the current time.
    pub timestamp: Option<String>,
    /// Fixed `oauth_nonce` instead of a random one.
    pub nonce: Option<String>,
}

impl SignOptions {
    /// Options for a signature method, other fields default.
    pub fn new(signature_method: SignatureMethod) -> Self {
        Self {
            signature_method,
            ..Self::default()
        }
    }

    /// Set where the parameters are transmitted.
    #[must_use]
    pub fn with_location(mut self, location: AuthParamsLocation) -> Self {
        self.location = location;
        self
    }

    /// Set the realm.
    #[must_use]
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }
}

/// Sign a request and return the signed copy.
///
/// The signature covers the OAuth parameters, the URL query and, for
/// `application/x-www-form-urlencoded` requests, the body. All checks run
/// before anything is written, so an error never leaves a half-signed
/// request behind. The input is not modified.
pub fn sign_request(
    request: &RequestDescriptor,
    credentials: &Credentials,
    options: &SignOptions,
) -> Result<RequestDescriptor, OAuthError> {
    if credentials.consumer_key.is_empty() {
        return Err(OAuthError::MissingCredentials);
    }
    if options.location == AuthParamsLocation::Body && !request.is_form_urlencoded() {
        return Err(OAuthError::InvalidContentTypeForBody {
            content_type: request.content_type().map(ToOwned::to_owned),
        });
    }

    let uri = parse_url(&request.url)?;
    if options.signature_method == SignatureMethod::Plaintext
        && !uri
            .scheme_str()
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https"))
    {
        tracing::warn!(url = %request.url, "PLAINTEXT signature sent over a non-HTTPS channel");
    }

    let nonce = match &options.nonce {
        Some(nonce) => nonce.clone(),
        None => generate_nonce(),
    };
    let timestamp = match &options.timestamp {
        Some(timestamp) => timestamp.clone(),
        None => generate_timestamp()?,
    };

    let mut params = OAuthParameters::new(
        &credentials.consumer_key,
        options.signature_method,
        &nonce,
        &timestamp,
    )
    .with_token(credentials.token.as_deref().unwrap_or(""));
    if let Some(callback) = &options.callback {
        params = params.with_callback(callback);
    }
    if let Some(verifier) = &options.verifier {
        params = params.with_verifier(verifier);
    }

    let signature = compute_signature(
        options.signature_method,
        &request.method,
        &request.url,
        params.as_pairs(),
        &credentials.consumer_secret,
        credentials.token_secret.as_deref(),
        request.form_body(),
    )?;
    params.push_signature(signature);

    tracing::debug!(
        method = %request.method,
        url = %request.url,
        signature_method = %options.signature_method,
        location = %options.location,
        "Signed OAuth request"
    );

    apply_parameters(request, &params, options.location, options.realm.as_deref())
}
