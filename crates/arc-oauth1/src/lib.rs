//! OAuth 1.0a (RFC 5849) for Arc.
//!
//! This crate provides:
//! - [`sign_request`]: sign a [`RequestDescriptor`] with `PLAINTEXT`,
//!   `HMAC-SHA1` or `RSA-SHA1` and place the parameters in the
//!   `Authorization` header, the form body or the query string
//! - [`TokenExchange`]: the three-legged flow for obtaining token credentials
//!   through an injected [`HttpTransport`]
//!
//! The building blocks ([`signature_base_string`], [`normalize_parameters`],
//! [`percent_encode`] and friends) are exposed for callers that need to
//! check signatures or build them by hand.
//!
//! # Signing
//!
//! ```
//! use arc_oauth1::{Credentials, RequestDescriptor, SignOptions, SignatureMethod, sign_request};
//!
//! let request = RequestDescriptor::new("GET", "https://api.example.com/photos?size=original");
//! let credentials = Credentials::new("consumer_key", "consumer_secret")
//!     .with_token("access_token", "token_secret");
//!
//! let options = SignOptions::new(SignatureMethod::HmacSha1);
//! let signed = sign_request(&request, &credentials, &options)?;
//! assert!(signed.header("Authorization").unwrap().starts_with("OAuth "));
//! # Ok::<(), arc_oauth1::OAuthError>(())
//! ```
//!
//! # Token exchange
//!
//! ```ignore
//! use arc_oauth1::{TokenEndpoints, TokenExchange, UreqTransport};
//!
//! let exchange = TokenExchange::new(
//!     UreqTransport::default(),
//!     TokenEndpoints::new(
//!         "https://provider.example.com/oauth/request_token",
//!         "https://provider.example.com/oauth/authorize",
//!         "https://provider.example.com/oauth/access_token",
//!     ),
//!     "consumer_key",
//!     "consumer_secret",
//! );
//!
//! let request_token = exchange.get_request_token(&[]).await?;
//! println!("Visit {}", exchange.authorization_url(&request_token));
//! let access = exchange
//!     .get_access_token(&request_token.token, &request_token.token_secret, "verifier")
//!     .await?;
//! ```

// Encoding primitives
mod encode;
pub use encode::{decode_form_component, parse_form_pairs, percent_encode};

// Errors
pub mod error;
pub use error::{OAuthError, RsaKeyError, TokenError, TokenPhase, TransportError};

// RSA keys
mod key;
pub use key::{load_private_key, read_private_key};

// Protocol parameters
pub mod params;
pub use params::OAuthParameters;

// Request model and parameter transmission
mod request;
pub use request::{
    AuthParamsLocation, FORM_URLENCODED, RequestDescriptor, apply_parameters,
    authorization_header,
};

// Signature computation
mod signature;
pub use signature::{
    SignatureMethod, base_string_uri, compute_signature, normalize_parameters, sign_base_string,
    signature_base_string, signing_key,
};

// One-step signing
mod signer;
pub use signer::{Credentials, SignOptions, sign_request};

// Token exchange
mod token;
#[cfg(any(test, feature = "mock"))]
pub use token::MockTransport;
pub use token::{
    AccessToken, HttpResponse, HttpTransport, OUT_OF_BAND, RequestToken, TokenEndpoints,
    TokenExchange, TokenFlow, TokenMethod, UreqTransport,
};
