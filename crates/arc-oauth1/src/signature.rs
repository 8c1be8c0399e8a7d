//! OAuth 1.0 signature generation (RFC 5849 Section 3.4).

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use hmac::{Hmac, Mac};
use rsa::RsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{SignatureEncoding, Signer};
use sha1::Sha1;
use ureq::http::Uri;

use crate::encode::{parse_form_pairs, percent_encode};
use crate::error::OAuthError;
use crate::key::load_private_key;

type HmacSha1 = Hmac<Sha1>;

/// Method used to compute `oauth_signature`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureMethod {
    /// Signing key sent as-is. Only meaningful over HTTPS.
    Plaintext,
    /// HMAC-SHA1 keyed with the signing key.
    #[default]
    HmacSha1,
    /// RSASSA-PKCS1-v1_5 with SHA-1; the consumer secret is a PEM private key.
    RsaSha1,
}

impl SignatureMethod {
    /// Wire name used in `oauth_signature_method`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plaintext => "PLAINTEXT",
            Self::HmacSha1 => "HMAC-SHA1",
            Self::RsaSha1 => "RSA-SHA1",
        }
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureMethod {
    type Err = OAuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLAINTEXT" => Ok(Self::Plaintext),
            "HMAC-SHA1" => Ok(Self::HmacSha1),
            "RSA-SHA1" => Ok(Self::RsaSha1),
            other => Err(OAuthError::UnsupportedSignatureMethod(other.to_owned())),
        }
    }
}

/// Normalize request parameters per RFC 5849 Section 3.4.1.3.2.
///
/// Names and values are encoded individually, sorted by encoded name and
/// then encoded value (byte order), and joined as `name=value&...`.
/// Duplicate names stay separate entries; empty values are kept.
pub fn normalize_parameters(params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(name, value)| (percent_encode(name), percent_encode(value)))
        .collect();
    encoded.sort_unstable();

    encoded
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse a request URL, ignoring any fragment.
pub(crate) fn parse_url(url: &str) -> Result<Uri, OAuthError> {
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
    // Characters outside RFC 3986 must already be percent-encoded
    if let Some(c) = without_fragment.chars().find(|c| !is_uri_char(*c)) {
        return Err(OAuthError::InvalidUrl {
            url: url.to_owned(),
            reason: format!("character {c:?} must be percent-encoded"),
        });
    }
    let uri: Uri = without_fragment.parse().map_err(|e| OAuthError::InvalidUrl {
        url: url.to_owned(),
        reason: format!("{e}"),
    })?;

    if uri.scheme_str().is_none() || uri.host().is_none() {
        return Err(OAuthError::InvalidUrl {
            url: url.to_owned(),
            reason: "absolute URL with scheme and host required".to_owned(),
        });
    }
    Ok(uri)
}

/// Unreserved, reserved or `%` (RFC 3986 Section 2).
fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._~:/?#[]@!$&'()*+,;=%".contains(c)
}

fn base_uri_of(uri: &Uri) -> String {
    let scheme = uri.scheme_str().unwrap_or("https").to_ascii_lowercase();
    let host = uri.host().unwrap_or("").to_ascii_lowercase();
    let port = match (scheme.as_str(), uri.port_u16()) {
        ("http", Some(80)) | ("https", Some(443)) | (_, None) => String::new(),
        (_, Some(port)) => format!(":{port}"),
    };
    let path = match uri.path() {
        "" => "/",
        path => path,
    };
    format!("{scheme}://{host}{port}{path}")
}

/// Base string URI per RFC 5849 Section 3.4.1.2.
///
/// Scheme and host are lower-cased, default ports dropped, query and
/// fragment removed. The path is kept byte-for-byte.
pub fn base_string_uri(url: &str) -> Result<String, OAuthError> {
    parse_url(url).map(|uri| base_uri_of(&uri))
}

/// Build the signature base string per RFC 5849 Section 3.4.1.
///
/// Format: `HTTP_METHOD&encoded_base_uri&encoded_parameters`
///
/// `oauth_params` are the protocol parameters to transmit; any
/// `oauth_signature` or `realm` entry among them is ignored. The URL query is
/// always included. `form_body` must only be passed when the request body is
/// `application/x-www-form-urlencoded`.
pub fn signature_base_string(
    http_method: &str,
    url: &str,
    oauth_params: &[(String, String)],
    form_body: Option<&str>,
) -> Result<String, OAuthError> {
    let uri = parse_url(url)?;

    let mut params: Vec<(String, String)> = oauth_params
        .iter()
        .filter(|(name, _)| name != "oauth_signature" && name != "realm")
        .cloned()
        .collect();
    if let Some(query) = uri.query() {
        params.extend(parse_form_pairs(query));
    }
    if let Some(body) = form_body {
        params.extend(parse_form_pairs(body));
    }

    Ok(format!(
        "{}&{}&{}",
        http_method.to_ascii_uppercase(),
        percent_encode(&base_uri_of(&uri)),
        percent_encode(&normalize_parameters(&params))
    ))
}

/// Signing key: `encode(consumer_secret)&encode(token_secret)`.
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret.unwrap_or(""))
    )
}

/// Sign data with HMAC-SHA1 and return base64-encoded signature.
fn sign_hmac_sha1(key: &str, data: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(data.as_bytes());
    BASE64_STANDARD.encode(mac.finalize().into_bytes())
}

/// Sign data with RSA-SHA1 and return base64-encoded signature.
fn sign_rsa_sha1(private_key: &RsaPrivateKey, data: &str) -> String {
    let signing_key = SigningKey::<Sha1>::new(private_key.clone());
    let signature = signing_key.sign(data.as_bytes());
    BASE64_STANDARD.encode(signature.to_bytes())
}

/// Sign a prepared base string.
///
/// The result is the raw signature; it is percent-encoded only when the
/// parameters are written to the request.
pub fn sign_base_string(
    method: SignatureMethod,
    base_string: &str,
    consumer_secret: &str,
    token_secret: Option<&str>,
) -> Result<String, OAuthError> {
    match method {
        SignatureMethod::Plaintext => Ok(signing_key(consumer_secret, token_secret)),
        SignatureMethod::HmacSha1 => Ok(sign_hmac_sha1(
            &signing_key(consumer_secret, token_secret),
            base_string,
        )),
        SignatureMethod::RsaSha1 => {
            let private_key = load_private_key(consumer_secret.as_bytes())?;
            Ok(sign_rsa_sha1(&private_key, base_string))
        }
    }
}

/// Compute `oauth_signature` for a request.
///
/// For `RSA-SHA1`, `consumer_secret` holds the PEM private key and
/// `token_secret` is unused.
pub fn compute_signature(
    method: SignatureMethod,
    http_method: &str,
    url: &str,
    oauth_params: &[(String, String)],
    consumer_secret: &str,
    token_secret: Option<&str>,
    form_body: Option<&str>,
) -> Result<String, OAuthError> {
    let base_string = signature_base_string(http_method, url, oauth_params, form_body)?;
    sign_base_string(method, &base_string, consumer_secret, token_secret)
}
