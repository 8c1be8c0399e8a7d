//! Request descriptor and OAuth parameter transmission (RFC 5849 Section 3.5).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::encode::{encode_pairs, percent_encode};
use crate::error::OAuthError;
use crate::params::OAuthParameters;

/// Media type whose body takes part in the signature.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// HTTP request to be signed.
///
/// Header names are matched case-insensitively; order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: String,
    /// Absolute request URL.
    pub url: String,
    /// Headers in send order.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl RequestDescriptor {
    /// Create a request without headers or body.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// First header with the given name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Replace all headers named `name` with a single one, or append it.
    pub fn set_header(&mut self, name: &str, value: String) {
        match self
            .headers
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some(index) => {
                self.headers[index].1 = value;
                let mut seen = 0;
                self.headers.retain(|(key, _)| {
                    if key.eq_ignore_ascii_case(name) {
                        seen += 1;
                        seen == 1
                    } else {
                        true
                    }
                });
            }
            None => self.headers.push((name.to_owned(), value)),
        }
    }

    /// Value of the `Content-Type` header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Whether the body is `application/x-www-form-urlencoded`.
    ///
    /// Media type parameters such as `charset` are ignored.
    pub fn is_form_urlencoded(&self) -> bool {
        self.content_type().is_some_and(|value| {
            value
                .split(';')
                .next()
                .is_some_and(|media| media.trim().eq_ignore_ascii_case(FORM_URLENCODED))
        })
    }

    /// Body to include in the signature: non-empty and form-urlencoded only.
    pub fn form_body(&self) -> Option<&str> {
        self.body
            .as_deref()
            .filter(|body| !body.is_empty() && self.is_form_urlencoded())
    }
}

/// Where OAuth parameters are transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthParamsLocation {
    /// `Authorization: OAuth ...` header (Section 3.5.1).
    #[default]
    Header,
    /// Form-encoded body (Section 3.5.2).
    Body,
    /// Request URI query (Section 3.5.3).
    QueryString,
}

impl AuthParamsLocation {
    /// Configuration name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Body => "body",
            Self::QueryString => "querystring",
        }
    }
}

impl fmt::Display for AuthParamsLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthParamsLocation {
    type Err = OAuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(Self::Header),
            "body" => Ok(Self::Body),
            "querystring" | "query" => Ok(Self::QueryString),
            other => Err(OAuthError::UnsupportedLocation(other.to_owned())),
        }
    }
}

/// Build the `Authorization` header value.
///
/// `realm` comes first when present, as an RFC 2617 quoted-string rather
/// than percent-encoded. The remaining parameters keep their generation order.
pub fn authorization_header(params: &OAuthParameters, realm: Option<&str>) -> String {
    let realm_part = realm.map(|realm| {
        let escaped = realm.replace('\\', "\\\\").replace('"', "\\\"");
        format!("realm=\"{escaped}\"")
    });
    let header_parts: Vec<String> = realm_part
        .into_iter()
        .chain(
            params
                .iter()
                .map(|(name, value)| format!("{name}=\"{}\"", percent_encode(value))),
        )
        .collect();
    format!("OAuth {}", header_parts.join(", "))
}

/// Append encoded pairs to a URL query, keeping any fragment at the end.
pub(crate) fn append_query<'a, I>(url: &str, pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let encoded = encode_pairs(pairs);
    if encoded.is_empty() {
        return url.to_owned();
    }

    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let separator = match base.split_once('?') {
        None => "?",
        Some((_, "")) => "",
        Some(_) if base.ends_with('&') => "",
        Some(_) => "&",
    };

    let mut result = format!("{base}{separator}{encoded}");
    if let Some(fragment) = fragment {
        result.push('#');
        result.push_str(fragment);
    }
    result
}

/// Write signed parameters to the request, returning the new request.
///
/// Only the channel selected by `location` changes. `realm` is sent with the
/// header strategy only.
pub fn apply_parameters(
    request: &RequestDescriptor,
    params: &OAuthParameters,
    location: AuthParamsLocation,
    realm: Option<&str>,
) -> Result<RequestDescriptor, OAuthError> {
    let mut signed = request.clone();
    match location {
        AuthParamsLocation::Header => {
            signed.set_header("Authorization", authorization_header(params, realm));
        }
        AuthParamsLocation::Body => {
            if !request.is_form_urlencoded() {
                return Err(OAuthError::InvalidContentTypeForBody {
                    content_type: request.content_type().map(ToOwned::to_owned),
                });
            }
            let encoded = encode_pairs(params.iter());
            signed.body = Some(match request.body.as_deref() {
                Some(body) if !body.is_empty() => format!("{body}&{encoded}"),
                _ => encoded,
            });
        }
        AuthParamsLocation::QueryString => {
            signed.url = append_query(&request.url, params.iter());
        }
    }
    Ok(signed)
}
