//! HTTP transport used by the token exchange.

use std::future::Future;
use std::time::Duration;

use ureq::{Agent, RequestBuilder};

use crate::error::TransportError;
use crate::request::RequestDescriptor;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Response from a token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends signed requests for the token exchange.
///
/// Injected into [`TokenExchange`](crate::TokenExchange) so tests and
/// embedders can route requests through their own client.
pub trait HttpTransport: Send + Sync {
    /// Send a request and return the status and body.
    ///
    /// Any HTTP status counts as a response; only failures to get one are
    /// errors.
    fn send(
        &self,
        request: RequestDescriptor,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// [`HttpTransport`] backed by a blocking `ureq` agent.
///
/// Requests run on the tokio blocking pool.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Create a transport with a global per-request timeout.
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT))
    }
}

impl HttpTransport for UreqTransport {
    fn send(
        &self,
        request: RequestDescriptor,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        let agent = self.agent.clone();
        async move {
            tokio::task::spawn_blocking(move || send_blocking(&agent, &request)).await?
        }
    }
}

fn with_headers<B>(
    mut builder: RequestBuilder<B>,
    request: &RequestDescriptor,
) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_blocking(
    agent: &Agent,
    request: &RequestDescriptor,
) -> Result<HttpResponse, TransportError> {
    let url = request.url.as_str();
    let body = request.body.as_deref().unwrap_or("").as_bytes();

    // Query may carry oauth_signature
    let endpoint = url.split_once('?').map_or(url, |(head, _)| head);
    tracing::debug!(method = %request.method, endpoint, "Sending token request");
    let response = match request.method.to_ascii_uppercase().as_str() {
        "GET" => with_headers(agent.get(url), request).call()?,
        "HEAD" => with_headers(agent.head(url), request).call()?,
        "DELETE" => with_headers(agent.delete(url), request).call()?,
        "POST" => with_headers(agent.post(url), request).send(body)?,
        "PUT" => with_headers(agent.put(url), request).send(body)?,
        "PATCH" => with_headers(agent.patch(url), request).send(body)?,
        other => return Err(TransportError::UnsupportedMethod(other.to_owned())),
    };

    let status = response.status().as_u16();
    let mut body_reader = response.into_body();
    let body = body_reader.read_to_string()?;

    Ok(HttpResponse { status, body })
}
