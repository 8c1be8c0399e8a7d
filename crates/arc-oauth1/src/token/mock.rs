//! Mock transport for testing.
//!
//! Provides [`MockTransport`] for exercising the token flow without a server.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use crate::error::TransportError;
use crate::request::RequestDescriptor;
use crate::token::transport::{HttpResponse, HttpTransport};

/// Mock transport for testing.
///
/// Replays queued responses in order and records every request it is given.
///
/// # Example
///
/// ```ignore
/// use arc_oauth1::MockTransport;
///
/// let transport = MockTransport::new()
///     .with_response(200, "oauth_token=t&oauth_token_secret=s")
///     .with_response(400, "oauth_problem=token_rejected");
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, String>>>,
    requests: Mutex<Vec<RequestDescriptor>>,
}

impl MockTransport {
    /// Create a mock with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_response(self, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    /// Queue a transport failure.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.into()));
        self
    }

    /// Requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpTransport for MockTransport {
    fn send(
        &self,
        request: RequestDescriptor,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        self.requests.lock().unwrap().push(request);
        let next = self.responses.lock().unwrap().pop_front();
        async move {
            match next {
                Some(Ok(response)) => Ok(response),
                Some(Err(message)) => Err(TransportError::Other(message)),
                None => Err(TransportError::Other("no response queued".to_owned())),
            }
        }
    }
}
