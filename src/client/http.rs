//! Transport seam for the sharing service.

use async_trait::async_trait;

use crate::request::SignedRequest;

/// HTTP response from an HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends signed requests. The crate performs no network I/O itself.
// TODO: drop async_trait once the MSRV allows `async fn` in public traits with a `Send` bound.
#[async_trait]
pub trait HttpClient: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send the request as is: method, URL, headers and body are already final.
    async fn send(&self, request: SignedRequest) -> Result<HttpResponse, Self::Error>;
}

/// Error returned when using `()` as an HTTP client.
#[derive(Debug, thiserror::Error)]
#[error("no HTTP client configured")]
pub struct NoHttpClientError;

/// Implementation of [`HttpClient`] for `()` that always fails, for offline use.
#[async_trait]
impl HttpClient for () {
    type Error = NoHttpClientError;

    async fn send(&self, _request: SignedRequest) -> Result<HttpResponse, Self::Error> {
        Err(NoHttpClientError)
    }
}
