//! Fetching activity details for a share token.
//!
//! [`ShareClient`] decrypts the one-time token handed over by the front end,
//! signs a `GET /profile/{token}` request, sends it through the injected
//! [`HttpClient`] and opens the returned receipt.

use crate::{
    activity::ActivityDetails,
    config::ClientConfig,
    crypto::{self, RsaPrivateKey},
    error::ErrorKind,
    receipt::{self, ReceiptPipeline},
    request::{self, SignedRequest},
};

pub mod http;

pub use http::{HttpClient, HttpResponse, NoHttpClientError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to decrypt share token: {0}")]
    Token(#[source] crypto::Error),
    #[error(transparent)]
    Request(#[from] request::Error),
    #[error("request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("server responded with status {status}: {body}")]
    Http { status: u16, body: String },
    #[error(transparent)]
    Receipt(#[from] receipt::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Token(e) => e.kind(),
            Error::Request(e) => e.kind(),
            Error::Transport(_) => ErrorKind::Transport { status: None },
            Error::Http { status, .. } => ErrorKind::Transport {
                status: Some(*status),
            },
            Error::Receipt(e) => e.kind(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}

pub struct ShareClient<C> {
    config: ClientConfig,
    key: RsaPrivateKey,
    http: C,
}

impl<C: HttpClient> ShareClient<C> {
    pub fn new(config: ClientConfig, key: RsaPrivateKey, http: C) -> Self {
        Self { config, key, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Exchange an encrypted share token for the activity details it refers to.
    pub async fn get_activity_details(&self, encrypted_token: &str) -> Result<ActivityDetails, Error> {
        let token = crypto::decrypt_token(encrypted_token, &self.key).map_err(Error::Token)?;

        let request = SignedRequest::builder()
            .with_key(self.key.clone())
            .with_http_method("GET")
            .with_base_url(self.config.api_url())
            .with_endpoint(&format!("/profile/{token}"))
            .with_param("appId", self.config.sdk_id())
            .with_header("Content-Type", "application/json")
            .with_header("Accept", "application/json")
            .build()?;

        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| Error::Transport(Box::new(e)))?;

        if !response.is_success() {
            tracing::warn!("profile request failed with status {}", response.status);
            return Err(Error::Http {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        let receipt = ReceiptPipeline::new(&self.key).process_json(&response.body)?;
        Ok(receipt.into())
    }
}
