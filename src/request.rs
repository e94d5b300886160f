//! Signed outbound requests.
//!
//! Every call to the sharing service carries a fresh `timestamp` and `nonce`
//! in its query string and an RSA-SHA256 signature over
//! `METHOD&endpoint?query[&base64(body)]` in the `X-Yoti-Auth-Digest` header.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use rsa::{pkcs1v15::SigningKey, pkcs8::EncodePublicKey, RsaPrivateKey, RsaPublicKey};
use serde::Serialize;
use sha2::Sha256;
use signature::{SignatureEncoding, Signer};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ErrorKind;

pub const AUTH_DIGEST_HEADER: &str = "X-Yoti-Auth-Digest";
pub const AUTH_KEY_HEADER: &str = "X-Yoti-Auth-Key";
pub const SDK_HEADER: &str = "X-Yoti-SDK";
pub const SDK_VERSION_HEADER: &str = "X-Yoti-SDK-Version";

const SDK_NAME: &str = "Rust";
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("unable to generate nonce: {0}")]
    Rng(#[from] rand::Error),
    #[error("unable to sign request: {0}")]
    Signing(#[from] signature::Error),
    #[error("unable to encode public key: {0}")]
    PublicKey(String),
    #[error("unable to serialize request body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unable to encode query parameters: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingField(_) | Error::Json(_) | Error::Query(_) => ErrorKind::Configuration,
            Error::Rng(_) => ErrorKind::Entropy,
            Error::Signing(_) | Error::PublicKey(_) => ErrorKind::Key,
        }
    }
}

/// A request ready to hand to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    method: String,
    url: String,
    headers: BTreeMap<String, String>,
    body: Option<Vec<u8>>,
    digest: String,
}

impl SignedRequest {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Base URL followed by the endpoint and its signed query string.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// The string that was signed.
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

#[derive(Default)]
pub struct Builder {
    key: Option<RsaPrivateKey>,
    method: Option<String>,
    base_url: Option<String>,
    endpoint: Option<String>,
    headers: Vec<(String, String)>,
    params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl Builder {
    pub fn with_key(mut self, key: RsaPrivateKey) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_http_method(mut self, method: &str) -> Self {
        self.method = Some(method.to_uppercase());
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_owned());
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_owned());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_json_body<T: Serialize>(self, body: &T) -> Result<Self, Error> {
        let body = serde_json::to_vec(body)?;
        Ok(self
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }

    pub fn build(self) -> Result<SignedRequest, Error> {
        let key = self.key.ok_or(Error::MissingField("key"))?;
        let method = non_empty(self.method, "http method")?;
        let base_url = non_empty(self.base_url, "base url")?;
        let endpoint = non_empty(self.endpoint, "endpoint")?;

        let nonce = nonce()?;
        let timestamp = (OffsetDateTime::now_utc().unix_timestamp() * 1000).to_string();

        let mut query = serde_urlencoded::to_string(&self.params)?;
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&format!("timestamp={timestamp}&nonce={nonce}"));
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        let path = format!("{endpoint}{separator}{query}");

        let digest = match &self.body {
            Some(body) => format!("{method}&{path}&{}", STANDARD.encode(body)),
            None => format!("{method}&{path}"),
        };

        let signing_key = SigningKey::<Sha256>::new(key.clone());
        let signature = signing_key.try_sign(digest.as_bytes())?;
        let public_key = RsaPublicKey::from(&key)
            .to_public_key_der()
            .map_err(|e| Error::PublicKey(e.to_string()))?;

        let mut headers = BTreeMap::new();
        headers.insert(SDK_HEADER.to_owned(), SDK_NAME.to_owned());
        headers.insert(SDK_VERSION_HEADER.to_owned(), format!("{SDK_NAME}-{SDK_VERSION}"));
        headers.extend(self.headers);
        headers.insert(
            AUTH_DIGEST_HEADER.to_owned(),
            STANDARD.encode(signature.to_vec()),
        );
        headers.insert(
            AUTH_KEY_HEADER.to_owned(),
            STANDARD.encode(public_key.as_bytes()),
        );

        tracing::debug!("signed {method} request to {path}");

        Ok(SignedRequest {
            url: format!("{}{path}", base_url.trim_end_matches('/')),
            method,
            headers,
            body: self.body,
            digest,
        })
    }
}

fn non_empty(value: Option<String>, field: &'static str) -> Result<String, Error> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingField(field))
}

/// 16 random bytes, formatted as an uppercase hyphenated UUID.
fn nonce() -> Result<String, Error> {
    let mut bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(format!("{:X}", Uuid::from_bytes(bytes)))
}
