//! Client configuration, from code or from the environment.

use crate::error::ErrorKind;

pub const SDK_ID_ENV: &str = "YOTI_CLIENT_SDK_ID";
pub const API_URL_ENV: &str = "YOTI_API_URL";
pub const DEFAULT_API_URL: &str = "https://api.yoti.com/api/v1";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    sdk_id: String,
    api_url: String,
}

impl ClientConfig {
    /// Configuration for `sdk_id`, using `YOTI_API_URL` when set.
    pub fn new(sdk_id: impl Into<String>) -> Result<Self, Error> {
        Self::with_lookup(sdk_id.into(), |name| std::env::var(name).ok())
    }

    /// Configuration read from `YOTI_CLIENT_SDK_ID` and, optionally, `YOTI_API_URL`.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let sdk_id = lookup(SDK_ID_ENV).ok_or(Error::MissingEnv(SDK_ID_ENV))?;
        Self::with_lookup(sdk_id, lookup)
    }

    fn with_lookup(sdk_id: String, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        if sdk_id.trim().is_empty() {
            return Err(Error::Empty("sdk id"));
        }
        let api_url = lookup(API_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        Ok(Self { sdk_id, api_url })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Result<Self, Error> {
        let api_url = api_url.into();
        if api_url.trim().is_empty() {
            return Err(Error::Empty("api url"));
        }
        self.api_url = api_url;
        Ok(self)
    }

    pub fn sdk_id(&self) -> &str {
        &self.sdk_id
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}
