//! The sharing receipt and the pipeline that opens it.
//!
//! ```text
//! receipt JSON
//!   -> check sharing outcome
//!   -> unwrap AES key (RSA PKCS#1 v1.5)
//!   -> for profile_content and other_party_profile_content:
//!        base64 -> EncryptedData -> AES-CBC -> AttributeList -> attributes with anchors
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::{
    attribute,
    crypto::{self, RsaPrivateKey},
    error::ErrorKind,
    profile::Profile,
};

pub const SHARING_OUTCOME_SUCCESS: &str = "SUCCESS";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("sharing outcome is {outcome:?}")]
    SharingFailure { outcome: String },
    #[error("unable to unwrap receipt key: {0}")]
    Unwrap(#[source] crypto::Error),
    #[error("unable to decrypt {content}: {source}")]
    Decrypt {
        content: &'static str,
        #[source]
        source: crypto::Error,
    },
    #[error("unable to decode {content}: {source}")]
    Decode {
        content: &'static str,
        #[source]
        source: attribute::Error,
    },
    #[error("unable to parse receipt JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid receipt timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: time::error::Parse,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SharingFailure { .. } => ErrorKind::SharingFailure,
            Error::Unwrap(e) | Error::Decrypt { source: e, .. } => e.kind(),
            Error::Decode { source, .. } => source.kind(),
            Error::Json(_) => ErrorKind::Decode,
            Error::Timestamp { .. } => ErrorKind::Parse,
        }
    }
}

/// Receipt as returned by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    pub wrapped_receipt_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_party_profile_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remember_me_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_remember_me_id: Option<String>,
    pub sharing_outcome: String,
    /// RFC 3339 with nanoseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Receipt {
    /// Parse a bare receipt, or one wrapped as `{"receipt": {...}}`.
    pub fn from_json(json: &[u8]) -> Result<Self, Error> {
        let mut value: serde_json::Value = serde_json::from_slice(json)?;
        if let Some(inner) = value.get_mut("receipt") {
            return Ok(serde_json::from_value(inner.take())?);
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Everything recovered from one receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct DecryptedReceipt {
    pub(crate) receipt_id: Option<String>,
    pub(crate) remember_me_id: Option<String>,
    pub(crate) parent_remember_me_id: Option<String>,
    pub(crate) timestamp: Option<OffsetDateTime>,
    pub(crate) profile: Profile,
    pub(crate) other_party_profile: Profile,
}

impl DecryptedReceipt {
    pub fn receipt_id(&self) -> Option<&str> {
        self.receipt_id.as_deref()
    }

    pub fn remember_me_id(&self) -> Option<&str> {
        self.remember_me_id.as_deref()
    }

    pub fn parent_remember_me_id(&self) -> Option<&str> {
        self.parent_remember_me_id.as_deref()
    }

    pub fn timestamp(&self) -> Option<OffsetDateTime> {
        self.timestamp
    }

    /// Attributes from `profile_content`, describing the relying application.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Attributes from `other_party_profile_content`, describing the user.
    pub fn other_party_profile(&self) -> &Profile {
        &self.other_party_profile
    }
}

/// Opens receipts with a relying party's private key.
///
/// Holds no state besides the key reference, so one pipeline may process any
/// number of receipts, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct ReceiptPipeline<'a> {
    key: &'a RsaPrivateKey,
}

impl<'a> ReceiptPipeline<'a> {
    pub fn new(key: &'a RsaPrivateKey) -> Self {
        Self { key }
    }

    pub fn process(&self, receipt: &Receipt) -> Result<DecryptedReceipt, Error> {
        if receipt.sharing_outcome != SHARING_OUTCOME_SUCCESS {
            return Err(Error::SharingFailure {
                outcome: receipt.sharing_outcome.clone(),
            });
        }

        let key = crypto::unwrap_key(&receipt.wrapped_receipt_key, self.key)
            .map_err(Error::Unwrap)?;

        let profile = open_profile(&key, "profile content", receipt.profile_content.as_deref())?;
        let other_party_profile = open_profile(
            &key,
            "other party profile content",
            receipt.other_party_profile_content.as_deref(),
        )?;

        let timestamp = receipt
            .timestamp
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| {
                OffsetDateTime::parse(t, &Rfc3339).map_err(|source| Error::Timestamp {
                    value: t.to_owned(),
                    source,
                })
            })
            .transpose()?;

        tracing::debug!(
            "opened receipt {:?}: {} application attributes, {} user attributes",
            receipt.receipt_id,
            profile.attributes().len(),
            other_party_profile.attributes().len(),
        );

        Ok(DecryptedReceipt {
            receipt_id: receipt.receipt_id.clone(),
            remember_me_id: receipt.remember_me_id.clone(),
            parent_remember_me_id: receipt.parent_remember_me_id.clone(),
            timestamp,
            profile,
            other_party_profile,
        })
    }

    pub fn process_json(&self, json: &[u8]) -> Result<DecryptedReceipt, Error> {
        self.process(&Receipt::from_json(json)?)
    }
}

fn open_profile(key: &[u8], content: &'static str, encoded: Option<&str>) -> Result<Profile, Error> {
    let Some(encoded) = encoded.map(str::trim).filter(|e| !e.is_empty()) else {
        return Ok(Profile::default());
    };
    let decrypt = |source| Error::Decrypt { content, source };
    let envelope = STANDARD
        .decode(encoded)
        .map_err(|e| decrypt(crypto::Error::from(e)))?;
    let plain = crypto::decrypt_encrypted_data(key, &envelope).map_err(decrypt)?;
    let attributes = attribute::decode_attribute_list(&plain)
        .map_err(|source| Error::Decode { content, source })?;
    Ok(Profile::new(attributes))
}
