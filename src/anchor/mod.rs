//! Provenance anchors attached to profile attributes.
//!
//! An anchor carries a chain of origin certificates. A certificate with the
//! source extension marks where the attribute was obtained (for example a
//! passport chip), one with the verifier extension marks who checked it.
//! Parsing never fails: unreadable certificates, extensions and timestamps are
//! skipped and logged, leaving an anchor with whatever could be recovered.

use strum_macros::{Display, EnumString};

use crate::proto;

pub mod certificate;
pub mod extension;
pub mod timestamp;

pub use certificate::OriginCertificate;
pub use timestamp::SignedTimestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AnchorType {
    Source,
    Verifier,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    anchor_type: AnchorType,
    origin_certificates: Vec<OriginCertificate>,
    signed_timestamp: Option<SignedTimestamp>,
    sub_type: String,
    values: Vec<String>,
    artifact_signature: Vec<u8>,
}

impl Anchor {
    /// Build an anchor from DER certificates, leaf first, and an encoded signed timestamp.
    pub fn parse<'a, I>(certificates: I, signed_timestamp: &[u8], sub_type: &str) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let origin_certificates: Vec<OriginCertificate> = certificates
            .into_iter()
            .enumerate()
            .filter_map(|(index, der)| match OriginCertificate::from_der(der) {
                Ok(cert) => Some(cert),
                Err(e) => {
                    tracing::warn!("skipping origin certificate {index} of anchor {sub_type:?}: {e}");
                    None
                }
            })
            .collect();

        let extensions = || origin_certificates.iter().flat_map(|c| c.extensions());

        let anchor_type = extensions()
            .find_map(|ext| extension::anchor_type(&ext.extn_id))
            .unwrap_or(AnchorType::Unknown);

        let values = extensions()
            .filter_map(|ext| match extension::decode_value(ext) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!("extension {} carries no anchor value: {e}", ext.extn_id);
                    None
                }
            })
            .collect();

        let signed_timestamp = if signed_timestamp.is_empty() {
            None
        } else {
            match SignedTimestamp::from_bytes(signed_timestamp) {
                Ok(ts) => Some(ts),
                Err(e) => {
                    tracing::warn!("ignoring signed timestamp of anchor {sub_type:?}: {e}");
                    None
                }
            }
        };

        Self {
            anchor_type,
            origin_certificates,
            signed_timestamp,
            sub_type: sub_type.to_owned(),
            values,
            artifact_signature: Vec::new(),
        }
    }

    pub fn anchor_type(&self) -> AnchorType {
        self.anchor_type
    }

    pub fn origin_certificates(&self) -> &[OriginCertificate] {
        &self.origin_certificates
    }

    pub fn signed_timestamp(&self) -> Option<&SignedTimestamp> {
        self.signed_timestamp.as_ref()
    }

    pub fn sub_type(&self) -> &str {
        &self.sub_type
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The first extension value, which names the source or verifier.
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn artifact_signature(&self) -> &[u8] {
        &self.artifact_signature
    }
}

pub fn parse_anchor(anchor: &proto::Anchor) -> Anchor {
    let mut parsed = Anchor::parse(
        anchor.origin_server_certs.iter().map(Vec::as_slice),
        &anchor.signed_time_stamp,
        &anchor.sub_type,
    );
    parsed.artifact_signature = anchor.artifact_signature.clone();
    parsed
}

pub fn parse_anchors(anchors: &[proto::Anchor]) -> Vec<Anchor> {
    anchors.iter().map(parse_anchor).collect()
}

/// Filtering helpers over a list of anchors.
pub trait AnchorSet {
    fn of_type(&self, anchor_type: AnchorType) -> Vec<&Anchor>;

    fn sources(&self) -> Vec<&Anchor> {
        self.of_type(AnchorType::Source)
    }

    fn verifiers(&self) -> Vec<&Anchor> {
        self.of_type(AnchorType::Verifier)
    }
}

impl AnchorSet for [Anchor] {
    fn of_type(&self, anchor_type: AnchorType) -> Vec<&Anchor> {
        self.iter()
            .filter(|a| a.anchor_type == anchor_type)
            .collect()
    }
}
