use const_oid::ObjectIdentifier;
use der::{
    asn1::{Ia5StringRef, PrintableStringRef, TeletexStringRef, Utf8StringRef},
    Decode, Tag, Tagged,
};
use x509_cert::{attr::AttributeValue, ext::Extension, Certificate};

const COMMON_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");

/// X.509 certificate with the DER representation held in memory, as it arrived in the anchor.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OriginCertificate {
    inner: Certificate,
    der: Vec<u8>,
}

impl OriginCertificate {
    pub fn from_der(bytes: &[u8]) -> Result<Self, der::Error> {
        let inner = Certificate::from_der(bytes)?;
        Ok(Self {
            inner,
            der: bytes.to_vec(),
        })
    }

    pub fn certificate(&self) -> &Certificate {
        &self.inner
    }

    pub fn der(&self) -> &[u8] {
        &self.der
    }

    pub fn extensions(&self) -> &[Extension] {
        self.inner
            .tbs_certificate
            .extensions
            .as_deref()
            .unwrap_or_default()
    }

    /// First CommonName of the subject, or "Unknown".
    pub fn common_name(&self) -> &str {
        self.inner
            .tbs_certificate
            .subject
            .0
            .iter()
            .flat_map(|rdn| rdn.0.iter())
            .filter(|attribute| attribute.oid == COMMON_NAME)
            .find_map(|attribute| attribute_value_to_str(&attribute.value))
            .unwrap_or("Unknown")
    }
}

fn attribute_value_to_str(av: &AttributeValue) -> Option<&str> {
    match av.tag() {
        Tag::PrintableString => PrintableStringRef::try_from(av).ok().map(|s| s.as_str()),
        Tag::Utf8String => Utf8StringRef::try_from(av).ok().map(|s| s.as_str()),
        Tag::Ia5String => Ia5StringRef::try_from(av).ok().map(|s| s.as_str()),
        Tag::TeletexString => TeletexStringRef::try_from(av).ok().map(|s| s.as_str()),
        _ => None,
    }
}
