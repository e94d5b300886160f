//! Custom X.509 extensions that mark a certificate as a source or verifier anchor.
//!
//! The extension value is `SEQUENCE { value [0] IMPLICIT UTF8String }`.

use const_oid::ObjectIdentifier;
use der::{Decode, Sequence};
use x509_cert::ext::Extension;

use super::AnchorType;

pub const SOURCE_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.4.1.47127.1.1.1");
pub const VERIFIER_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.47127.1.1.2");

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
struct AnchorExtensionValue {
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT")]
    value: String,
}

pub fn anchor_type(oid: &ObjectIdentifier) -> Option<AnchorType> {
    if *oid == SOURCE_OID {
        Some(AnchorType::Source)
    } else if *oid == VERIFIER_OID {
        Some(AnchorType::Verifier)
    } else {
        None
    }
}

/// Decode the UTF-8 value carried by an anchor extension.
pub fn decode_value(extension: &Extension) -> Result<String, der::Error> {
    AnchorExtensionValue::from_der(extension.extn_value.as_bytes()).map(|v| v.value)
}
