//! Protobuf messages carried inside a sharing receipt.
//!
//! Field tags follow the attribute and common-public-API schemas the service
//! encodes with; only the fields this crate reads are declared, unknown fields
//! are skipped by `prost` on decode.

use prost::{Enumeration, Message};

/// AES-CBC ciphertext plus its IV.
#[derive(Clone, PartialEq, Message)]
pub struct EncryptedData {
    #[prost(bytes = "vec", tag = "1")]
    pub iv: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub cipher_text: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
pub struct AttributeList {
    #[prost(message, repeated, tag = "1")]
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Attribute {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
    #[prost(enumeration = "ContentType", tag = "3")]
    pub content_type: i32,
    #[prost(message, repeated, tag = "4")]
    pub anchors: Vec<Anchor>,
}

/// Provenance record attached to an attribute.
#[derive(Clone, PartialEq, Message)]
pub struct Anchor {
    #[prost(bytes = "vec", tag = "1")]
    pub artifact_link: Vec<u8>,
    /// DER encoded certificates, leaf first.
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub origin_server_certs: Vec<Vec<u8>>,
    #[prost(bytes = "vec", tag = "3")]
    pub artifact_signature: Vec<u8>,
    #[prost(string, tag = "4")]
    pub sub_type: String,
    #[prost(bytes = "vec", tag = "5")]
    pub signature: Vec<u8>,
    /// Encoded [`SignedTimestamp`].
    #[prost(bytes = "vec", tag = "6")]
    pub signed_time_stamp: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
pub struct SignedTimestamp {
    #[prost(int32, tag = "1")]
    pub version: i32,
    /// Microseconds since the Unix epoch.
    #[prost(uint64, tag = "2")]
    pub timestamp: u64,
    #[prost(bytes = "vec", tag = "3")]
    pub message_digest: Vec<u8>,
    #[prost(bytes = "vec", tag = "4")]
    pub chain_digest: Vec<u8>,
    #[prost(bytes = "vec", tag = "5")]
    pub chain_digest_skip1: Vec<u8>,
    #[prost(bytes = "vec", tag = "6")]
    pub chain_digest_skip2: Vec<u8>,
}

/// Nested list of typed items held in a `MULTI_VALUE` attribute.
#[derive(Clone, PartialEq, Message)]
pub struct MultiValue {
    #[prost(message, repeated, tag = "1")]
    pub values: Vec<MultiValueItem>,
}

#[derive(Clone, PartialEq, Message)]
pub struct MultiValueItem {
    #[prost(enumeration = "ContentType", tag = "1")]
    pub content_type: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Enumeration)]
#[repr(i32)]
pub enum ContentType {
    Undefined = 0,
    String = 1,
    Jpeg = 2,
    Date = 3,
    Png = 4,
    Json = 5,
    MultiValue = 6,
    Int = 7,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unknown_content_type_is_undefined() {
        let item = MultiValueItem {
            content_type: 42,
            data: vec![],
        };
        assert_eq!(item.content_type(), ContentType::Undefined);
    }

    #[test]
    fn attribute_list_decodes_from_known_bytes() {
        // AttributeList { attributes: [Attribute { name: "a", value: "b", content_type: STRING }] }
        let bytes = hex::decode("0a080a01611201621801").unwrap();
        let list = AttributeList::decode(bytes.as_slice()).unwrap();
        assert_eq!(list.attributes.len(), 1);
        assert_eq!(list.attributes[0].name, "a");
        assert_eq!(list.attributes[0].value, b"b");
        assert_eq!(list.attributes[0].content_type(), ContentType::String);
    }
}
