//! Decoded profile attributes.
//!
//! A decrypted profile is a protobuf `AttributeList`. Each entry becomes an
//! [`Attribute`] whose value is parsed according to its content type and whose
//! anchors are resolved from their origin certificates.

use prost::Message;

use crate::{
    anchor::{self, Anchor, AnchorSet},
    error::ErrorKind,
    proto::{self, ContentType},
};

pub mod date;
pub mod value;

pub use date::FullDate;
pub use value::{parse_value, Image, ImageType, TypedValue, ValueError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to decode attribute list: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("attribute {name:?} holds a malformed multi value: {reason}")]
    MultiValue { name: String, reason: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Decode
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    content_type: ContentType,
    value: Result<TypedValue, ValueError>,
    anchors: Vec<Anchor>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: TypedValue) -> Self {
        let content_type = match &value {
            TypedValue::String(_) => ContentType::String,
            TypedValue::Date(_) => ContentType::Date,
            TypedValue::Int(_) => ContentType::Int,
            TypedValue::Json(_) => ContentType::Json,
            TypedValue::Image(image) => match image.image_type() {
                ImageType::Jpeg => ContentType::Jpeg,
                ImageType::Png => ContentType::Png,
                ImageType::Unknown => ContentType::Undefined,
            },
            TypedValue::MultiValue(_) => ContentType::MultiValue,
        };
        Self {
            name: name.into(),
            content_type,
            value: Ok(value),
            anchors: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// The parsed value, or the error raised while parsing it.
    pub fn value(&self) -> Result<&TypedValue, ValueError> {
        self.value.as_ref().map_err(Clone::clone)
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn sources(&self) -> Vec<&Anchor> {
        self.anchors.sources()
    }

    pub fn verifiers(&self) -> Vec<&Anchor> {
        self.anchors.verifiers()
    }
}

impl From<&proto::Attribute> for Attribute {
    fn from(attribute: &proto::Attribute) -> Self {
        let content_type = attribute.content_type();
        let value = parse_value(content_type, &attribute.value);
        if let Err(e) = &value {
            tracing::warn!("attribute {:?} has an unreadable value: {e}", attribute.name);
        }
        Self {
            name: attribute.name.clone(),
            content_type,
            value,
            anchors: anchor::parse_anchors(&attribute.anchors),
        }
    }
}

/// Decode a serialized `AttributeList`.
///
/// A value that fails to parse does not fail the list; the attribute is kept
/// with the error in place of its value. The exception is a top-level
/// `MULTI_VALUE` whose own envelope cannot be decoded, which fails the list.
pub fn decode_attribute_list(bytes: &[u8]) -> Result<Vec<Attribute>, Error> {
    let list = proto::AttributeList::decode(bytes)?;
    list.attributes
        .iter()
        .map(|attribute| {
            let attribute = Attribute::from(attribute);
            match &attribute.value {
                Err(ValueError::MultiValue(reason)) => Err(Error::MultiValue {
                    name: attribute.name,
                    reason: reason.clone(),
                }),
                _ => Ok(attribute),
            }
        })
        .collect()
}
