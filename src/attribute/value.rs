use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use prost::Message;
use serde_json::Value as JsonValue;

use super::date::FullDate;
use crate::{
    error::ErrorKind,
    proto::{self, ContentType},
};

/// Attribute value after dispatching on its content type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    Date(FullDate),
    Int(i64),
    Json(JsonValue),
    Image(Image),
    MultiValue(Vec<TypedValue>),
}

/// A per-value parse failure. Collections recover from these; typed accessors surface them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("value is not valid UTF-8")]
    Utf8,
    #[error("invalid date {value:?}: {reason}")]
    Date { value: String, reason: String },
    #[error("invalid integer {0:?}")]
    Int(String),
    #[error("invalid JSON: {0}")]
    Json(String),
    #[error("unable to decode multi value: {0}")]
    MultiValue(String),
    #[error("expected a {expected} value, found {found}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid document details: {0}")]
    DocumentDetails(String),
    #[error("invalid age verification: {0}")]
    AgeVerification(String),
}

impl ValueError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Parse
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    Jpeg,
    Png,
    Unknown,
}

impl ImageType {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageType::Jpeg => "image/jpeg",
            ImageType::Png => "image/png",
            ImageType::Unknown => "application/octet-stream",
        }
    }
}

/// Raw bytes tagged with the media type announced by the attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    image_type: ImageType,
    data: Vec<u8>,
}

impl Image {
    pub fn new(image_type: ImageType, data: Vec<u8>) -> Self {
        Self { image_type, data }
    }

    pub fn image_type(&self) -> ImageType {
        self.image_type
    }

    pub fn mime_type(&self) -> &'static str {
        self.image_type.mime_type()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The image as a `data:` URL, suitable for embedding in markup.
    pub fn base64_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.data))
    }
}

impl TypedValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            TypedValue::String(_) => "string",
            TypedValue::Date(_) => "date",
            TypedValue::Int(_) => "integer",
            TypedValue::Json(_) => "JSON",
            TypedValue::Image(_) => "image",
            TypedValue::MultiValue(_) => "multi value",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<FullDate> {
        match self {
            TypedValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            TypedValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&JsonValue> {
        match self {
            TypedValue::Json(j) => Some(j),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&Image> {
        match self {
            TypedValue::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_multi_value(&self) -> Option<&[TypedValue]> {
        match self {
            TypedValue::MultiValue(items) => Some(items),
            _ => None,
        }
    }

    /// Render the value as JSON for display: dates as `YYYY-MM-DD`, images as data URLs.
    pub fn to_json(&self) -> JsonValue {
        match self {
            TypedValue::String(s) => JsonValue::String(s.clone()),
            TypedValue::Date(d) => JsonValue::String(d.to_string()),
            TypedValue::Int(i) => JsonValue::from(*i),
            TypedValue::Json(j) => j.clone(),
            TypedValue::Image(image) => JsonValue::String(image.base64_url()),
            TypedValue::MultiValue(items) => {
                JsonValue::Array(items.iter().map(TypedValue::to_json).collect())
            }
        }
    }
}

/// Parse raw attribute bytes according to their content type.
pub fn parse_value(content_type: ContentType, bytes: &[u8]) -> Result<TypedValue, ValueError> {
    match content_type {
        ContentType::String => utf8(bytes).map(|s| TypedValue::String(s.to_owned())),
        ContentType::Date => {
            let s = utf8(bytes)?;
            FullDate::from_str(s)
                .map(TypedValue::Date)
                .map_err(|e| ValueError::Date {
                    value: s.to_owned(),
                    reason: e.to_string(),
                })
        }
        ContentType::Int => {
            let s = utf8(bytes)?;
            s.parse::<i64>()
                .map(TypedValue::Int)
                .map_err(|_| ValueError::Int(s.to_owned()))
        }
        ContentType::Json => serde_json::from_slice(bytes)
            .map(TypedValue::Json)
            .map_err(|e| ValueError::Json(e.to_string())),
        ContentType::Jpeg => Ok(image(ImageType::Jpeg, bytes)),
        ContentType::Png => Ok(image(ImageType::Png, bytes)),
        ContentType::MultiValue => parse_multi_value(bytes).map(TypedValue::MultiValue),
        ContentType::Undefined => Ok(image(ImageType::Unknown, bytes)),
    }
}

fn image(image_type: ImageType, bytes: &[u8]) -> TypedValue {
    TypedValue::Image(Image::new(image_type, bytes.to_vec()))
}

fn utf8(bytes: &[u8]) -> Result<&str, ValueError> {
    std::str::from_utf8(bytes).map_err(|_| ValueError::Utf8)
}

/// Items that fail to parse are dropped; the rest of the list still decodes.
fn parse_multi_value(bytes: &[u8]) -> Result<Vec<TypedValue>, ValueError> {
    let multi_value =
        proto::MultiValue::decode(bytes).map_err(|e| ValueError::MultiValue(e.to_string()))?;

    let parsed = multi_value
        .values
        .iter()
        .map(|item| parse_value(item.content_type(), &item.data));

    Ok(parsed
        .enumerate()
        .filter_map(|(index, item)| match item {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("dropping multi value item {index}: {e}");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::proto::MultiValueItem;

    fn multi(items: Vec<(ContentType, &[u8])>) -> Vec<u8> {
        proto::MultiValue {
            values: items
                .into_iter()
                .map(|(content_type, data)| MultiValueItem {
                    content_type: content_type as i32,
                    data: data.to_vec(),
                })
                .collect(),
        }
        .encode_to_vec()
    }

    #[test]
    fn parses_string() {
        let value = parse_value(ContentType::String, "Ålesund".as_bytes()).unwrap();
        assert_eq!(value.as_str(), Some("Ålesund"));
        assert_eq!(
            parse_value(ContentType::String, &[0xc3, 0x28]),
            Err(ValueError::Utf8)
        );
    }

    #[test]
    fn parses_date() {
        let value = parse_value(ContentType::Date, b"1970-12-01").unwrap();
        assert_eq!(value.as_date().unwrap().to_string(), "1970-12-01");
    }

    #[test]
    fn invalid_date_is_an_error() {
        let err = parse_value(ContentType::Date, b"1970-12-41").unwrap_err();
        assert!(matches!(err, ValueError::Date { .. }), "{err:?}");
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(matches!(
            parse_value(ContentType::Date, b"+1970-12-01"),
            Err(ValueError::Date { .. })
        ));
    }

    #[test]
    fn parses_int() {
        assert_eq!(parse_value(ContentType::Int, b"-42").unwrap().as_int(), Some(-42));
        assert_eq!(
            parse_value(ContentType::Int, b"4.2"),
            Err(ValueError::Int("4.2".to_string()))
        );
    }

    #[test]
    fn json_keeps_big_numbers() {
        let value = parse_value(
            ContentType::Json,
            br#"{"building_number": 12345678901234567890123, "ratio": 0.1000000000000000055511151231257827}"#,
        )
        .unwrap();
        let json = value.as_json().unwrap();
        assert_eq!(json["building_number"].to_string(), "12345678901234567890123");
        assert_eq!(json["ratio"].to_string(), "0.1000000000000000055511151231257827");
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            parse_value(ContentType::Json, b"{not json"),
            Err(ValueError::Json(_))
        ));
    }

    #[test]
    fn images_are_tagged_with_mime_type() {
        let jpeg = parse_value(ContentType::Jpeg, &[0xff, 0xd8]).unwrap();
        assert_eq!(jpeg.as_image().unwrap().mime_type(), "image/jpeg");
        let png = parse_value(ContentType::Png, &[0x89, 0x50]).unwrap();
        assert_eq!(png.as_image().unwrap().mime_type(), "image/png");
        let raw = parse_value(ContentType::Undefined, &[1, 2, 3]).unwrap();
        assert_eq!(raw.as_image().unwrap().image_type(), ImageType::Unknown);
        assert_eq!(raw.as_image().unwrap().data(), &[1, 2, 3]);
    }

    #[test]
    fn base64_url() {
        let image = Image::new(ImageType::Png, vec![0, 1, 2]);
        assert_eq!(image.base64_url(), "data:image/png;base64,AAEC");
    }

    #[test]
    fn multi_value_drops_malformed_items() {
        let bytes = multi(vec![
            (ContentType::Date, &b"not a date"[..]),
            (ContentType::String, &b"hello"[..]),
            (ContentType::MultiValue, &[0xff][..]),
        ]);
        let value = parse_value(ContentType::MultiValue, &bytes).unwrap();
        assert_eq!(
            value.as_multi_value().unwrap(),
            &[TypedValue::String("hello".to_string())]
        );
    }

    #[test]
    fn multi_value_recurses() {
        let inner = multi(vec![
            (ContentType::Int, &b"7"[..]),
            (ContentType::Jpeg, &[0xff, 0xd8][..]),
        ]);
        let outer = multi(vec![
            (ContentType::String, &b"outer"[..]),
            (ContentType::MultiValue, inner.as_slice()),
        ]);
        let value = parse_value(ContentType::MultiValue, &outer).unwrap();
        let items = value.as_multi_value().unwrap();
        assert_eq!(items.len(), 2);
        let nested = items[1].as_multi_value().unwrap();
        assert_eq!(nested[0].as_int(), Some(7));
        assert_eq!(nested[1].as_image().unwrap().image_type(), ImageType::Jpeg);
    }

    #[test]
    fn malformed_top_level_multi_value_is_an_error() {
        assert!(matches!(
            parse_value(ContentType::MultiValue, &[0xff][..]),
            Err(ValueError::MultiValue(_))
        ));
    }

    #[test]
    fn to_json() {
        let value = TypedValue::MultiValue(vec![
            TypedValue::Int(3),
            TypedValue::Date("2001-01-02".parse().unwrap()),
            TypedValue::Json(json!({"a": 1})),
        ]);
        assert_eq!(value.to_json(), json!([3, "2001-01-02", {"a": 1}]));
    }
}
