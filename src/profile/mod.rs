//! Profiles assembled from decoded attribute lists.
//!
//! A [`Profile`] is an ordered attribute collection with typed getters. Each
//! getter returns `Ok(None)` when the attribute is absent, the attribute's own
//! parse error when its value could not be read, and
//! [`ValueError::UnexpectedType`] when it holds a different type.

use serde_json::Value as JsonValue;

use crate::attribute::{Attribute, FullDate, Image, TypedValue, ValueError};

pub mod age_verification;
pub mod document_details;

pub use age_verification::{AgeCheck, AgeVerification};
pub use document_details::DocumentDetails;

pub const GIVEN_NAMES: &str = "given_names";
pub const FAMILY_NAME: &str = "family_name";
pub const FULL_NAME: &str = "full_name";
pub const DATE_OF_BIRTH: &str = "date_of_birth";
pub const GENDER: &str = "gender";
pub const NATIONALITY: &str = "nationality";
pub const PHONE_NUMBER: &str = "phone_number";
pub const EMAIL_ADDRESS: &str = "email_address";
pub const POSTAL_ADDRESS: &str = "postal_address";
pub const STRUCTURED_POSTAL_ADDRESS: &str = "structured_postal_address";
pub const SELFIE: &str = "selfie";
pub const DOCUMENT_DETAILS: &str = "document_details";
pub const DOCUMENT_IMAGES: &str = "document_images";

pub const APPLICATION_NAME: &str = "application_name";
pub const APPLICATION_URL: &str = "application_url";
pub const APPLICATION_LOGO: &str = "application_logo";
pub const APPLICATION_RECEIPT_BGCOLOR: &str = "application_receipt_bgcolor";

const FORMATTED_ADDRESS: &str = "formatted_address";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    attributes: Vec<Attribute>,
}

impl Profile {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// First attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    pub fn attributes_starting_with<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a Attribute> + 'a {
        self.attributes
            .iter()
            .filter(move |a| a.name().starts_with(prefix))
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a TypedValue) -> Option<T>,
    ) -> Result<Option<T>, ValueError> {
        let Some(attribute) = self.attribute(name) else {
            return Ok(None);
        };
        let value = attribute.value()?;
        extract(value)
            .map(Some)
            .ok_or(ValueError::UnexpectedType {
                expected,
                found: value.type_name(),
            })
    }

    pub fn string_attribute(&self, name: &str) -> Result<Option<&str>, ValueError> {
        self.typed(name, "string", TypedValue::as_str)
    }

    pub fn date_attribute(&self, name: &str) -> Result<Option<FullDate>, ValueError> {
        self.typed(name, "date", TypedValue::as_date)
    }

    pub fn int_attribute(&self, name: &str) -> Result<Option<i64>, ValueError> {
        self.typed(name, "integer", TypedValue::as_int)
    }

    pub fn json_attribute(&self, name: &str) -> Result<Option<&JsonValue>, ValueError> {
        self.typed(name, "JSON", TypedValue::as_json)
    }

    pub fn image_attribute(&self, name: &str) -> Result<Option<&Image>, ValueError> {
        self.typed(name, "image", TypedValue::as_image)
    }

    pub fn multi_value_attribute(&self, name: &str) -> Result<Option<&[TypedValue]>, ValueError> {
        self.typed(name, "multi value", TypedValue::as_multi_value)
    }
}

/// Profile of the user who shared their details.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile(Profile);

impl From<Profile> for UserProfile {
    fn from(profile: Profile) -> Self {
        Self(profile)
    }
}

impl UserProfile {
    pub fn profile(&self) -> &Profile {
        &self.0
    }

    pub fn given_names(&self) -> Result<Option<&str>, ValueError> {
        self.0.string_attribute(GIVEN_NAMES)
    }

    pub fn family_name(&self) -> Result<Option<&str>, ValueError> {
        self.0.string_attribute(FAMILY_NAME)
    }

    pub fn full_name(&self) -> Result<Option<&str>, ValueError> {
        self.0.string_attribute(FULL_NAME)
    }

    pub fn date_of_birth(&self) -> Result<Option<FullDate>, ValueError> {
        self.0.date_attribute(DATE_OF_BIRTH)
    }

    pub fn gender(&self) -> Result<Option<&str>, ValueError> {
        self.0.string_attribute(GENDER)
    }

    pub fn nationality(&self) -> Result<Option<&str>, ValueError> {
        self.0.string_attribute(NATIONALITY)
    }

    pub fn phone_number(&self) -> Result<Option<&str>, ValueError> {
        self.0.string_attribute(PHONE_NUMBER)
    }

    pub fn email_address(&self) -> Result<Option<&str>, ValueError> {
        self.0.string_attribute(EMAIL_ADDRESS)
    }

    /// The postal address, falling back to `formatted_address` of the structured address.
    pub fn postal_address(&self) -> Result<Option<String>, ValueError> {
        if let Some(address) = self.0.string_attribute(POSTAL_ADDRESS)? {
            return Ok(Some(address.to_owned()));
        }
        Ok(self
            .structured_postal_address()?
            .and_then(|json| json.get(FORMATTED_ADDRESS))
            .and_then(JsonValue::as_str)
            .map(str::to_owned))
    }

    pub fn structured_postal_address(&self) -> Result<Option<&JsonValue>, ValueError> {
        self.0.json_attribute(STRUCTURED_POSTAL_ADDRESS)
    }

    pub fn selfie(&self) -> Result<Option<&Image>, ValueError> {
        self.0.image_attribute(SELFIE)
    }

    pub fn document_details(&self) -> Result<Option<DocumentDetails>, ValueError> {
        self.0
            .string_attribute(DOCUMENT_DETAILS)?
            .map(str::parse::<DocumentDetails>)
            .transpose()
    }

    pub fn document_images(&self) -> Result<Option<Vec<&Image>>, ValueError> {
        let Some(items) = self.0.multi_value_attribute(DOCUMENT_IMAGES)? else {
            return Ok(None);
        };
        items
            .iter()
            .map(|item| {
                item.as_image().ok_or(ValueError::UnexpectedType {
                    expected: "image",
                    found: item.type_name(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Every `age_over:N` and `age_under:N` attribute, in profile order.
    pub fn age_verifications(&self) -> Result<Vec<AgeVerification>, ValueError> {
        self.0
            .attributes()
            .iter()
            .filter(|a| AgeCheck::from_attribute_name(a.name()).is_some())
            .map(AgeVerification::try_from)
            .collect()
    }

    pub fn find_age_over_verification(
        &self,
        age: u32,
    ) -> Result<Option<AgeVerification>, ValueError> {
        self.find_age_verification(AgeCheck::Over, age)
    }

    pub fn find_age_under_verification(
        &self,
        age: u32,
    ) -> Result<Option<AgeVerification>, ValueError> {
        self.find_age_verification(AgeCheck::Under, age)
    }

    fn find_age_verification(
        &self,
        check: AgeCheck,
        age: u32,
    ) -> Result<Option<AgeVerification>, ValueError> {
        self.0
            .attribute(&check.attribute_name(age))
            .map(AgeVerification::try_from)
            .transpose()
    }
}

/// Profile of the relying application, as configured in the developer hub.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationProfile(Profile);

impl From<Profile> for ApplicationProfile {
    fn from(profile: Profile) -> Self {
        Self(profile)
    }
}

impl ApplicationProfile {
    pub fn profile(&self) -> &Profile {
        &self.0
    }

    pub fn application_name(&self) -> Result<Option<&str>, ValueError> {
        self.0.string_attribute(APPLICATION_NAME)
    }

    pub fn application_url(&self) -> Result<Option<&str>, ValueError> {
        self.0.string_attribute(APPLICATION_URL)
    }

    pub fn application_logo(&self) -> Result<Option<&Image>, ValueError> {
        self.0.image_attribute(APPLICATION_LOGO)
    }

    pub fn application_receipt_bgcolor(&self) -> Result<Option<&str>, ValueError> {
        self.0.string_attribute(APPLICATION_RECEIPT_BGCOLOR)
    }
}
