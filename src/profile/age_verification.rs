use strum_macros::{Display, EnumString};

use crate::attribute::{Attribute, ValueError};

/// Direction of an age check, as named by the attribute prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum AgeCheck {
    #[strum(serialize = "age_over")]
    Over,
    #[strum(serialize = "age_under")]
    Under,
}

impl AgeCheck {
    pub fn attribute_name(&self, age: u32) -> String {
        format!("{self}:{age}")
    }

    pub fn from_attribute_name(name: &str) -> Option<Self> {
        let (prefix, _) = name.split_once(':')?;
        prefix.parse().ok()
    }
}

/// Outcome of an `age_over:N` or `age_under:N` check shared by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeVerification {
    check: AgeCheck,
    age: u32,
    result: bool,
    attribute: Attribute,
}

impl AgeVerification {
    pub fn check(&self) -> AgeCheck {
        self.check
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Whether the user passed the check.
    pub fn result(&self) -> bool {
        self.result
    }

    /// The underlying attribute, with its anchors.
    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }
}

impl TryFrom<&Attribute> for AgeVerification {
    type Error = ValueError;

    fn try_from(attribute: &Attribute) -> Result<Self, Self::Error> {
        let name = attribute.name();
        let invalid = |reason: &str| ValueError::AgeVerification(format!("{name:?}: {reason}"));

        let (prefix, age) = name
            .split_once(':')
            .ok_or_else(|| invalid("not an age check"))?;
        let check = prefix
            .parse::<AgeCheck>()
            .map_err(|_| invalid("unknown check"))?;
        let age = age.parse::<u32>().map_err(|_| invalid("invalid age"))?;
        let result = match attribute.value()?.as_str() {
            Some("true") => true,
            Some("false") => false,
            _ => return Err(invalid("value is not \"true\" or \"false\"")),
        };

        Ok(Self {
            check,
            age,
            result,
            attribute: attribute.clone(),
        })
    }
}
