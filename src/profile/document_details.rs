use std::str::FromStr;

use crate::attribute::{FullDate, ValueError};

/// Parsed `document_details` attribute:
/// `TYPE COUNTRY NUMBER [EXPIRY|-] [AUTHORITY...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDetails {
    document_type: String,
    issuing_country: String,
    document_number: String,
    expiration_date: Option<FullDate>,
    issuing_authority: Option<String>,
}

impl DocumentDetails {
    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    pub fn issuing_country(&self) -> &str {
        &self.issuing_country
    }

    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    pub fn expiration_date(&self) -> Option<FullDate> {
        self.expiration_date
    }

    pub fn issuing_authority(&self) -> Option<&str> {
        self.issuing_authority.as_deref()
    }
}

impl FromStr for DocumentDetails {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(' ').collect();
        if fields.len() < 3 || fields.iter().any(|f| f.is_empty()) {
            return Err(ValueError::DocumentDetails(format!("malformed value {s:?}")));
        }

        let expiration_date = match fields.get(3) {
            None | Some(&"-") => None,
            Some(date) => Some(date.parse::<FullDate>().map_err(|e| {
                ValueError::DocumentDetails(format!("invalid expiration date {date:?}: {e}"))
            })?),
        };
        let issuing_authority = (fields.len() > 4).then(|| fields[4..].join(" "));

        Ok(Self {
            document_type: fields[0].to_owned(),
            issuing_country: fields[1].to_owned(),
            document_number: fields[2].to_owned(),
            expiration_date,
            issuing_authority,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn full_details() {
        let details: DocumentDetails = "DRIVING_LICENCE GBR 1234abc 2016-05-01 DVLA".parse().unwrap();
        assert_eq!(details.document_type(), "DRIVING_LICENCE");
        assert_eq!(details.issuing_country(), "GBR");
        assert_eq!(details.document_number(), "1234abc");
        assert_eq!(details.expiration_date().unwrap().to_string(), "2016-05-01");
        assert_eq!(details.issuing_authority(), Some("DVLA"));
    }

    #[test]
    fn minimal_details() {
        let details: DocumentDetails = "PASSPORT GBR 01234567".parse().unwrap();
        assert_eq!(details.expiration_date(), None);
        assert_eq!(details.issuing_authority(), None);
    }

    #[test]
    fn dash_means_no_expiry() {
        let details: DocumentDetails = "NATIONAL_ID NGA AA02 - DVLA OFFICE".parse().unwrap();
        assert_eq!(details.expiration_date(), None);
        assert_eq!(details.issuing_authority(), Some("DVLA OFFICE"));
    }

    #[test]
    fn rejects_malformed_values() {
        for value in ["", "PASSPORT GBR", "PASSPORT  GBR 1", "PASSPORT GBR 1 01-01-2020"] {
            assert!(
                matches!(value.parse::<DocumentDetails>(), Err(ValueError::DocumentDetails(_))),
                "{value:?}"
            );
        }
    }
}
