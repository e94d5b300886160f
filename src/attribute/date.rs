use std::{fmt, str::FromStr};

use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

const FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("expected YYYY-MM-DD, got {0:?}")]
    Layout(String),
    #[error(transparent)]
    Parse(#[from] time::error::Parse),
}

/// Calendar date carried by `DATE` attributes, encoded as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FullDate(Date);

impl FullDate {
    pub fn date(&self) -> Date {
        self.0
    }

    /// Midnight UTC at the start of this date.
    pub fn to_utc_midnight(&self) -> OffsetDateTime {
        self.0.midnight().assume_utc()
    }
}

impl From<Date> for FullDate {
    fn from(d: Date) -> Self {
        FullDate(d)
    }
}

impl From<FullDate> for Date {
    fn from(d: FullDate) -> Self {
        d.0
    }
}

impl fmt::Display for FullDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            <u8>::from(self.0.month()),
            self.0.day()
        )
    }
}

impl FromStr for FullDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `[year]` alone would also take a sign or extra digits.
        if s.len() != 10 || !s.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(Error::Layout(s.to_owned()));
        }
        Ok(FullDate(Date::parse(s, FORMAT)?))
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn fulldate_str_roundtrip() {
        const DATESTR: &str = "2000-02-03";
        let fulldate = FullDate::from_str(DATESTR).expect("unable to parse datestr");
        assert_eq!(DATESTR, fulldate.to_string())
    }

    #[test]
    fn midnight_utc() {
        let fulldate = FullDate::from_str("1970-12-01").unwrap();
        assert_eq!(fulldate.to_utc_midnight(), datetime!(1970-12-01 0:00 UTC));
    }

    #[test]
    fn rejects_invalid_dates() {
        assert!(FullDate::from_str("1970-13-01").is_err());
        assert!(FullDate::from_str("1970-02-30").is_err());
        assert!(FullDate::from_str("01/12/1970").is_err());
        assert!(FullDate::from_str("").is_err());
        assert!(matches!(
            FullDate::from_str("+1970-12-01"),
            Err(Error::Layout(_))
        ));
        assert!(FullDate::from_str("-1970-12-01").is_err());
        assert!(FullDate::from_str("01970-12-01").is_err());
    }
}
