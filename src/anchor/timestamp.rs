use prost::Message;
use time::OffsetDateTime;

use crate::proto;

const MICROS_PER_SECOND: u64 = 1_000_000;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to decode signed timestamp: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("signed timestamp out of range: {0}")]
    OutOfRange(#[from] time::error::ComponentRange),
}

/// Time at which an anchor was signed, truncated to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedTimestamp {
    version: i32,
    timestamp: OffsetDateTime,
}

impl SignedTimestamp {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let signed = proto::SignedTimestamp::decode(bytes)?;
        let seconds = i64::try_from(signed.timestamp / MICROS_PER_SECOND).unwrap_or(i64::MAX);
        Ok(Self {
            version: signed.version,
            timestamp: OffsetDateTime::from_unix_timestamp(seconds)?,
        })
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }
}
