//! Error classification shared by every module in the crate.
//!
//! Each module carries its own `thiserror` enum; all of them can be mapped to an
//! [`ErrorKind`] so callers can decide how to react without matching on every
//! variant.

use strum_macros::Display;

/// Broad category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or invalid input to request signing or client configuration.
    Configuration,
    /// Malformed PEM, wrong key type, or RSA unwrap failure.
    Key,
    /// The operating system random source could not produce a nonce.
    Entropy,
    /// Bad block alignment, bad IV, or bad PKCS#7 padding.
    Decryption,
    /// A protobuf or JSON envelope could not be decoded.
    Decode,
    /// A single value could not be parsed into its declared type.
    Parse,
    /// The receipt reports a sharing outcome other than `SUCCESS`.
    SharingFailure,
    /// The injected HTTP client failed or the server answered with an error.
    Transport {
        /// HTTP status, when the server answered at all.
        status: Option<u16>,
    },
}

impl ErrorKind {
    /// Whether repeating the same call could succeed.
    ///
    /// Everything this crate does is deterministic given the same bytes, so
    /// only server-side (5xx) transport failures qualify.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Transport { status: Some(s) } if *s >= 500)
    }
}
