//! Key handling and payload decryption for sharing receipts.
//!
//! A receipt carries an AES key wrapped with the relying party's RSA public
//! key. [`unwrap_key`] recovers it, then [`decrypt`] opens each AES-CBC
//! encrypted profile blob.

mod aes_cbc;
mod rsa_key;

pub use aes_cbc::{decrypt, decrypt_encrypted_data, pkcs7_unpad, BLOCK_SIZE};
pub use rsa_key::{decrypt_token, load_private_key, load_private_key_file, unwrap_key};

pub use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to decode base64 input: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("unable to load private key: {0}")]
    PrivateKey(String),
    #[error("unable to read private key file: {0}")]
    KeyFile(#[from] std::io::Error),
    #[error("unable to unwrap key: {0}")]
    Unwrap(#[source] rsa::Error),
    #[error("decrypted token is not valid UTF-8")]
    TokenEncoding,
    #[error("unsupported AES key length: {0} bytes")]
    UnsupportedKeyLength(usize),
    #[error("invalid IV length: expected {BLOCK_SIZE} bytes, got {0}")]
    InvalidIv(usize),
    #[error("cannot remove padding on empty data")]
    EmptyData,
    #[error("ciphertext length {0} is not a multiple of the block size")]
    BlockAlignment(usize),
    #[error("invalid block size: {0}")]
    InvalidBlockSize(usize),
    #[error("invalid PKCS#7 padding")]
    InvalidPadding,
    #[error("unable to decode encrypted data envelope: {0}")]
    Envelope(#[from] prost::DecodeError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::PrivateKey(_) | Error::KeyFile(_) | Error::Unwrap(_) => ErrorKind::Key,
            Error::Base64(_) | Error::Envelope(_) | Error::TokenEncoding => ErrorKind::Decode,
            Error::UnsupportedKeyLength(_)
            | Error::InvalidIv(_)
            | Error::EmptyData
            | Error::BlockAlignment(_)
            | Error::InvalidBlockSize(_)
            | Error::InvalidPadding => ErrorKind::Decryption,
        }
    }
}
