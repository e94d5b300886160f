use std::path::Path;

use base64::{
    alphabet,
    engine::{general_purpose::STANDARD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use rsa::{pkcs1::DecodeRsaPrivateKey, pkcs8::DecodePrivateKey, Pkcs1v15Encrypt, RsaPrivateKey};
use zeroize::Zeroizing;

use super::Error;

/// Share tokens arrive URL-safe encoded, with or without padding depending on the front end.
const URL_SAFE_ANY_PADDING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Parse an RSA private key from PKCS#1 (`RSA PRIVATE KEY`) or PKCS#8 (`PRIVATE KEY`) PEM.
pub fn load_private_key(pem: &str) -> Result<RsaPrivateKey, Error> {
    RsaPrivateKey::from_pkcs1_pem(pem).or_else(|pkcs1| {
        RsaPrivateKey::from_pkcs8_pem(pem).map_err(|pkcs8| {
            Error::PrivateKey(format!(
                "not a PKCS#1 ({pkcs1}) or PKCS#8 ({pkcs8}) RSA private key"
            ))
        })
    })
}

pub fn load_private_key_file(path: impl AsRef<Path>) -> Result<RsaPrivateKey, Error> {
    let pem = std::fs::read_to_string(path)?;
    load_private_key(&pem)
}

/// Recover the per-receipt symmetric key from its base64, RSA-wrapped form.
pub fn unwrap_key(
    wrapped_key: &str,
    private_key: &RsaPrivateKey,
) -> Result<Zeroizing<Vec<u8>>, Error> {
    let wrapped = STANDARD.decode(wrapped_key.trim())?;
    private_key
        .decrypt(Pkcs1v15Encrypt, &wrapped)
        .map(Zeroizing::new)
        .map_err(Error::Unwrap)
}

/// Decrypt the one-time share token handed over by the front end.
pub fn decrypt_token(encrypted_token: &str, private_key: &RsaPrivateKey) -> Result<String, Error> {
    let encrypted = URL_SAFE_ANY_PADDING.decode(encrypted_token.trim())?;
    let token = private_key
        .decrypt(Pkcs1v15Encrypt, &encrypted)
        .map_err(Error::Unwrap)?;
    String::from_utf8(token).map_err(|_| Error::TokenEncoding)
}

#[cfg(test)]
mod test {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use rsa::RsaPublicKey;

    use super::*;
    use crate::error::ErrorKind;

    static KEY_PKCS1: &str = include_str!("../../test/keys/test-key.pem");
    static KEY_PKCS8: &str = include_str!("../../test/keys/test-key-pkcs8.pem");

    fn wrap(key: &RsaPrivateKey, data: &[u8]) -> Vec<u8> {
        RsaPublicKey::from(key)
            .encrypt(&mut rand::thread_rng(), Pkcs1v15Encrypt, data)
            .unwrap()
    }

    #[test]
    fn loads_pkcs1_and_pkcs8() {
        let pkcs1 = load_private_key(KEY_PKCS1).unwrap();
        let pkcs8 = load_private_key(KEY_PKCS8).unwrap();
        assert_eq!(RsaPublicKey::from(&pkcs1), RsaPublicKey::from(&pkcs8));
    }

    #[test]
    fn rejects_garbage_pem() {
        let err = load_private_key("-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Key);
    }

    #[test]
    fn unwraps_key() {
        let key = load_private_key(KEY_PKCS1).unwrap();
        let aes_key = [7u8; 32];
        let wrapped = STANDARD.encode(wrap(&key, &aes_key));
        assert_eq!(unwrap_key(&wrapped, &key).unwrap().as_slice(), &aes_key);
    }

    #[test]
    fn unwrap_rejects_bad_base64() {
        let key = load_private_key(KEY_PKCS1).unwrap();
        let err = unwrap_key("not base64!", &key).unwrap_err();
        assert!(matches!(err, Error::Base64(_)));
    }

    #[test]
    fn unwrap_rejects_foreign_ciphertext() {
        let key = load_private_key(KEY_PKCS1).unwrap();
        let wrapped = STANDARD.encode([0u8; 256]);
        let err = unwrap_key(&wrapped, &key).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Key);
    }

    #[test]
    fn decrypts_url_safe_token() {
        let key = load_private_key(KEY_PKCS1).unwrap();
        let encrypted = URL_SAFE_NO_PAD.encode(wrap(&key, b"share-token-123"));
        assert_eq!(decrypt_token(&encrypted, &key).unwrap(), "share-token-123");
    }
}
