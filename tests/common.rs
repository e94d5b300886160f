use aes::{
    cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit},
    Aes256,
};
use anyhow::{Context, Result};
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use prost::Message;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};
use yoti_receipt::{
    crypto::{self, RsaPrivateKey},
    proto::{self, ContentType},
    receipt::SHARING_OUTCOME_SUCCESS,
    Receipt,
};

const AES_KEY: [u8; 32] = [
    0x3c, 0x1f, 0x7a, 0x2d, 0x90, 0x44, 0x6b, 0xe1, 0x05, 0xaa, 0x13, 0x7e, 0xc8, 0x59, 0x02,
    0xbd, 0x66, 0x71, 0x0f, 0x93, 0xd4, 0x28, 0x3a, 0xe7, 0x4c, 0x81, 0xb2, 0x17, 0x5e, 0xf0,
    0x09, 0x62,
];

#[allow(dead_code)]
pub static SOURCE_CERT: &[u8] = include_bytes!("../test/anchors/source.der");
#[allow(dead_code)]
pub static VERIFIER_CERT: &[u8] = include_bytes!("../test/anchors/verifier.der");
#[allow(dead_code)]
pub static PLAIN_CERT: &[u8] = include_bytes!("../test/anchors/plain.der");

#[allow(dead_code)]
fn main() {}

#[allow(dead_code)]
pub fn private_key() -> Result<RsaPrivateKey> {
    crypto::load_private_key(include_str!("../test/keys/test-key.pem"))
        .context("could not load test key")
}

#[allow(dead_code)]
pub fn private_key_pkcs8() -> Result<RsaPrivateKey> {
    crypto::load_private_key(include_str!("../test/keys/test-key-pkcs8.pem"))
        .context("could not load PKCS#8 test key")
}

fn rsa_encrypt(key: &RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>> {
    RsaPublicKey::from(key)
        .encrypt(&mut rand::thread_rng(), Pkcs1v15Encrypt, data)
        .context("could not RSA encrypt")
}

/// Share token as the front end hands it over: RSA encrypted, URL-safe base64.
#[allow(dead_code)]
pub fn encrypt_token(key: &RsaPrivateKey, token: &str) -> Result<String> {
    Ok(URL_SAFE_NO_PAD.encode(rsa_encrypt(key, token.as_bytes())?))
}

/// Base64 `EncryptedData` envelope holding `plain`, under the receipt key.
#[allow(dead_code)]
pub fn encrypt_content(plain: &[u8]) -> String {
    let iv: [u8; 16] = rand::random();
    let cipher_text = cbc::Encryptor::<Aes256>::new_from_slices(&AES_KEY, &iv)
        .expect("valid key and IV lengths")
        .encrypt_padded_vec_mut::<Pkcs7>(plain);
    let envelope = proto::EncryptedData {
        iv: iv.to_vec(),
        cipher_text,
    };
    STANDARD.encode(envelope.encode_to_vec())
}

#[allow(dead_code)]
pub fn attribute(name: &str, content_type: ContentType, value: &[u8]) -> proto::Attribute {
    proto::Attribute {
        name: name.to_string(),
        value: value.to_vec(),
        content_type: content_type as i32,
        anchors: vec![],
    }
}

#[allow(dead_code)]
pub fn anchor(certificates: &[&[u8]], sub_type: &str, micros: Option<u64>) -> proto::Anchor {
    proto::Anchor {
        origin_server_certs: certificates.iter().map(|c| c.to_vec()).collect(),
        sub_type: sub_type.to_string(),
        signed_time_stamp: micros
            .map(|timestamp| {
                proto::SignedTimestamp {
                    version: 1,
                    timestamp,
                    ..Default::default()
                }
                .encode_to_vec()
            })
            .unwrap_or_default(),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn attribute_list(attributes: Vec<proto::Attribute>) -> Vec<u8> {
    proto::AttributeList { attributes }.encode_to_vec()
}

/// A successful receipt for `key`, with the given application and user attributes.
#[allow(dead_code)]
pub fn receipt(
    key: &RsaPrivateKey,
    application: Vec<proto::Attribute>,
    user: Vec<proto::Attribute>,
) -> Result<Receipt> {
    Ok(Receipt {
        receipt_id: Some("9HNJDX5bEIN5TqBm0OGzVIc1LaAmbzfx6eIrwNdwpHvKeQmgPujyogC+r7hJCVPl".to_string()),
        wrapped_receipt_key: STANDARD.encode(rsa_encrypt(key, &AES_KEY)?),
        profile_content: Some(encrypt_content(&attribute_list(application))),
        other_party_profile_content: Some(encrypt_content(&attribute_list(user))),
        remember_me_id: Some("remember-me".to_string()),
        parent_remember_me_id: Some("parent-remember-me".to_string()),
        sharing_outcome: SHARING_OUTCOME_SUCCESS.to_string(),
        timestamp: Some("2016-07-19T08:55:38Z".to_string()),
    })
}
