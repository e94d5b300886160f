use aes::{
    cipher::{block_padding::NoPadding, BlockCipher, BlockDecryptMut, KeyInit, KeyIvInit},
    Aes128, Aes192, Aes256,
};
use prost::Message;

use super::Error;
use crate::proto::EncryptedData;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Decrypt an AES-CBC ciphertext and strip its PKCS#7 padding.
///
/// The key length selects AES-128, AES-192 or AES-256. Every encrypted blob
/// carries its own IV, so the same key may open several blobs of one receipt.
pub fn decrypt(key: &[u8], iv: &[u8], cipher_text: &[u8]) -> Result<Vec<u8>, Error> {
    if iv.len() != BLOCK_SIZE {
        return Err(Error::InvalidIv(iv.len()));
    }
    if cipher_text.is_empty() {
        return Err(Error::EmptyData);
    }
    if cipher_text.len() % BLOCK_SIZE != 0 {
        return Err(Error::BlockAlignment(cipher_text.len()));
    }

    let mut buf = cipher_text.to_vec();
    match key.len() {
        16 => decrypt_blocks::<Aes128>(key, iv, &mut buf)?,
        24 => decrypt_blocks::<Aes192>(key, iv, &mut buf)?,
        32 => decrypt_blocks::<Aes256>(key, iv, &mut buf)?,
        len => return Err(Error::UnsupportedKeyLength(len)),
    }

    let len = pkcs7_unpad(&buf, BLOCK_SIZE)?.len();
    buf.truncate(len);
    Ok(buf)
}

/// Decode an `EncryptedData` protobuf envelope and decrypt its contents.
pub fn decrypt_encrypted_data(key: &[u8], envelope: &[u8]) -> Result<Vec<u8>, Error> {
    let encrypted = EncryptedData::decode(envelope)?;
    decrypt(key, &encrypted.iv, &encrypted.cipher_text)
}

fn decrypt_blocks<C>(key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<(), Error>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    let len = buf.len();
    let decryptor = cbc::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| Error::UnsupportedKeyLength(key.len()))?;
    decryptor
        .decrypt_padded_mut::<NoPadding>(buf)
        .map_err(|_| Error::BlockAlignment(len))?;
    Ok(())
}

/// Remove PKCS#7 padding, returning the unpadded prefix of `data`.
///
/// The last byte gives the padding length `n`; every one of the last `n`
/// bytes must equal it.
pub fn pkcs7_unpad(data: &[u8], block_size: usize) -> Result<&[u8], Error> {
    if block_size == 0 {
        return Err(Error::InvalidBlockSize(block_size));
    }
    let Some(&last) = data.last() else {
        return Err(Error::EmptyData);
    };
    let n = last as usize;
    if n == 0 || n > data.len() {
        return Err(Error::InvalidPadding);
    }
    let (unpadded, padding) = data.split_at(data.len() - n);
    if padding.iter().any(|&b| b != last) {
        return Err(Error::InvalidPadding);
    }
    Ok(unpadded)
}
