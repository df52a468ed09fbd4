//! AES (ECB, CFB) and RSA-OAEP cipher / decipher
//!
//! ECB: every 16 byte block is enciphered on its own, so the input must be
//! padded first (see `padding`).
//!
//! CFB: full-block feedback (segment size = block size), c_i = p_i ^ E(c_{i-1}),
//! with c_0 = IV. No padding is needed.
//!
//! RSA: OAEP with SHA-256 as both the label hash and the MGF1 hash.

use crate::error::{LabError, Result};
use crate::padding::BLOCK_SIZE;

use aes::cipher::{
    AsyncStreamCipher, BlockCipher, BlockDecrypt, BlockEncrypt, BlockEncryptMut, KeyInit,
    KeyIvInit,
};
use aes::{Aes128, Aes192, Aes256};
use rand::thread_rng;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

pub const IV_LEN: usize = BLOCK_SIZE;

fn cipher_err(err: impl std::fmt::Display) -> LabError {
    LabError::Cipher(err.to_string())
}

fn check_blocks(data: &[u8]) -> Result<()> {
    if data.len() % BLOCK_SIZE != 0 {
        return Err(LabError::Cipher(format!(
            "ECB input length {} is not a multiple of {}",
            data.len(),
            BLOCK_SIZE
        )));
    }
    Ok(())
}

fn ecb_encrypt_with<C: BlockEncrypt + KeyInit>(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let cipher = C::new_from_slice(key).map_err(cipher_err)?;

    let mut out = data.to_vec();
    for block in out.chunks_exact_mut(BLOCK_SIZE) {
        cipher.encrypt_block(block.into());
    }

    Ok(out)
}

fn ecb_decrypt_with<C: BlockDecrypt + KeyInit>(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let cipher = C::new_from_slice(key).map_err(cipher_err)?;

    let mut out = data.to_vec();
    for block in out.chunks_exact_mut(BLOCK_SIZE) {
        cipher.decrypt_block(block.into());
    }

    Ok(out)
}

fn cfb_encrypt_with<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let mut out = data.to_vec();
    cfb_mode::Encryptor::<C>::new_from_slices(key, iv)
        .map_err(cipher_err)?
        .encrypt(&mut out);

    Ok(out)
}

fn cfb_decrypt_with<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let mut out = data.to_vec();
    cfb_mode::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(cipher_err)?
        .decrypt(&mut out);

    Ok(out)
}

/// padded plaintext to ciphertext, block by block
pub fn aes_ecb_encrypt(key: &[u8], padded: &[u8]) -> Result<Vec<u8>> {
    check_blocks(padded)?;

    match key.len() {
        16 => ecb_encrypt_with::<Aes128>(key, padded),
        24 => ecb_encrypt_with::<Aes192>(key, padded),
        32 => ecb_encrypt_with::<Aes256>(key, padded),
        n => Err(LabError::InvalidKeySize(n * 8)),
    }
}

/// ciphertext to padded plaintext; the caller strips the padding
pub fn aes_ecb_decrypt(key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    check_blocks(ciphertext)?;

    match key.len() {
        16 => ecb_decrypt_with::<Aes128>(key, ciphertext),
        24 => ecb_decrypt_with::<Aes192>(key, ciphertext),
        32 => ecb_decrypt_with::<Aes256>(key, ciphertext),
        n => Err(LabError::InvalidKeySize(n * 8)),
    }
}

pub fn aes_cfb_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    match key.len() {
        16 => cfb_encrypt_with::<Aes128>(key, iv, plaintext),
        24 => cfb_encrypt_with::<Aes192>(key, iv, plaintext),
        32 => cfb_encrypt_with::<Aes256>(key, iv, plaintext),
        n => Err(LabError::InvalidKeySize(n * 8)),
    }
}

pub fn aes_cfb_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    match key.len() {
        16 => cfb_decrypt_with::<Aes128>(key, iv, ciphertext),
        24 => cfb_decrypt_with::<Aes192>(key, iv, ciphertext),
        32 => cfb_decrypt_with::<Aes256>(key, iv, ciphertext),
        n => Err(LabError::InvalidKeySize(n * 8)),
    }
}

/// message to ciphertext with the public key
pub fn rsa_encrypt(public: &RsaPublicKey, message: &[u8]) -> Result<Vec<u8>> {
    let mut rng = thread_rng();
    Ok(public.encrypt(&mut rng, Oaep::new::<Sha256>(), message)?)
}

/// ciphertext to message with the private key
pub fn rsa_decrypt(private: &RsaPrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
    Ok(private.decrypt(Oaep::new::<Sha256>(), ciphertext)?)
}
