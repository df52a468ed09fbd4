//! I/O operations
//!
//! Read/Write AES Keys
//! Read/Write RSA Keys (PKCS#1 PEM)
//! Read/Write Ciphertexts
//! Read/Write Message and Signature
//!
//! All artifacts live in one working directory. Keys are stored unencrypted.

use crate::cipher::IV_LEN;
use crate::error::{LabError, Result};
use crate::keygen::KeyPair;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::pkcs1::{
    DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding,
};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fs;
use std::path::{Path, PathBuf};

pub const FILE_PUBKEY: &str = "rsa_public.pem";
pub const FILE_PRIVKEY: &str = "rsa_private.pem";
pub const FILE_RSA_CIPHERTEXT: &str = "encrypted_rsa.bin";
pub const FILE_MESSAGE: &str = "message.txt";
pub const FILE_SIGNATURE: &str = "signature.sig";

pub fn aes_key_file(bits: usize) -> String {
    format!("aes_{bits}.key")
}

pub fn ecb_file(bits: usize) -> String {
    format!("encrypted_ecb_{bits}.bin")
}

pub fn cfb_file(bits: usize) -> String {
    format!("encrypted_cfb_{bits}.bin")
}

/// Wraps `data` in a `-----BEGIN <label>-----` block, 64 base64 chars per line
fn armor(label: &str, data: &[u8]) -> String {
    let b64 = STANDARD.encode(data);
    let lines: Vec<&str> = b64
        .as_bytes()
        .chunks(64)
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect();

    format!(
        "-----BEGIN {label}-----\n{}\n-----END {label}-----\n",
        lines.join("\n")
    )
}

fn dearmor(pem: &str) -> Result<Vec<u8>> {
    let b64 = pem
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with("-----BEGIN ") && !line.starts_with("-----END "))
        .collect::<String>();

    Ok(STANDARD.decode(b64.trim())?)
}

/// Files produced by the demo paths, rooted at one directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// True when the AES-128 key and the RSA private key are both present
    pub fn has_keys(&self) -> bool {
        self.path(&aes_key_file(128)).exists() && self.path(FILE_PRIVKEY).exists()
    }

    pub fn write_aes_key(&self, bits: usize, key: &[u8]) -> Result<PathBuf> {
        let path = self.path(&aes_key_file(bits));
        fs::write(&path, key)?;
        Ok(path)
    }

    pub fn read_aes_key(&self, bits: usize) -> Result<Vec<u8>> {
        let key = fs::read(self.path(&aes_key_file(bits)))?;
        if key.len() * 8 != bits {
            return Err(LabError::InvalidKeySize(key.len() * 8));
        }
        Ok(key)
    }

    /// Writes keys to FILE_{PUBKEY,PRIVKEY}
    pub fn write_keypair(&self, keypair: &KeyPair) -> Result<()> {
        let priv_pem = keypair.private.to_pkcs1_pem(LineEnding::LF)?;
        fs::write(self.path(FILE_PRIVKEY), priv_pem.as_bytes())?;

        let pub_pem = keypair.public.to_pkcs1_pem(LineEnding::LF)?;
        fs::write(self.path(FILE_PUBKEY), pub_pem)?;

        Ok(())
    }

    pub fn read_private_key(&self) -> Result<RsaPrivateKey> {
        let pem = fs::read_to_string(self.path(FILE_PRIVKEY))?;
        Ok(RsaPrivateKey::from_pkcs1_pem(&pem)?)
    }

    pub fn read_public_key(&self) -> Result<RsaPublicKey> {
        let pem = fs::read_to_string(self.path(FILE_PUBKEY))?;
        Ok(RsaPublicKey::from_pkcs1_pem(&pem)?)
    }

    pub fn write_ecb(&self, bits: usize, ciphertext: &[u8]) -> Result<PathBuf> {
        let path = self.path(&ecb_file(bits));
        fs::write(&path, ciphertext)?;
        Ok(path)
    }

    pub fn read_ecb(&self, bits: usize) -> Result<Vec<u8>> {
        Ok(fs::read(self.path(&ecb_file(bits)))?)
    }

    /// File layout: IV || ciphertext
    pub fn write_cfb(&self, bits: usize, iv: &[u8], ciphertext: &[u8]) -> Result<PathBuf> {
        let mut data = Vec::with_capacity(iv.len() + ciphertext.len());
        data.extend_from_slice(iv);
        data.extend_from_slice(ciphertext);

        let path = self.path(&cfb_file(bits));
        fs::write(&path, data)?;
        Ok(path)
    }

    pub fn read_cfb(&self, bits: usize) -> Result<(Vec<u8>, Vec<u8>)> {
        let mut data = fs::read(self.path(&cfb_file(bits)))?;
        if data.len() < IV_LEN {
            return Err(LabError::Cipher(format!(
                "{} is too short to hold an IV",
                cfb_file(bits)
            )));
        }

        let ciphertext = data.split_off(IV_LEN);
        Ok((data, ciphertext))
    }

    pub fn write_rsa_ciphertext(&self, ciphertext: &[u8]) -> Result<PathBuf> {
        let path = self.path(FILE_RSA_CIPHERTEXT);
        fs::write(&path, armor("RSA ENCRYPTED MESSAGE", ciphertext))?;
        Ok(path)
    }

    pub fn read_rsa_ciphertext(&self) -> Result<Vec<u8>> {
        dearmor(&fs::read_to_string(self.path(FILE_RSA_CIPHERTEXT))?)
    }

    pub fn write_message(&self, message: &[u8]) -> Result<PathBuf> {
        let path = self.path(FILE_MESSAGE);
        fs::write(&path, message)?;
        Ok(path)
    }

    pub fn read_message(&self) -> Result<Vec<u8>> {
        Ok(fs::read(self.path(FILE_MESSAGE))?)
    }

    pub fn write_signature(&self, signature: &[u8]) -> Result<PathBuf> {
        let path = self.path(FILE_SIGNATURE);
        fs::write(&path, armor("RSA SIGNATURE", signature))?;
        Ok(path)
    }

    pub fn read_signature(&self) -> Result<Vec<u8>> {
        dearmor(&fs::read_to_string(self.path(FILE_SIGNATURE))?)
    }
}
