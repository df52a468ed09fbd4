//! Error types
//!
//! Every fallible operation in the lab returns `Result<T>`. Failures inside the
//! benchmark loop are turned into `Failed` samples; everything else bubbles up
//! to the menu.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("padding error: {0}")]
    Padding(#[from] PaddingError),

    #[error("unsupported AES key size: {0} bits")]
    InvalidKeySize(usize),

    #[error("cipher error: {0}")]
    Cipher(String),

    #[error("RSA error: {0}")]
    Rsa(#[from] rsa::Error),

    #[error("signature error: {0}")]
    Signature(#[from] rsa::signature::Error),

    #[error("PEM error: {0}")]
    Pem(String),

    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("failed to render chart: {0}")]
    Render(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaddingError {
    #[error("block size {0} is outside 1..=255")]
    InvalidBlockSize(usize),

    #[error("invalid padding byte {0} (expected 1..={1})")]
    InvalidPadLength(u8, usize),

    #[error("padding of {pad} bytes exceeds data length {len}")]
    Truncated { pad: usize, len: usize },
}

impl From<rsa::pkcs1::Error> for LabError {
    fn from(err: rsa::pkcs1::Error) -> Self {
        LabError::Pem(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LabError>;
