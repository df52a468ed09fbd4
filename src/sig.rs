//! RSA Sign and Verify
//!
//! Signature Generation
//! The message is hashed with SHA-256, the digest is wrapped in a PKCS#1 v1.5
//! DigestInfo block (0x00 0x01 0xff.. 0x00 || OID || h) and raised to the
//! private exponent: s = EM^d mod n
//!
//! Signature Verification
//! Given a signature `s`, anyone holding the public key recomputes
//! EM' = s^e mod n and checks it against the encoding of SHA-256(message).
//!
//! The signature is valid iff EM' = EM.

use crate::error::Result;

use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

/// s = EM^d mod n
pub fn sign(message: &[u8], private: &RsaPrivateKey) -> Result<Vec<u8>> {
    let signing_key = SigningKey::<Sha256>::new(private.clone());
    let signature = signing_key.try_sign(message)?;

    Ok(signature.to_vec())
}

/// EM' = s^e mod n
pub fn verify(message: &[u8], signature: &[u8], public: &RsaPublicKey) -> bool {
    let Ok(signature) = Signature::try_from(signature) else {
        return false;
    };

    let verifying_key = VerifyingKey::<Sha256>::new(public.clone());
    verifying_key.verify(message, &signature).is_ok()
}
