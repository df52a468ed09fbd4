//! Key generation
//!
//! AES keys are random byte strings of 16, 24 or 32 bytes (AES-128/192/256).
//!
//! RSA key pairs are produced by the `rsa` crate: two random primes `p` and `q`
//! of half the requested modulus size, `n = p * q`, the public exponent
//! `e = 2^16 + 1` and the private exponent `d = e^-1 mod λ(n)`.
//!
//! We end up with:
//!   - Pubkey: (n, e)
//!   - Privkey: (n, d)

use crate::error::{LabError, Result};

use rand::{thread_rng, RngCore};
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt::{self, Display, Formatter};

/// Modulus size of the key pair persisted by the demo paths
pub const DEMO_RSA_BITS: usize = 2048;

pub struct KeyPair {
    pub private: RsaPrivateKey,
    pub public: RsaPublicKey,
}

impl KeyPair {
    pub fn from_private(private: RsaPrivateKey) -> Self {
        let public = RsaPublicKey::from(&private);
        KeyPair { private, public }
    }

    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        self.public.n().bits()
    }
}

impl Display for KeyPair {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "KeyPair {{")?;
        writeln!(f, "\tn: {:02x},", self.public.n())?;
        writeln!(f, "\te: {:02x},", self.public.e())?;
        writeln!(f, "\td: {:02x},", self.private.d())?;
        write!(f, "}}")
    }
}

/// Random AES key for a 128, 192 or 256 bit cipher
pub fn generate_symmetric_key(bits: usize) -> Result<Vec<u8>> {
    if !matches!(bits, 128 | 192 | 256) {
        return Err(LabError::InvalidKeySize(bits));
    }

    let mut key = vec![0u8; bits / 8];
    thread_rng().fill_bytes(&mut key);

    Ok(key)
}

/// Generate a `KeyPair` with a modulus of `bits` bits
pub fn generate_keypair(bits: usize) -> Result<KeyPair> {
    let mut rng = thread_rng();
    let private = RsaPrivateKey::new(&mut rng, bits)?;

    Ok(KeyPair::from_private(private))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_key_lengths() {
        assert_eq!(generate_symmetric_key(128).unwrap().len(), 16);
        assert_eq!(generate_symmetric_key(192).unwrap().len(), 24);
        assert_eq!(generate_symmetric_key(256).unwrap().len(), 32);

        // two fresh keys should never collide
        assert_ne!(
            generate_symmetric_key(256).unwrap(),
            generate_symmetric_key(256).unwrap()
        );

        assert!(matches!(
            generate_symmetric_key(64),
            Err(LabError::InvalidKeySize(64))
        ));
    }

    #[test]
    fn test_generate_keypair() {
        let keypair = generate_keypair(1024).unwrap();
        assert_eq!(keypair.bits(), 1024);
        assert_eq!(keypair.public.e(), &rsa::BigUint::from(65537u32));

        let shown = keypair.to_string();
        assert!(shown.starts_with("KeyPair {"));
        assert!(shown.contains("\te: 10001,"));
    }

    #[test]
    fn test_generate_keypair_too_small() {
        assert!(generate_keypair(8).is_err());
    }
}
