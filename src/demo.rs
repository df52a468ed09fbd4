//! Single-shot demonstrations
//!
//! Each operation works on the configured message and the keys stored in the
//! working directory, writes its artifact next to them and returns the time
//! spent in the cryptographic call.

use crate::bench::timer::Timer;
use crate::cipher::{self, IV_LEN};
use crate::config::LabConfig;
use crate::error::{LabError, Result};
use crate::io::ArtifactStore;
use crate::keygen::{self, DEMO_RSA_BITS};
use crate::padding::{pad, unpad};
use crate::sig;
use crate::util::sha256_hex;

use rand::{thread_rng, RngCore};
use std::time::Duration;
use tracing::{debug, info, warn};

/// AES key sizes persisted by `generate_keys`
pub const DEMO_AES_BITS: [usize; 2] = [128, 256];

pub struct Demo {
    config: LabConfig,
    store: ArtifactStore,
    timer: Timer,
}

fn show(label: &str, bytes: &[u8]) {
    match std::str::from_utf8(bytes) {
        Ok(text) => info!("{label}: {text}"),
        Err(_) => info!("{label} (raw bytes): {}", crate::util::print_bytes(bytes)),
    }
}

fn report(elapsed: Duration) -> Duration {
    info!("Time: {:.6} seconds", elapsed.as_secs_f64());
    elapsed
}

impl Demo {
    pub fn new(config: LabConfig) -> Result<Self> {
        let store = ArtifactStore::new(&config.work_dir)?;
        Ok(Self {
            config,
            store,
            timer: Timer::new(),
        })
    }

    #[cfg(test)]
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// AES-128, AES-256 and an RSA-2048 pair, written to the work dir
    pub fn generate_keys(&self) -> Result<()> {
        for bits in DEMO_AES_BITS {
            let key = keygen::generate_symmetric_key(bits)?;
            self.store.write_aes_key(bits, &key)?;
        }

        let keypair = keygen::generate_keypair(DEMO_RSA_BITS)?;
        debug!("RSA-{} {keypair}", keypair.bits());
        self.store.write_keypair(&keypair)?;

        info!("Keys generated and saved");
        Ok(())
    }

    /// Generates keys unless a previous run left them behind
    pub fn ensure_keys(&self) -> Result<()> {
        if self.store.has_keys() {
            return Ok(());
        }
        self.generate_keys()
    }

    pub fn aes_ecb_encrypt(&self, bits: usize) -> Result<Duration> {
        info!("AES-{bits} ECB Encryption");
        let key = self.store.read_aes_key(bits)?;

        let (ciphertext, elapsed) = self.timer.measure(|| -> Result<Vec<u8>> {
            let padded = pad(&self.config.message, self.config.bench.block_size)?;
            cipher::aes_ecb_encrypt(&key, &padded)
        });

        let path = self.store.write_ecb(bits, &ciphertext?)?;
        info!("Encrypted saved to: {}", path.display());
        Ok(report(elapsed))
    }

    pub fn aes_ecb_decrypt(&self, bits: usize) -> Result<Duration> {
        info!("AES-{bits} ECB Decryption");
        let key = self.store.read_aes_key(bits)?;
        let ciphertext = self.store.read_ecb(bits)?;

        let (decrypted, elapsed) = self.timer.measure(|| cipher::aes_ecb_decrypt(&key, &ciphertext));
        let decrypted = decrypted?;

        match unpad(&decrypted, self.config.bench.block_size) {
            Ok(message) => show("Decrypted", message),
            Err(err) => {
                warn!("unpadding failed: {err}");
                show("Decrypted", &decrypted);
            }
        }

        Ok(report(elapsed))
    }

    pub fn aes_cfb_encrypt(&self, bits: usize) -> Result<Duration> {
        info!("AES-{bits} CFB Encryption");
        let key = self.store.read_aes_key(bits)?;

        let mut iv = [0u8; IV_LEN];
        let (ciphertext, elapsed) = self.timer.measure(|| {
            thread_rng().fill_bytes(&mut iv);
            cipher::aes_cfb_encrypt(&key, &iv, &self.config.message)
        });

        let path = self.store.write_cfb(bits, &iv, &ciphertext?)?;
        info!("Encrypted saved to: {}", path.display());
        Ok(report(elapsed))
    }

    pub fn aes_cfb_decrypt(&self, bits: usize) -> Result<Duration> {
        info!("AES-{bits} CFB Decryption");
        let key = self.store.read_aes_key(bits)?;
        let (iv, ciphertext) = self.store.read_cfb(bits)?;

        let (decrypted, elapsed) =
            self.timer.measure(|| cipher::aes_cfb_decrypt(&key, &iv, &ciphertext));

        show("Decrypted", &decrypted?);
        Ok(report(elapsed))
    }

    pub fn rsa_encrypt(&self) -> Result<Duration> {
        info!("RSA Encryption");
        let public = self.store.read_public_key()?;

        let (ciphertext, elapsed) =
            self.timer.measure(|| cipher::rsa_encrypt(&public, &self.config.message));

        let path = self.store.write_rsa_ciphertext(&ciphertext?)?;
        info!("Encrypted saved to: {}", path.display());
        Ok(report(elapsed))
    }

    pub fn rsa_decrypt(&self) -> Result<Duration> {
        info!("RSA Decryption");
        let private = self.store.read_private_key()?;
        let ciphertext = self.store.read_rsa_ciphertext()?;

        let (decrypted, elapsed) = self.timer.measure(|| cipher::rsa_decrypt(&private, &ciphertext));

        show("Decrypted", &decrypted?);
        Ok(report(elapsed))
    }

    pub fn rsa_sign(&self) -> Result<Duration> {
        info!("RSA Signature");
        let private = self.store.read_private_key()?;

        let (signature, elapsed) = self.timer.measure(|| sig::sign(&self.config.message, &private));
        let signature = signature?;

        let message_path = self.store.write_message(&self.config.message)?;
        let signature_path = self.store.write_signature(&signature)?;
        info!("Message saved to: {}", message_path.display());
        info!("Signature saved to: {}", signature_path.display());
        Ok(report(elapsed))
    }

    /// Returns whether the stored signature matches the stored message
    pub fn rsa_verify(&self) -> Result<(bool, Duration)> {
        info!("RSA Signature Verification");
        let public = self.store.read_public_key()?;
        let message = self.store.read_message()?;
        // an undecodable signature file verifies as invalid, like a forged one
        let signature = match self.store.read_signature() {
            Ok(signature) => signature,
            Err(LabError::Base64(err)) => {
                warn!("signature is not valid base64: {err}");
                Vec::new()
            }
            Err(err) => return Err(err),
        };

        let (valid, elapsed) = self.timer.measure(|| sig::verify(&message, &signature, &public));

        if valid {
            info!("Signature is VALID");
        } else {
            warn!("Signature is INVALID");
        }
        Ok((valid, report(elapsed)))
    }

    pub fn sha256_hash(&self) -> Result<(String, Duration)> {
        info!("SHA-256 Hashing");

        let (digest, elapsed) = self.timer.measure(|| sha256_hex(&self.config.message));

        show("Message", &self.config.message);
        info!("SHA-256: {digest}");
        Ok((digest, report(elapsed)))
    }
}
