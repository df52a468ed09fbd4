//! Key size benchmark
//!
//! One pass over the configured key sizes, one sample per size:
//!   - AES: time a single ECB encryption of the padded message under a fresh key
//!   - RSA: time the generation of a fresh key pair
//!
//! A failure at one size is recorded in that size's sample and never stops the
//! pass. Nothing generated here is written to disk.

use super::timer::{Clock, MonotonicClock, Timer};
use crate::cipher;
use crate::config::BenchConfig;
use crate::error::Result;
use crate::keygen::{self, KeyPair};
use crate::padding::pad;

use std::fmt::{self, Display, Formatter};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Aes,
    Rsa,
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Algorithm::Aes => write!(f, "AES"),
            Algorithm::Rsa => write!(f, "RSA"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleStatus {
    Ok,
    Failed(String),
}

/// One timed operation at one key size
#[derive(Debug, Clone, PartialEq)]
pub struct KeySizeSample {
    algorithm: Algorithm,
    key_size_bits: usize,
    elapsed: Duration,
    status: SampleStatus,
}

impl KeySizeSample {
    pub fn ok(algorithm: Algorithm, key_size_bits: usize, elapsed: Duration) -> Self {
        Self {
            algorithm,
            key_size_bits,
            elapsed,
            status: SampleStatus::Ok,
        }
    }

    /// `elapsed` is the time spent until the failure
    pub fn failed(
        algorithm: Algorithm,
        key_size_bits: usize,
        elapsed: Duration,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            algorithm,
            key_size_bits,
            elapsed,
            status: SampleStatus::Failed(reason.into()),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn key_size_bits(&self) -> usize {
        self.key_size_bits
    }

    #[cfg(test)]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn status(&self) -> &SampleStatus {
        &self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status == SampleStatus::Ok
    }
}

/// Both series of one benchmark pass, in configured key size order
#[derive(Debug, Clone, Default)]
pub struct BenchmarkReport {
    aes: Vec<KeySizeSample>,
    rsa: Vec<KeySizeSample>,
}

impl BenchmarkReport {
    pub fn new(aes: Vec<KeySizeSample>, rsa: Vec<KeySizeSample>) -> Self {
        Self { aes, rsa }
    }

    pub fn aes(&self) -> &[KeySizeSample] {
        &self.aes
    }

    pub fn rsa(&self) -> &[KeySizeSample] {
        &self.rsa
    }

    pub fn failures(&self) -> impl Iterator<Item = &KeySizeSample> {
        self.aes.iter().chain(&self.rsa).filter(|s| !s.is_ok())
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// The primitives the benchmark times
pub trait CryptoBackend {
    type KeyPair;

    fn generate_symmetric_key(&mut self, bits: usize) -> Result<Vec<u8>>;

    fn encrypt_ecb(&self, key: &[u8], padded: &[u8]) -> Result<Vec<u8>>;

    fn generate_keypair(&mut self, bits: usize) -> Result<Self::KeyPair>;
}

/// `aes` + `rsa` crates, through `keygen` and `cipher`
#[derive(Debug, Default, Clone, Copy)]
pub struct RustCryptoBackend;

impl CryptoBackend for RustCryptoBackend {
    type KeyPair = KeyPair;

    fn generate_symmetric_key(&mut self, bits: usize) -> Result<Vec<u8>> {
        keygen::generate_symmetric_key(bits)
    }

    fn encrypt_ecb(&self, key: &[u8], padded: &[u8]) -> Result<Vec<u8>> {
        cipher::aes_ecb_encrypt(key, padded)
    }

    fn generate_keypair(&mut self, bits: usize) -> Result<KeyPair> {
        keygen::generate_keypair(bits)
    }
}

pub struct Runner<B: CryptoBackend, C: Clock = MonotonicClock> {
    config: BenchConfig,
    backend: B,
    timer: Timer<C>,
}

impl<B: CryptoBackend> Runner<B> {
    pub fn new(config: BenchConfig, backend: B) -> Self {
        Self::with_timer(config, backend, Timer::new())
    }
}

impl<B: CryptoBackend, C: Clock> Runner<B, C> {
    pub fn with_timer(config: BenchConfig, backend: B, timer: Timer<C>) -> Self {
        Self {
            config,
            backend,
            timer,
        }
    }

    pub fn run(&mut self) -> BenchmarkReport {
        let aes = self.run_aes();
        let rsa = self.run_rsa();

        BenchmarkReport::new(aes, rsa)
    }

    fn run_aes(&mut self) -> Vec<KeySizeSample> {
        info!("Testing AES encryption");

        let sizes = self.config.aes_key_sizes.clone();

        let padded = match pad(&self.config.message, self.config.block_size) {
            Ok(padded) => padded,
            Err(err) => {
                warn!("cannot pad the benchmark message: {err}");
                return sizes
                    .into_iter()
                    .map(|bits| {
                        KeySizeSample::failed(Algorithm::Aes, bits, Duration::ZERO, err.to_string())
                    })
                    .collect();
            }
        };

        sizes
            .into_iter()
            .map(|bits| self.aes_sample(bits, &padded))
            .collect()
    }

    fn aes_sample(&mut self, bits: usize, padded: &[u8]) -> KeySizeSample {
        let key = match self.backend.generate_symmetric_key(bits) {
            Ok(key) => key,
            Err(err) => {
                warn!("AES-{bits} key generation failed: {err}");
                return KeySizeSample::failed(Algorithm::Aes, bits, Duration::ZERO, err.to_string());
            }
        };

        let backend = &self.backend;
        let (result, elapsed) = self.timer.measure(|| backend.encrypt_ecb(&key, padded));

        match result {
            Ok(_) => {
                info!("AES-{bits} bits: {:.6} seconds", elapsed.as_secs_f64());
                KeySizeSample::ok(Algorithm::Aes, bits, elapsed)
            }
            Err(err) => {
                warn!("AES-{bits} encryption failed after {:.6} seconds: {err}", elapsed.as_secs_f64());
                KeySizeSample::failed(Algorithm::Aes, bits, elapsed, err.to_string())
            }
        }
    }

    fn run_rsa(&mut self) -> Vec<KeySizeSample> {
        info!("Testing RSA key generation");
        info!("RSA key sizes to test: {:?}", self.config.rsa_key_sizes);

        let sizes = self.config.rsa_key_sizes.clone();

        sizes.into_iter().map(|bits| self.rsa_sample(bits)).collect()
    }

    fn rsa_sample(&mut self, bits: usize) -> KeySizeSample {
        info!("Generating RSA-{bits} bits...");

        let backend = &mut self.backend;
        let (result, elapsed) = self.timer.measure(|| backend.generate_keypair(bits));

        match result {
            Ok(_) => {
                info!("RSA-{bits} bits: {:.6} seconds", elapsed.as_secs_f64());
                KeySizeSample::ok(Algorithm::Rsa, bits, elapsed)
            }
            Err(err) => {
                warn!(
                    "Error generating {bits}-bit key after {:.6} seconds: {err}",
                    elapsed.as_secs_f64()
                );
                KeySizeSample::failed(Algorithm::Rsa, bits, elapsed, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::timer::tests::FakeClock;
    use crate::config::{AES_KEY_SIZES, RSA_KEY_SIZES};
    use crate::error::LabError;

    const STEP: Duration = Duration::from_millis(3);

    /// Records every call; fails key generation at the chosen sizes
    #[derive(Default)]
    struct FakeBackend {
        fail_aes_at: Option<usize>,
        fail_rsa_at: Option<usize>,
        keygen_calls: Vec<usize>,
    }

    impl CryptoBackend for FakeBackend {
        type KeyPair = usize;

        fn generate_symmetric_key(&mut self, bits: usize) -> Result<Vec<u8>> {
            if self.fail_aes_at == Some(bits) {
                return Err(LabError::InvalidKeySize(bits));
            }
            Ok(vec![0u8; bits / 8])
        }

        fn encrypt_ecb(&self, _key: &[u8], padded: &[u8]) -> Result<Vec<u8>> {
            Ok(padded.to_vec())
        }

        fn generate_keypair(&mut self, bits: usize) -> Result<usize> {
            self.keygen_calls.push(bits);
            if self.fail_rsa_at == Some(bits) {
                return Err(LabError::Cipher(format!("cannot generate a {bits}-bit modulus")));
            }
            Ok(bits)
        }
    }

    fn runner(backend: FakeBackend) -> Runner<FakeBackend, FakeClock> {
        Runner::with_timer(
            BenchConfig::default(),
            backend,
            Timer::with_clock(FakeClock::new(STEP)),
        )
    }

    fn sizes(samples: &[KeySizeSample]) -> Vec<usize> {
        samples.iter().map(|s| s.key_size_bits()).collect()
    }

    #[test]
    fn test_one_sample_per_size_in_order() {
        let report = runner(FakeBackend::default()).run();

        assert_eq!(sizes(report.aes()), AES_KEY_SIZES.to_vec());
        assert_eq!(sizes(report.rsa()), RSA_KEY_SIZES.to_vec());

        assert!(report.aes().iter().all(|s| s.algorithm() == Algorithm::Aes));
        assert!(report.rsa().iter().all(|s| s.algorithm() == Algorithm::Rsa));

        // the fake clock ticks once per read: exactly one step per operation
        for sample in report.aes().iter().chain(report.rsa()) {
            assert!(sample.is_ok());
            assert_eq!(sample.elapsed(), STEP);
            assert!(sample.elapsed_seconds() >= 0.0);
        }
        assert!(report.all_succeeded());
    }

    #[test]
    fn test_rsa_failure_does_not_stop_the_pass() {
        let mut runner = runner(FakeBackend {
            fail_rsa_at: Some(1536),
            ..Default::default()
        });
        let report = runner.run();

        assert_eq!(report.rsa().len(), 4);
        assert_eq!(sizes(report.rsa()), RSA_KEY_SIZES.to_vec());

        let failed = &report.rsa()[1];
        assert!(matches!(failed.status(), SampleStatus::Failed(_)));
        assert_eq!(failed.elapsed(), STEP);

        assert!(report.rsa()[2].is_ok());
        assert!(report.rsa()[3].is_ok());
        assert_eq!(runner.backend.keygen_calls, RSA_KEY_SIZES.to_vec());

        assert!(!report.all_succeeded());
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_aes_key_failure_keeps_its_slot() {
        let report = runner(FakeBackend {
            fail_aes_at: Some(192),
            ..Default::default()
        })
        .run();

        assert_eq!(sizes(report.aes()), AES_KEY_SIZES.to_vec());

        // key generation is not timed
        let failed = &report.aes()[1];
        assert_eq!(
            failed.status(),
            &SampleStatus::Failed("unsupported AES key size: 192 bits".to_string())
        );
        assert_eq!(failed.elapsed(), Duration::ZERO);
        assert!(report.aes()[2].is_ok());
    }

    #[test]
    fn test_bad_block_size_fails_aes_only() {
        let config = BenchConfig {
            block_size: 0,
            ..BenchConfig::default()
        };
        let report = Runner::with_timer(
            config,
            FakeBackend::default(),
            Timer::with_clock(FakeClock::new(STEP)),
        )
        .run();

        assert_eq!(sizes(report.aes()), AES_KEY_SIZES.to_vec());
        for sample in report.aes() {
            assert_eq!(
                sample.status(),
                &SampleStatus::Failed("block size 0 is outside 1..=255".to_string())
            );
            assert_eq!(sample.elapsed(), Duration::ZERO);
        }

        assert_eq!(report.rsa().len(), 4);
        assert!(report.rsa().iter().all(|s| s.is_ok()));
    }

    #[test]
    fn test_real_backend_unsupported_size() {
        let config = BenchConfig {
            rsa_key_sizes: vec![8, 1024],
            ..BenchConfig::default()
        };
        let report = Runner::new(config, RustCryptoBackend).run();

        assert_eq!(report.aes().len(), 3);
        assert!(report.aes().iter().all(|s| s.is_ok()));

        assert_eq!(sizes(report.rsa()), vec![8, 1024]);
        assert!(!report.rsa()[0].is_ok());
        assert!(report.rsa()[0].elapsed_seconds() >= 0.0);
        assert!(report.rsa()[1].is_ok());
    }

    #[test]
    #[ignore = "generates RSA keys up to 3072 bits"]
    fn test_real_backend_default_sizes() {
        let report = Runner::new(BenchConfig::default(), RustCryptoBackend).run();

        assert_eq!(sizes(report.aes()), AES_KEY_SIZES.to_vec());
        assert_eq!(sizes(report.rsa()), RSA_KEY_SIZES.to_vec());
        assert!(report.all_succeeded());
    }
}
