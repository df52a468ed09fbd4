//! Lab configuration
//!
//! Everything the demo paths and the benchmark touch (test message, working
//! directory, chart file, key sizes) lives here and is passed in explicitly.

use crate::padding::BLOCK_SIZE;

use std::path::{Path, PathBuf};

pub const DEFAULT_MESSAGE: &str = "This is a test message for cryptography";
pub const DEFAULT_CHART_FILE: &str = "performance_graph.svg";

pub const AES_KEY_SIZES: [usize; 3] = [128, 192, 256];
pub const RSA_KEY_SIZES: [usize; 4] = [1024, 1536, 2048, 3072];

/// Key sizes and message used by one benchmark run
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub message: Vec<u8>,
    pub aes_key_sizes: Vec<usize>,
    pub rsa_key_sizes: Vec<usize>,
    pub block_size: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.as_bytes().to_vec(),
            aes_key_sizes: AES_KEY_SIZES.to_vec(),
            rsa_key_sizes: RSA_KEY_SIZES.to_vec(),
            block_size: BLOCK_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LabConfig {
    /// Message every operation works on
    pub message: Vec<u8>,
    /// Directory holding keys, ciphertexts, signatures and the chart
    pub work_dir: PathBuf,
    /// Chart file name, relative to `work_dir`
    pub chart_file: String,
    pub bench: BenchConfig,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.as_bytes().to_vec(),
            work_dir: PathBuf::from("."),
            chart_file: DEFAULT_CHART_FILE.to_string(),
            bench: BenchConfig::default(),
        }
    }
}

impl LabConfig {
    pub fn new(work_dir: impl AsRef<Path>, message: &[u8], chart_file: &str) -> Self {
        Self {
            message: message.to_vec(),
            work_dir: work_dir.as_ref().to_path_buf(),
            chart_file: chart_file.to_string(),
            bench: BenchConfig {
                message: message.to_vec(),
                ..BenchConfig::default()
            },
        }
    }

    pub fn chart_path(&self) -> PathBuf {
        self.work_dir.join(&self.chart_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LabConfig::default();
        assert_eq!(config.message, b"This is a test message for cryptography");
        assert_eq!(config.bench.aes_key_sizes, vec![128, 192, 256]);
        assert_eq!(config.bench.rsa_key_sizes, vec![1024, 1536, 2048, 3072]);
        assert_eq!(config.chart_path(), PathBuf::from("./performance_graph.svg"));
    }

    #[test]
    fn test_new_shares_message() {
        let config = LabConfig::new("/tmp/lab", b"hello", "chart.svg");
        assert_eq!(config.bench.message, b"hello");
        assert_eq!(config.chart_path(), PathBuf::from("/tmp/lab/chart.svg"));
    }
}
