//! Key size performance comparison
//!
//! timer -> runner (AES and RSA series) -> chart

pub mod chart;
pub mod runner;
pub mod timer;

pub use runner::{BenchmarkReport, CryptoBackend, Runner, RustCryptoBackend};

use crate::config::LabConfig;
use crate::error::Result;

use std::path::PathBuf;
use tracing::{info, warn};

/// Runs the full benchmark with the RustCrypto backend and writes the chart
pub fn performance_test(config: &LabConfig) -> Result<(BenchmarkReport, PathBuf)> {
    performance_test_with(config, RustCryptoBackend)
}

pub fn performance_test_with<B: CryptoBackend>(
    config: &LabConfig,
    backend: B,
) -> Result<(BenchmarkReport, PathBuf)> {
    info!("Performance Testing");

    let report = Runner::new(config.bench.clone(), backend).run();
    if report.all_succeeded() {
        info!("All key sizes benchmarked");
    }
    for failed in report.failures() {
        warn!(
            "{}-{} sample failed: {:?}",
            failed.algorithm(),
            failed.key_size_bits(),
            failed.status()
        );
    }

    info!("Generating graphs");
    let path = chart::render(&report, &config.chart_path())?;
    info!("Performance testing completed");

    Ok((report, path))
}
