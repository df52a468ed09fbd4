mod bench;
mod cipher;
mod config;
mod demo;
mod error;
mod io;
mod keygen;
mod padding;
mod sig;
mod util;

use config::{LabConfig, DEFAULT_CHART_FILE, DEFAULT_MESSAGE};
use demo::Demo;
use error::Result;

use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "cryptolab",
    about = "AES, RSA and SHA-256 demonstrations with a key size benchmark"
)]
struct Args {
    /// Directory for keys, ciphertexts, signatures and the chart
    #[arg(long, default_value = ".", env = "CRYPTOLAB_WORK_DIR")]
    work_dir: PathBuf,

    /// Chart file name inside the work dir
    #[arg(long, default_value = DEFAULT_CHART_FILE, env = "CRYPTOLAB_CHART_FILE")]
    chart_file: String,

    /// Message every operation works on
    #[arg(long, default_value = DEFAULT_MESSAGE, env = "CRYPTOLAB_MESSAGE")]
    message: String,

    /// Run a single menu option and exit
    #[arg(long, env = "CRYPTOLAB_RUN")]
    run: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    AesEcb(usize),
    AesCfb(usize),
    Rsa,
    Signature,
    Hash,
    Performance,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Choice::AesEcb(128)),
            "2" => Some(Choice::AesEcb(256)),
            "3" => Some(Choice::AesCfb(128)),
            "4" => Some(Choice::AesCfb(256)),
            "5" => Some(Choice::Rsa),
            "6" => Some(Choice::Signature),
            "7" => Some(Choice::Hash),
            "8" => Some(Choice::Performance),
            "0" => Some(Choice::Exit),
            _ => None,
        }
    }
}

const MENU: &str = "Menu:
1. AES-128 ECB
2. AES-256 ECB
3. AES-128 CFB
4. AES-256 CFB
5. RSA Encryption/Decryption
6. RSA Signature
7. SHA-256 Hash
8. Performance Test
0. Exit";

fn execute(choice: Choice, demo: &Demo, config: &LabConfig) -> Result<()> {
    match choice {
        Choice::AesEcb(bits) => {
            demo.aes_ecb_encrypt(bits)?;
            demo.aes_ecb_decrypt(bits)?;
        }
        Choice::AesCfb(bits) => {
            demo.aes_cfb_encrypt(bits)?;
            demo.aes_cfb_decrypt(bits)?;
        }
        Choice::Rsa => {
            demo.rsa_encrypt()?;
            demo.rsa_decrypt()?;
        }
        Choice::Signature => {
            demo.rsa_sign()?;
            demo.rsa_verify()?;
        }
        Choice::Hash => {
            demo.sha256_hash()?;
        }
        Choice::Performance => {
            bench::performance_test(config)?;
        }
        Choice::Exit => {}
    }
    Ok(())
}

fn interactive(demo: &Demo, config: &LabConfig) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n{}", "-".repeat(50));
        println!("{MENU}");
        println!("{}", "-".repeat(50));
        print!("Choose option: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };

        match Choice::parse(&line?) {
            Some(Choice::Exit) => {
                println!("Exiting...");
                break;
            }
            Some(choice) => {
                if let Err(err) = execute(choice, demo, config) {
                    error!("{err}");
                }
            }
            None => println!("Invalid choice"),
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cryptolab=info".into()),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = LabConfig::new(&args.work_dir, args.message.as_bytes(), &args.chart_file);

    println!("Cryptography Lab Program");

    let demo = Demo::new(config.clone())?;
    demo.ensure_keys()?;

    match args.run {
        Some(option) => {
            let choice = Choice::parse(&option)
                .ok_or_else(|| anyhow::anyhow!("invalid menu option: {option}"))?;
            execute(choice, &demo, &config)?;
        }
        None => interactive(&demo, &config)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse("1"), Some(Choice::AesEcb(128)));
        assert_eq!(Choice::parse(" 4\n"), Some(Choice::AesCfb(256)));
        assert_eq!(Choice::parse("8"), Some(Choice::Performance));
        assert_eq!(Choice::parse("0"), Some(Choice::Exit));
        assert_eq!(Choice::parse("9"), None);
        assert_eq!(Choice::parse(""), None);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["cryptolab"]);
        assert_eq!(args.work_dir, PathBuf::from("."));
        assert_eq!(args.chart_file, "performance_graph.svg");
        assert_eq!(args.message, "This is a test message for cryptography");
        assert!(args.run.is_none());
    }

    #[test]
    fn test_execute_hash() {
        let dir = tempfile::tempdir().unwrap();
        let config = LabConfig::new(dir.path(), b"abc", "chart.svg");
        let demo = Demo::new(config.clone()).unwrap();

        execute(Choice::Hash, &demo, &config).unwrap();
        execute(Choice::Exit, &demo, &config).unwrap();
    }
}
