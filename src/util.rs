use sha2::{Digest, Sha256};

pub fn print_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// SHA-256 digest of `message`, hex encoded
pub fn sha256_hex(message: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(message);
    print_bytes(&hasher.finalize())
}
