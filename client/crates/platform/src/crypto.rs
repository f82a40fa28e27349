//! Hashing and Encoding Utilities

use base64::{Engine, engine::general_purpose};
use sha2::{Digest, Sha256};

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Base64 SHA-256 digest, as object stores expect in checksum headers
pub fn sha256_base64(data: &[u8]) -> String {
    to_base64(&sha256(data))
}
