use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `material`.
pub fn generate_content_hash(material: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(material.as_bytes());
    format!("{:x}", hasher.finalize())
}
