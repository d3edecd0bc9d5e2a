//! Salted password hashing.
//!
//! Stored format is `salt_hex:digest_hex` where digest = SHA-256(salt || password)
//! with a random 16-byte salt per user.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

/// Well-formed stored value that matches no password. Login verifies
/// against this when the username does not exist, so a miss costs the
/// same hash round as a wrong password.
pub const NO_MATCH_HASH: &str = "00000000000000000000000000000000:0000000000000000000000000000000000000000000000000000000000000000";

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(plaintext: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    format!("{}:{}", hex::encode(salt), hex::encode(digest(&salt, plaintext)))
}

/// Verify a plaintext password against a stored `salt_hex:digest_hex` value.
///
/// Returns false for malformed stored values rather than erroring — a
/// corrupt row reads as a failed login, not a 500.
pub fn verify_password(stored: &str, plaintext: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once(':') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
        return false;
    };

    constant_time_eq(&digest(&salt, plaintext), &expected)
}

fn digest(salt: &[u8], plaintext: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(plaintext.as_bytes());
    hasher.finalize().to_vec()
}

/// Compare without short-circuiting so timing doesn't leak the match prefix.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let stored = hash_password("hunter42");
        assert!(verify_password(&stored, "hunter42"));
        assert!(!verify_password(&stored, "hunter43"));
    }

    #[test]
    fn same_password_hashes_differently() {
        // Fresh salt every time.
        assert_ne!(hash_password("secret"), hash_password("secret"));
    }

    #[test]
    fn stored_format_is_salt_colon_digest() {
        let stored = hash_password("pw");
        let (salt, digest) = stored.split_once(':').unwrap();
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert_eq!(digest.len(), 64); // SHA-256 hex
    }

    #[test]
    fn no_match_hash_is_well_formed_and_never_matches() {
        let (salt, digest) = NO_MATCH_HASH.split_once(':').unwrap();
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert_eq!(digest.len(), 64);
        assert!(hex::decode(salt).is_ok());

        assert!(!verify_password(NO_MATCH_HASH, ""));
        assert!(!verify_password(NO_MATCH_HASH, "hunter42"));
    }

    #[test]
    fn malformed_stored_value_fails_closed() {
        assert!(!verify_password("", "pw"));
        assert!(!verify_password("nocolon", "pw"));
        assert!(!verify_password("zz:not-hex", "pw"));
        assert!(!verify_password("abcd:abcd", "pw"));
    }
}
