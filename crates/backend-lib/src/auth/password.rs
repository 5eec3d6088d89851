// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};

use crate::error::AuthError;

/// Default scrypt cost (log2 of N)
pub const DEFAULT_LOG_N: u8 = 15;

const BLOCK_SIZE: u32 = 8;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

/// Salted scrypt hasher producing PHC strings
/// (`$scrypt$ln=15,r=8,p=1$<salt>$<hash>`).
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Create a hasher with cost `2^log_n`
    pub fn new(log_n: u8) -> Result<Self, AuthError> {
        let params = Params::new(log_n, BLOCK_SIZE, PARALLELISM, OUTPUT_LEN)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;
        Ok(Self { params })
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, plain: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password_customized(plain.as_bytes(), None, None, self.params, &salt)
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// Verify a password against a stored hash.
    ///
    /// Cost parameters are read from the hash itself, so hashes created
    /// with a different `log_n` still verify. Unparsable hashes never match.
    pub fn verify(&self, plain: &str, hashed: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hashed) {
            Ok(h) => h,
            Err(_) => return false,
        };
        Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> CredentialHasher {
        CredentialHasher::new(4).unwrap()
    }

    #[test]
    fn test_password_hashing_and_verification() {
        let hasher = cheap();
        let hash = hasher.hash("secret1").unwrap();

        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$scrypt$"));
        assert!(hasher.verify("secret1", &hash));
        assert!(!hasher.verify("secret2", &hash));
        assert!(!hasher.verify("", &hash));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let hasher = cheap();
        let first = hasher.hash("secret1").unwrap();
        let second = hasher.hash("secret1").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secret1", &first));
        assert!(hasher.verify("secret1", &second));
    }

    #[test]
    fn test_verify_reads_cost_from_hash() {
        let stronger = CredentialHasher::new(6).unwrap();
        let hash = stronger.hash("secret1").unwrap();
        assert!(cheap().verify("secret1", &hash));
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        let hasher = cheap();
        assert!(!hasher.verify("secret1", "secret1"));
        assert!(!hasher.verify("secret1", ""));
        assert!(!hasher.verify("secret1", "$scrypt$garbage"));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        assert!(matches!(
            CredentialHasher::new(64),
            Err(AuthError::Hashing(_))
        ));
    }
}
