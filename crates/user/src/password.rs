use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
    },
};

use accounts_shared::Result;

use crate::types::CredentialAlgorithm;

/// Hashing seam for credential changes. Which algorithm backs it is the
/// embedding application's choice; the core only records the marker.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String>;

    fn verify(&self, hash: &str, plain: &str) -> bool;

    /// True when `hash` was produced by an older algorithm or weaker
    /// parameters than this hasher would use today.
    fn needs_rehash(&self, hash: &str) -> bool;

    fn algorithm(&self) -> CredentialAlgorithm;
}

#[derive(Debug, Default, Clone)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        Ok(argon2.hash_password(plain.as_bytes(), &salt)?.to_string())
    }

    fn verify(&self, hash: &str, plain: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }

    fn needs_rehash(&self, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => !matches!(
                argon2::Algorithm::try_from(parsed.algorithm),
                Ok(argon2::Algorithm::Argon2id)
            ),
            Err(_) => true,
        }
    }

    fn algorithm(&self) -> CredentialAlgorithm {
        CredentialAlgorithm::Argon2id
    }
}
