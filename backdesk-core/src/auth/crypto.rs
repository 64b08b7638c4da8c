use argon2::{
    Algorithm, Argon2, Params, ParamsBuilder, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use password_hash::Error as PasswordHashError;
use rand::{TryRngCore, rngs::OsRng};
use thiserror::Error;

use crate::error::AuthError;

/// Adaptive one-way password hashing.
///
/// Wraps Argon2id with fixed parameters so every call site hashes and
/// verifies with the same cost settings. The per-password salt is embedded in
/// the emitted PHC string, so verification needs nothing beyond the digest
/// itself.
#[derive(Debug)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

#[derive(Debug, Error)]
pub enum CredentialHashError {
    #[error("invalid Argon2 parameters: {0}")]
    InvalidParams(String),
    #[error("password hashing error: {0}")]
    Hash(String),
}

impl From<PasswordHashError> for CredentialHashError {
    fn from(err: PasswordHashError) -> Self {
        CredentialHashError::Hash(err.to_string())
    }
}

impl From<CredentialHashError> for AuthError {
    fn from(err: CredentialHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl CredentialHasher {
    /// Defaults target ~64 MiB memory and 3 iterations, a solid server
    /// baseline without dedicated tuning.
    const DEFAULT_MEMORY_KIB: u32 = 64 * 1024; // 64 MiB
    const DEFAULT_ITERATIONS: u32 = 3;
    const DEFAULT_PARALLELISM: u32 = 1;
    const SALT_LENGTH: usize = password_hash::Salt::RECOMMENDED_LENGTH;

    /// Build a hasher with the default Argon2id parameters.
    pub fn new() -> Result<Self, CredentialHashError> {
        Self::with_params(
            ParamsBuilder::new()
                .m_cost(Self::DEFAULT_MEMORY_KIB)
                .t_cost(Self::DEFAULT_ITERATIONS)
                .p_cost(Self::DEFAULT_PARALLELISM)
                .output_len(32)
                .build()
                .map_err(|err| {
                    CredentialHashError::InvalidParams(err.to_string())
                })?,
        )
    }

    /// Build a hasher with caller-specified parameters (useful for tests or
    /// constrained environments).
    pub fn with_params(params: Params) -> Result<Self, CredentialHashError> {
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::default(), params),
        })
    }

    /// Hash a plaintext password with a fresh random salt. The resulting PHC
    /// string is suitable for storage.
    pub fn hash_password(
        &self,
        password: &str,
    ) -> Result<String, CredentialHashError> {
        let mut salt_bytes = [0u8; Self::SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|err| CredentialHashError::Hash(err.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(CredentialHashError::from)?;
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)?
            .to_string();
        Ok(hash)
    }

    /// Verify a plaintext password against a stored PHC digest.
    ///
    /// A mismatch is the normal `Ok(false)` outcome, not an error; only an
    /// undecodable stored digest surfaces as `Err`.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, CredentialHashError> {
        let parsed = PasswordHash::new(password_hash)?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low-cost parameters keep the test suite fast; production construction
    // goes through `new`.
    fn test_hasher() -> CredentialHasher {
        let params = ParamsBuilder::new()
            .m_cost(1024)
            .t_cost(1)
            .p_cost(1)
            .output_len(32)
            .build()
            .unwrap();
        CredentialHasher::with_params(params).unwrap()
    }

    #[test]
    fn hashes_passwords_and_verifies() {
        let hasher = test_hasher();
        let hash = hasher.hash_password("correct horse").unwrap();
        assert!(hasher.verify_password("correct horse", &hash).unwrap());
        assert!(!hasher.verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn embeds_a_fresh_salt_per_hash() {
        let hasher = test_hasher();
        let first = hasher.hash_password("same input").unwrap();
        let second = hasher.hash_password("same input").unwrap();
        assert_ne!(first, second);
        assert!(hasher.verify_password("same input", &first).unwrap());
        assert!(hasher.verify_password("same input", &second).unwrap());
    }

    #[test]
    fn rejects_undecodable_digest() {
        let hasher = test_hasher();
        assert!(hasher.verify_password("whatever", "not-a-phc-string").is_err());
    }
}
