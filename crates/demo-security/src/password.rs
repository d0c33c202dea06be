//! Password hashing with Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Invalid cost parameters: {0}")]
    InvalidParams(String),
}

/// Argon2 work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordCost {
    /// Argon2 recommended defaults.
    #[default]
    Standard,
    /// Minimal memory and iterations. Only for throwaway engines and tests.
    Low,
}

#[derive(Debug, Clone)]
pub struct PasswordService {
    params: Params,
}

impl PasswordService {
    pub fn new(cost: PasswordCost) -> Result<Self, PasswordError> {
        let params = match cost {
            PasswordCost::Standard => Params::default(),
            PasswordCost::Low => Params::new(Params::MIN_M_COST, Params::MIN_T_COST, 1, None)
                .map_err(|e| PasswordError::InvalidParams(e.to_string()))?,
        };
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    /// Verification reads the parameters embedded in the PHC string, so hashes
    /// produced under a different cost still verify.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::HashError(e.to_string()))?;
        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}
