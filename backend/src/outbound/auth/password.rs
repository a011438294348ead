//! Argon2 implementation of the password hashing port.
//!
//! Stored credentials are PHC strings carrying the salt and parameters, so
//! verification needs no side table.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::password_hash::{PasswordHasher as _, PasswordVerifier as _};
use argon2::Argon2;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id hasher with the library's default parameters.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, raw_password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(raw_password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError::new(err.to_string()))
    }

    fn verify(&self, raw_password: &str, hashed_password: &str) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(hashed_password)
            .map_err(|err| PasswordHashError::new(err.to_string()))?;
        match Argon2::default().verify_password(raw_password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::new(err.to_string())),
        }
    }
}
