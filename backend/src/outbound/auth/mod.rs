//! Credential adapters: password hashing and bearer-token issuance.

mod password;
mod token;

pub use password::Argon2PasswordHasher;
pub use token::{generate_ephemeral_secret, Claims, JwtTokenIssuer, DEFAULT_TOKEN_TTL_MINUTES};
