//! Credential validation and the authentication check.

use std::fmt;
use std::sync::Arc;

use super::error::DomainError;
use super::ports::{PasswordHasher, UserRepository, UserPersistenceError};
use super::user::User;

/// Validation errors returned by [`Credentials::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    EmptyEmail,
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Submitted login credentials: the account email and raw password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Validate and construct credentials from wire-form parts.
    pub fn try_from_parts(
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        if email.trim().is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email: email.trim().to_owned(),
            password: password.to_owned(),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Verifies submitted credentials against the stored one-way hash.
///
/// Unknown email and wrong password both resolve to `Ok(None)` so callers
/// cannot tell which check failed.
#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Run the authentication check.
    ///
    /// Returns the account on success and `None` on any credential
    /// mismatch. Only infrastructure failures surface as errors.
    pub async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<User>, DomainError> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_lookup_error)?
        else {
            return Ok(None);
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &user.hashed_password)
            .map_err(|err| DomainError::internal(err.to_string()))?;

        Ok(matches.then_some(user))
    }
}

fn map_lookup_error(error: UserPersistenceError) -> DomainError {
    match error {
        UserPersistenceError::Connection { message } => DomainError::service_unavailable(message),
        UserPersistenceError::Query { message } => DomainError::internal(message),
        UserPersistenceError::DuplicateEmail { email } => {
            DomainError::internal(format!("unexpected duplicate email {email} during lookup"))
        }
    }
}
