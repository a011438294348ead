//! User account entity and creation draft.

use std::fmt;

/// Role assigned to accounts that do not request one explicitly.
pub const DEFAULT_ROLE: &str = "user";

/// Persisted user account.
///
/// The `hashed_password` field holds the opaque argon2 PHC string; it never
/// leaves the process through an outbound representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
    pub phone: Option<String>,
    pub role: String,
}

/// Validation errors returned by [`NewUser::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    EmptyEmail,
    InvalidEmail,
    EmptyPassword,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Validated draft for registering a user account.
///
/// The raw password travels alongside the draft only until the inbound
/// adapter has hashed it; the draft itself never stores credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
}

impl NewUser {
    /// Validate and construct a draft from wire-form parts.
    ///
    /// `role` falls back to [`DEFAULT_ROLE`] when absent.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        phone: Option<String>,
        role: Option<String>,
    ) -> Result<Self, UserValidationError> {
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        // Minimal shape check; the mail system is the real validator.
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self {
            name: name.trim().to_owned(),
            email: email.to_owned(),
            phone,
            role: role.unwrap_or_else(|| DEFAULT_ROLE.to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn draft_defaults_role_and_trims_fields() {
        let draft = NewUser::try_from_parts(" Jane ", " jane@example.com ", None, None)
            .expect("valid draft");
        assert_eq!(draft.name, "Jane");
        assert_eq!(draft.email, "jane@example.com");
        assert_eq!(draft.role, DEFAULT_ROLE);
    }

    #[test]
    fn draft_keeps_explicit_role() {
        let draft =
            NewUser::try_from_parts("Jane", "jane@example.com", None, Some("operator".into()))
                .expect("valid draft");
        assert_eq!(draft.role, "operator");
    }

    #[rstest]
    #[case("", "jane@example.com", UserValidationError::EmptyName)]
    #[case("Jane", "", UserValidationError::EmptyEmail)]
    #[case("Jane", "not-an-address", UserValidationError::InvalidEmail)]
    #[case("Jane", "@example.com", UserValidationError::InvalidEmail)]
    #[case("Jane", "jane@", UserValidationError::InvalidEmail)]
    fn draft_rejects_invalid_parts(
        #[case] name: &str,
        #[case] email: &str,
        #[case] expected: UserValidationError,
    ) {
        let err = NewUser::try_from_parts(name, email, None, None).expect_err("invalid draft");
        assert_eq!(err, expected);
    }
}
