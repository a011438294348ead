//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the database, the password hasher, the token signer). Each trait
//! exposes strongly typed errors so adapters map their failures into
//! predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::fare::{Fare, NewFare};
use super::fleet::{Fleet, NewFleet};
use super::matatu::{Matatu, NewMatatu};
use super::page::Page;
use super::payment::{NewPayment, Payment};
use super::user::{NewUser, User};

/// Errors surfaced by the user persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserPersistenceError {
    /// Database connectivity or pool checkout failures.
    #[error("user persistence connection failed: {message}")]
    Connection { message: String },
    /// Query execution failures.
    #[error("user persistence query failed: {message}")]
    Query { message: String },
    /// The unique email constraint rejected an insert.
    #[error("email {email} is already registered")]
    DuplicateEmail { email: String },
}

impl UserPersistenceError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-constraint rejections.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Errors surfaced by the fleet persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetPersistenceError {
    #[error("fleet persistence connection failed: {message}")]
    Connection { message: String },
    #[error("fleet persistence query failed: {message}")]
    Query { message: String },
    /// The referenced fleet does not exist.
    #[error("fleet {fleet_id} not found")]
    NotFound { fleet_id: i32 },
    /// The referential guard rejected a delete: matatus still point here.
    #[error("fleet {fleet_id} still has matatus assigned")]
    MatatusAssigned { fleet_id: i32 },
}

impl FleetPersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the matatu persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatatuPersistenceError {
    #[error("matatu persistence connection failed: {message}")]
    Connection { message: String },
    #[error("matatu persistence query failed: {message}")]
    Query { message: String },
    /// The referenced matatu does not exist.
    #[error("matatu {matatu_id} not found")]
    NotFound { matatu_id: i32 },
    /// A vehicle with this registration number already exists. Raised by
    /// the pre-insert check and by the unique constraint alike, so a racing
    /// duplicate insert lands on the same outcome.
    #[error("registration number {registration_number} is already registered")]
    DuplicateRegistration { registration_number: String },
}

impl MatatuPersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn duplicate_registration(registration_number: impl Into<String>) -> Self {
        Self::DuplicateRegistration {
            registration_number: registration_number.into(),
        }
    }
}

/// Errors surfaced by the fare persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FarePersistenceError {
    #[error("fare persistence connection failed: {message}")]
    Connection { message: String },
    #[error("fare persistence query failed: {message}")]
    Query { message: String },
    /// The referenced fare does not exist.
    #[error("fare {fare_id} not found")]
    NotFound { fare_id: i32 },
}

impl FarePersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the payment persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentPersistenceError {
    #[error("payment persistence connection failed: {message}")]
    Connection { message: String },
    #[error("payment persistence query failed: {message}")]
    Query { message: String },
}

impl PaymentPersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account with its already-hashed password.
    async fn create(
        &self,
        draft: &NewUser,
        hashed_password: &str,
    ) -> Result<User, UserPersistenceError>;

    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, UserPersistenceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// List accounts in creation order.
    async fn list(&self, page: Page) -> Result<Vec<User>, UserPersistenceError>;
}

/// Persistence port for fleets.
#[async_trait]
pub trait FleetRepository: Send + Sync {
    async fn create(&self, draft: &NewFleet) -> Result<Fleet, FleetPersistenceError>;

    async fn find_by_id(&self, fleet_id: i32) -> Result<Option<Fleet>, FleetPersistenceError>;

    async fn list(&self, page: Page) -> Result<Vec<Fleet>, FleetPersistenceError>;

    async fn list_by_operator(
        &self,
        operator_id: &str,
    ) -> Result<Vec<Fleet>, FleetPersistenceError>;

    /// Delete a fleet, refusing while any matatu still references it. The
    /// existence check, the reference count, and the delete run inside one
    /// transaction.
    async fn delete(&self, fleet_id: i32) -> Result<(), FleetPersistenceError>;
}

/// Persistence port for matatus.
#[async_trait]
pub trait MatatuRepository: Send + Sync {
    /// Register a vehicle. Duplicate registration numbers are rejected
    /// without mutating storage.
    async fn register(&self, draft: &NewMatatu) -> Result<Matatu, MatatuPersistenceError>;

    async fn find_by_id(&self, matatu_id: i32) -> Result<Option<Matatu>, MatatuPersistenceError>;

    async fn find_by_registration(
        &self,
        registration_number: &str,
    ) -> Result<Option<Matatu>, MatatuPersistenceError>;

    async fn list(&self, page: Page) -> Result<Vec<Matatu>, MatatuPersistenceError>;

    async fn list_by_operator(
        &self,
        operator_id: &str,
    ) -> Result<Vec<Matatu>, MatatuPersistenceError>;

    /// Delete unconditionally; fares and payments keep their rows.
    async fn delete(&self, matatu_id: i32) -> Result<(), MatatuPersistenceError>;
}

/// Persistence port for fare schedules.
#[async_trait]
pub trait FareRepository: Send + Sync {
    async fn create(&self, draft: &NewFare) -> Result<Fare, FarePersistenceError>;

    async fn list(&self, page: Page) -> Result<Vec<Fare>, FarePersistenceError>;

    async fn list_for_matatu(&self, matatu_id: i32) -> Result<Vec<Fare>, FarePersistenceError>;

    /// Full replacement of every stored field; not a patch.
    async fn update(&self, fare_id: i32, draft: &NewFare) -> Result<Fare, FarePersistenceError>;
}

/// Persistence port for payment records.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Persist a payment with a server-assigned UTC timestamp.
    async fn create(&self, draft: &NewPayment) -> Result<Payment, PaymentPersistenceError>;

    async fn list(&self, page: Page) -> Result<Vec<Payment>, PaymentPersistenceError>;

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Payment>, PaymentPersistenceError>;
}

/// Errors surfaced by the password hashing adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    pub message: String,
}

impl PasswordHashError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One-way salted hashing of account secrets.
///
/// `verify` must be safe against timing comparison of the stored hash;
/// implementations delegate to a password-hashing library rather than
/// comparing digests by hand.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, raw_password: &str) -> Result<String, PasswordHashError>;

    fn verify(&self, raw_password: &str, hashed_password: &str) -> Result<bool, PasswordHashError>;
}

/// Errors surfaced by the token issuing adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("token issuance failed: {message}")]
pub struct TokenIssueError {
    pub message: String,
}

impl TokenIssueError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Issues opaque, time-bounded credentials binding a user identity.
pub trait TokenIssuer: Send + Sync {
    /// Sign a credential for the given user id, valid for the configured
    /// window. No refresh or revocation exists.
    fn issue(&self, user_id: i32) -> Result<String, TokenIssueError>;
}
