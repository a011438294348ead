//! Transport-agnostic domain model: entities, validation, pagination, the
//! authentication check, and the ports implemented by driven adapters.

pub mod auth;
pub mod error;
pub mod fare;
pub mod fleet;
pub mod matatu;
pub mod page;
pub mod payment;
pub mod ports;
pub mod user;

pub use auth::{Authenticator, Credentials, CredentialsValidationError};
pub use error::{DomainError, DomainError as Error, ErrorCode};
pub use fare::{Fare, FareValidationError, NewFare, DEFAULT_DISABILITY_DISCOUNT};
pub use fleet::{Fleet, FleetValidationError, NewFleet};
pub use matatu::{Matatu, MatatuValidationError, NewMatatu};
pub use page::Page;
pub use payment::{NewPayment, Payment, DEFAULT_PAYMENT_STATUS};
pub use user::{NewUser, User, UserValidationError, DEFAULT_ROLE};
