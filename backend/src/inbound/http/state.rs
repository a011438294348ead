//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FareRepository, FleetRepository, MatatuRepository, PasswordHasher, PaymentRepository,
    TokenIssuer, UserRepository,
};
use crate::domain::Authenticator;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub fleets: Arc<dyn FleetRepository>,
    pub matatus: Arc<dyn MatatuRepository>,
    pub fares: Arc<dyn FareRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub authenticator: Authenticator,
}

impl HttpState {
    /// Construct state, deriving the authenticator from the user
    /// repository and hasher.
    pub fn new(
        users: Arc<dyn UserRepository>,
        fleets: Arc<dyn FleetRepository>,
        matatus: Arc<dyn MatatuRepository>,
        fares: Arc<dyn FareRepository>,
        payments: Arc<dyn PaymentRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        let authenticator = Authenticator::new(users.clone(), password_hasher.clone());
        Self {
            users,
            fleets,
            matatus,
            fares,
            payments,
            password_hasher,
            tokens,
            authenticator,
        }
    }
}
