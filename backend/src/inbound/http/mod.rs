//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod error;
pub mod fares;
pub mod fleets;
pub mod health;
pub mod matatus;
pub mod pagination;
pub mod payments;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::{web, Scope};

/// Assemble every resource handler under the `/api` scope.
///
/// Shared by the server bootstrap and the handler tests so both drive the
/// same routing table.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(auth::token)
        .service(users::create_user)
        .service(users::list_users)
        .service(users::get_user_by_email)
        .service(users::get_user)
        .service(fleets::create_fleet)
        .service(fleets::list_fleets)
        .service(fleets::list_fleets_for_operator)
        .service(fleets::get_fleet)
        .service(fleets::delete_fleet)
        .service(matatus::create_matatu)
        .service(matatus::list_matatus)
        .service(matatus::get_matatu_by_registration)
        .service(matatus::list_matatus_for_operator)
        .service(matatus::get_matatu)
        .service(matatus::delete_matatu)
        .service(fares::create_fare)
        .service(fares::list_fares)
        .service(fares::list_fares_for_matatu)
        .service(fares::update_fare)
        .service(payments::create_payment)
        .service(payments::list_payments)
        .service(payments::list_payments_for_user)
}
