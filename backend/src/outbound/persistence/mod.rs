//! PostgreSQL persistence adapters built on Diesel and diesel-async.

mod diesel_fare_repository;
mod diesel_fleet_repository;
mod diesel_matatu_repository;
mod diesel_payment_repository;
mod diesel_user_repository;
mod error_mapping;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_fare_repository::DieselFareRepository;
pub use diesel_fleet_repository::DieselFleetRepository;
pub use diesel_matatu_repository::DieselMatatuRepository;
pub use diesel_payment_repository::DieselPaymentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
